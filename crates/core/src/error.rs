use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendError {
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("internal fault: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingField,
    MalformedPayload,
    Internal,
}

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<&'static str>,
}

impl RecommendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecommendError::MissingFields { .. } => ErrorKind::MissingField,
            RecommendError::MalformedPayload(_) => ErrorKind::MalformedPayload,
            RecommendError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_client_error(&self) -> bool {
        !matches!(self, RecommendError::Internal(_))
    }

    pub fn to_body(&self) -> ErrorBody {
        match self {
            RecommendError::MissingFields { fields } => ErrorBody {
                error: "Missing required fields",
                kind: Some(ErrorKind::MissingField),
                message: format!("Please provide: {}", fields.join(", ")),
                missing_fields: fields.clone(),
            },
            RecommendError::MalformedPayload(detail) => ErrorBody {
                error: "No data provided",
                kind: Some(ErrorKind::MalformedPayload),
                message: format!("Request body could not be used: {detail}"),
                missing_fields: Vec::new(),
            },
            // Detail stays in logs.
            RecommendError::Internal(_) => ErrorBody::internal(),
        }
    }
}

impl ErrorBody {
    pub fn internal() -> Self {
        Self {
            error: "Internal server error",
            kind: Some(ErrorKind::Internal),
            message: "An unexpected error occurred while building recommendations".to_string(),
            missing_fields: Vec::new(),
        }
    }

    /// The body never reached validation, e.g. it was over the size limit.
    pub fn unreadable_body(detail: impl Into<String>) -> Self {
        Self {
            error: "No data provided",
            kind: Some(ErrorKind::MalformedPayload),
            message: detail.into(),
            missing_fields: Vec::new(),
        }
    }

    pub fn method_not_allowed(method: &str, path: &str) -> Self {
        Self {
            error: "Method not allowed",
            kind: None,
            message: format!("{path} does not accept {method}"),
            missing_fields: Vec::new(),
        }
    }

    pub fn not_found(method: &str, path: &str) -> Self {
        Self {
            error: "Endpoint not found",
            kind: None,
            message: format!("No endpoint matches {method} {path}"),
            missing_fields: Vec::new(),
        }
    }
}
