use crate::domain::recommendation::Profile;
use crate::error::RecommendError;
use serde::Deserialize;

pub const REQUIRED_FIELDS: [&str; 4] = ["age_group", "experience", "horizon", "risk_tolerance"];

/// Untrusted request body for `POST /recommend`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRequest {
    pub age_group: Option<String>,
    pub experience: Option<String>,
    pub horizon: Option<String>,
    pub risk_tolerance: Option<String>,
}

impl ProfileRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, RecommendError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(RecommendError::MalformedPayload(
                "request body is empty".to_string(),
            ));
        }
        let value = serde_json::from_slice(body)
            .map_err(|e| RecommendError::MalformedPayload(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, RecommendError> {
        // serde would also accept a positional array for a struct.
        if !value.is_object() {
            return Err(RecommendError::MalformedPayload(
                "expected a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| RecommendError::MalformedPayload(e.to_string()))
    }

    /// Values are kept exactly as received; only blankness is checked.
    pub fn validate_and_into_profile(self) -> Result<Profile, RecommendError> {
        let values = [
            self.age_group,
            self.experience,
            self.horizon,
            self.risk_tolerance,
        ];

        let fields: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .zip(values.iter())
            .filter(|(_, v)| v.as_deref().map_or(true, |s| s.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();
        if !fields.is_empty() {
            return Err(RecommendError::MissingFields { fields });
        }

        let [Some(age_group), Some(experience), Some(horizon), Some(risk_tolerance)] = values
        else {
            return Err(RecommendError::Internal(
                "profile fields vanished after validation".to_string(),
            ));
        };

        Ok(Profile {
            age_group,
            experience,
            horizon,
            risk_tolerance,
        })
    }
}
