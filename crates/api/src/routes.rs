use std::any::Any;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use stocksphere_core::domain::recommendation::RecommendationResponse;
use stocksphere_core::error::{ErrorBody, RecommendError};
use stocksphere_core::service::RecommendationService;
use stocksphere_core::status::{self, ServiceBanner, StatusResponse};

#[derive(Debug, Clone)]
pub struct AppState {
    service: Arc<RecommendationService>,
}

impl AppState {
    pub fn new(service: RecommendationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn app(state: AppState, allowed_origins: &[String]) -> anyhow::Result<Router> {
    let cors = cors_layer(allowed_origins)?;

    Ok(Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/recommend", post(recommend))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

// The CORS layer answers every OPTIONS request itself, so `/recommend` needs no
// explicit preflight route.
fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let allow_origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin {o:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

async fn banner() -> Json<ServiceBanner> {
    Json(status::banner())
}

async fn health() -> Json<StatusResponse> {
    Json(status::health())
}

async fn recommend(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let body = body?;
    let response = state.service.recommend(&body)?;
    Ok(Json(response))
}

async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::not_found(method.as_str(), uri.path())),
    )
}

async fn method_not_allowed(method: Method, uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::method_not_allowed(method.as_str(), uri.path())),
    )
}

#[derive(Debug)]
enum ApiError {
    Recommend(RecommendError),
    /// The body could not be buffered (too large, aborted upload).
    Body(BytesRejection),
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        Self::Recommend(err)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Recommend(err) => {
                let status = if err.is_client_error() {
                    tracing::warn!(kind = ?err.kind(), error = %err, "recommendation request rejected");
                    StatusCode::BAD_REQUEST
                } else {
                    tracing::error!(error = %err, "recommendation failed");
                    sentry_anyhow::capture_anyhow(&anyhow::Error::new(err.clone()));
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Json(err.to_body())).into_response()
            }
            ApiError::Body(rejection) => {
                let status = rejection.status();
                tracing::warn!(%status, error = %rejection.body_text(), "request body rejected");
                (status, Json(ErrorBody::unreadable_body(rejection.body_text()))).into_response()
            }
        }
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::internal()),
    )
        .into_response()
}
