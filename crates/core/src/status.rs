use serde::Serialize;

pub const SERVICE_NAME: &str = "stocksphere-api";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENDPOINTS: &[&str] = &["GET /", "GET /health", "POST /recommend"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBanner {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

pub fn health() -> StatusResponse {
    StatusResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: VERSION,
    }
}

pub fn banner() -> ServiceBanner {
    ServiceBanner {
        status: "running",
        message: "Welcome to StockSphere API",
        version: VERSION,
        endpoints: ENDPOINTS,
    }
}
