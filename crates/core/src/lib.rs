pub mod catalog;
pub mod domain;
pub mod error;
pub mod selection;
pub mod service;
pub mod status;

pub mod config {
    use crate::selection::SelectionPolicy;
    use anyhow::Context;

    pub const DEFAULT_PORT: u16 = 5000;
    pub const DEFAULT_CORS_ALLOWED_ORIGINS: &[&str] = &[
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
    ];

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub port: u16,
        pub cors_allowed_origins: Vec<String>,
        pub selection_policy: SelectionPolicy,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let port = match lookup("PORT") {
                Some(v) => v
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a port number (got {v:?})"))?,
                None => DEFAULT_PORT,
            };

            let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
                Some(v) => v
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => DEFAULT_CORS_ALLOWED_ORIGINS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            };

            let selection_policy = match lookup("RECOMMENDATION_POLICY") {
                Some(v) => v
                    .parse::<SelectionPolicy>()
                    .context("invalid RECOMMENDATION_POLICY")?,
                None => SelectionPolicy::default(),
            };

            Ok(Self {
                port,
                cors_allowed_origins,
                selection_policy,
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
            })
        }
    }

}
