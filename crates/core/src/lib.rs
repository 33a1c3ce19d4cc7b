pub mod client;
pub mod controller;
pub mod domain;
pub mod render;

pub mod config {
    use std::time::Duration;

    pub const DEFAULT_ANALYSIS_BASE_URL: &str = "http://127.0.0.1:8000";
    pub const DEFAULT_ANALYSIS_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub analysis_base_url: String,
        pub analysis_timeout: Duration,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                analysis_base_url: DEFAULT_ANALYSIS_BASE_URL.to_string(),
                analysis_timeout: Duration::from_secs(DEFAULT_ANALYSIS_TIMEOUT_SECS),
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let analysis_base_url = std::env::var("ANALYSIS_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ANALYSIS_BASE_URL.to_string());

            let timeout_secs = std::env::var("ANALYSIS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_ANALYSIS_TIMEOUT_SECS);

            Ok(Self {
                analysis_base_url,
                analysis_timeout: Duration::from_secs(timeout_secs),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }
    }
}
