use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration, loaded from environment variables.
pub struct Config {
    /// Path to the gallery manifest TOML.
    pub manifest_path: PathBuf,
    /// Base URL of the face-inference service.
    pub infer_url: String,
    /// Maximum descriptor distance for a positive match.
    pub match_threshold: f32,
    /// Timeout for one HTTP call (sample fetch or inference request).
    pub http_timeout_secs: u64,
    /// Defensive cap on a whole query (detection plus matching).
    pub query_timeout_secs: u64,
}

impl Config {
    /// Load configuration from `LINEUP_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            manifest_path: std::env::var("LINEUP_MANIFEST")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("gallery.toml")),
            infer_url: std::env::var("LINEUP_INFER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8470".to_string()),
            match_threshold: env_f32(
                "LINEUP_MATCH_THRESHOLD",
                lineup_core::DEFAULT_MATCH_THRESHOLD,
            ),
            http_timeout_secs: env_u64("LINEUP_HTTP_TIMEOUT_SECS", 20),
            query_timeout_secs: env_u64("LINEUP_QUERY_TIMEOUT_SECS", 30),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
