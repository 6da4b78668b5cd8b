use std::path::PathBuf;
use thiserror::Error;

/// Errors raised around the scoring engine
///
/// Scoring itself is total; these cover configuration and batch input only.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid settings: {0}")]
    InvalidSettings(validator::ValidationErrors),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid batch payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid batch request: {0}")]
    InvalidRequest(validator::ValidationErrors),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
