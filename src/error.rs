use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmartAgroError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SmartAgroError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        SmartAgroError::InvalidConfig {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SmartAgroError>;
