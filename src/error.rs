use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the pricing pipeline
#[derive(Error, Debug)]
pub enum HardwoodError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Artifact errors
    #[error("Missing input: {path} not found. Regenerate it with `{regenerate}`")]
    MissingInput { path: PathBuf, regenerate: String },

    // Pricing errors
    #[error("Invalid probability: {0} is outside (0, 1)")]
    InvalidProbability(f64),

    // Query errors
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for HardwoodError
pub type Result<T> = std::result::Result<T, HardwoodError>;

impl HardwoodError {
    /// Build a MissingInput error that tells the operator which command
    /// rebuilds the absent artifact.
    pub fn missing_input(path: impl Into<PathBuf>, regenerate: &str) -> Self {
        Self::MissingInput {
            path: path.into(),
            regenerate: regenerate.to_string(),
        }
    }
}
