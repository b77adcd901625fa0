//! Error types for the share-upload application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // Course page errors
    #[error("Course page not found: {0}")]
    DocumentNotFound(String),

    #[error("Course page edit failed: {0}")]
    Document(String),

    #[error("Course registry error: {0}")]
    Registry(String),

    // Interaction
    #[error("Cancelled by user")]
    Cancelled,

    // Version control errors
    #[error("`{command}` failed: {message}")]
    Vcs { command: String, message: String },

    #[error("Pull request creation failed: {0}")]
    PullRequest(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory scan error: {0}")]
    Walk(#[from] walkdir::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error is a user cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const VCS_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
