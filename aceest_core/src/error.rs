//! Error types for the aceest_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for aceest_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Category is not one of the fixed workout phases
    #[error("Invalid category. Must be one of: {}", allowed.join(", "))]
    InvalidCategory { allowed: Vec<String> },

    /// A required text field was absent or blank
    #[error("Field '{field}' is required")]
    MissingField { field: &'static str },

    /// Duration missing, non-numeric or not strictly positive
    #[error("Field 'duration' must be a positive integer (minutes): {0}")]
    InvalidDuration(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors caused by a bad workout submission
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidCategory { .. } | Error::MissingField { .. } | Error::InvalidDuration(_)
        )
    }
}
