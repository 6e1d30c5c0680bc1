//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A credential (API key or bearer token) is missing.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The hosted store rejected a request.
    #[error("Store error: {0}")]
    Store(String),

    /// Fixture data did not match what the store returned.
    #[error("Fixture mismatch: {0}")]
    Fixture(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns a stable error code for logs and reports.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::MissingCredential(_) => "MISSING_CREDENTIAL",
            Self::Store(_) => "STORE_ERROR",
            Self::Fixture(_) => "FIXTURE_MISMATCH",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
