//! Store client error types.

use serde::Deserialize;
use tallyguard_shared::AppError;
use thiserror::Error;

/// SQLSTATE for a NOT NULL violation.
pub const NOT_NULL_VIOLATION: &str = "23502";
/// SQLSTATE for a foreign key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE for an insufficient-privilege / policy violation.
pub const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Errors returned by the store client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store rejected request ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// SQLSTATE or REST error code.
        code: Option<String>,
        /// Human-readable message.
        message: String,
        /// Extra detail from the database.
        details: Option<String>,
        /// Suggested fix.
        hint: Option<String>,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A privileged client was requested without a service key.
    #[error("Privileged service key is not configured")]
    MissingServiceKey,

    /// A test identity has no bearer token.
    #[error("No bearer token for test user {0}")]
    MissingToken(String),

    /// A bearer token could not be read.
    #[error("Invalid bearer token: {0}")]
    Token(String),
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl StoreError {
    /// Builds an `Api` error from a status code and raw response body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .unwrap_or_else(|| body.trim().to_string());

        Self::Api {
            status,
            code: parsed.code,
            message,
            details: parsed.details,
            hint: parsed.hint,
        }
    }

    /// HTTP status, if the store answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// SQLSTATE or REST error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// True for a reference to a missing parent row.
    #[must_use]
    pub fn is_foreign_key_violation(&self) -> bool {
        self.code() == Some(FOREIGN_KEY_VIOLATION) || self.text_contains("foreign key")
    }

    /// True for a missing required column.
    #[must_use]
    pub fn is_not_null_violation(&self) -> bool {
        self.code() == Some(NOT_NULL_VIOLATION) || self.text_contains("null value")
    }

    /// True when row-level security refused the write.
    #[must_use]
    pub fn is_policy_violation(&self) -> bool {
        self.code() == Some(INSUFFICIENT_PRIVILEGE) || self.text_contains("row-level security")
    }

    /// True for any integrity or policy rejection.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        self.code().is_some_and(|c| c.starts_with("23"))
            || self.is_policy_violation()
            || self.text_contains("violates")
    }

    /// True when the store refused the caller's credentials.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
            || self.code().is_some_and(|c| c.starts_with("PGRST3"))
    }

    fn text_contains(&self, needle: &str) -> bool {
        match self {
            Self::Api {
                message, details, ..
            } => {
                message.to_lowercase().contains(needle)
                    || details
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle))
            }
            _ => false,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingServiceKey | StoreError::MissingToken(_) => {
                Self::MissingCredential(err.to_string())
            }
            StoreError::Decode(_) => Self::Internal(err.to_string()),
            _ => Self::Store(err.to_string()),
        }
    }
}
