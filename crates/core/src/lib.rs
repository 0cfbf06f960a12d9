//! Shared primitives for all Rust crates in Gamedesk.

#![forbid(unsafe_code)]

/// Identity primitives for the acting administrator.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::AdminIdentity;

/// Result type used across Gamedesk crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Compares two values without regard to letter case.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.trim().to_lowercase()
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is empty or an input violates an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A name already exists at the scope it was added to.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// The admin directory rejected a request or could not be reached.
    #[error("directory error{}: {message}", status_suffix(.status))]
    Directory {
        /// Transport status code, absent for network or decode failures.
        status: Option<u16>,
        /// Human-readable failure detail.
        message: String,
    },

    /// The acting admin's permissions could not be determined.
    #[error("access resolution failed: {0}")]
    AccessResolution(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// No usable credential is available for the directory.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The operation is refused for the target resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds a directory error from a transport status and message.
    #[must_use]
    pub fn directory(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Directory {
            status,
            message: message.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" (status {code})"))
        .unwrap_or_default()
}
