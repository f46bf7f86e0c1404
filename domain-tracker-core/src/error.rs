//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Sign-in or sign-out failed
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// A data operation was attempted while no identity is signed in
    #[error("Not signed in")]
    NotSignedIn,

    /// Document store rejected or failed a command
    #[error("Store error: {0}")]
    StoreError(String),

    /// Record not found
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Editor transition not allowed from its current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NotSignedIn
            | Self::RecordNotFound(_)
            | Self::ValidationError(_)
            | Self::InvalidState(_) => true,
            Self::AuthError(_) | Self::StoreError(_) | Self::SerializationError(_) => false,
        }
    }

    /// Log this error at the level matching [`Self::is_expected`].
    pub fn log(&self, action: &str) {
        if self.is_expected() {
            log::warn!("{action} rejected: {self}");
        } else {
            log::error!("{action} failed: {self}");
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
