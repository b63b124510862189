use thiserror::Error;

use crate::subject::errors::ContactError;
use crate::subject::errors::SubjectError;

/// Error for stored one-time code values that fail validation on load
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OtpCodeError {
    #[error("One-time code must be exactly {expected} digits")]
    InvalidFormat { expected: usize },
}

/// Error for SessionId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for refresh tokens that do not carry the `<session id>.<secret>`
/// wire shape
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Malformed refresh token")]
    Malformed,
}

/// Error for notification gateway operations
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to deliver code: {0}")]
    DeliveryFailed(String),
}

/// Top-level error for the authentication flow.
///
/// Code and token failures are deliberately coarse: "no code", "wrong code"
/// and "expired code" all surface as `InvalidOrExpiredCode` so callers learn
/// nothing about which condition they hit. Same for refresh tokens.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid contact: {0}")]
    InvalidContact(#[from] ContactError),

    #[error("Invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("Invalid or expired refresh token")]
    InvalidOrExpiredToken,

    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    #[error("Refresh session not found")]
    SessionNotFound,

    // Infrastructure errors
    #[error("Access token error: {0}")]
    AccessToken(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<SubjectError> for AuthError {
    fn from(err: SubjectError) -> Self {
        match err {
            SubjectError::NotFound(id) => AuthError::SubjectNotFound(id),
            SubjectError::DatabaseError(msg) => AuthError::DatabaseError(msg),
            other => AuthError::Unknown(other.to_string()),
        }
    }
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        AuthError::AccessToken(err.to_string())
    }
}

impl From<auth::SecretError> for AuthError {
    fn from(err: auth::SecretError) -> Self {
        AuthError::Unknown(err.to_string())
    }
}

// Stored rows that no longer parse as domain values are data corruption,
// not caller mistakes.
impl From<OtpCodeError> for AuthError {
    fn from(err: OtpCodeError) -> Self {
        AuthError::Unknown(err.to_string())
    }
}

impl From<SessionIdError> for AuthError {
    fn from(err: SessionIdError) -> Self {
        AuthError::Unknown(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}
