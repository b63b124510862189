use thiserror::Error;

/// Error type for refresh-secret hashing operations.
#[derive(Debug, Clone, Error)]
pub enum SecretError {
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    #[error("Secret verification failed: {0}")]
    VerificationFailed(String),
}
