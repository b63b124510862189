//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Access-token minting and verification (short-lived JWTs)
//! - Refresh-secret generation and one-way hashing (Argon2id)
//!
//! Each service defines its own ports and adapts these implementations.
//! This keeps domain logic out of the shared crate while reducing code
//! duplication.
//!
//! # Examples
//!
//! ## Access tokens
//! ```
//! use auth::AccessTokenIssuer;
//!
//! let issuer = AccessTokenIssuer::new(b"secret_key_at_least_32_bytes_long!", 5);
//! let token = issuer.mint("subject123").unwrap();
//! let subject_id = issuer.verify(&token).unwrap();
//! assert_eq!(subject_id, "subject123");
//! ```
//!
//! ## Refresh secrets
//! ```
//! use auth::{generate_secret, SecretHasher};
//!
//! let hasher = SecretHasher::new();
//! let secret = generate_secret();
//! let hash = hasher.hash(&secret).unwrap();
//! assert!(hasher.verify(&secret, &hash).unwrap());
//! ```

pub mod issuer;
pub mod jwt;
pub mod secret;

// Re-export commonly used items
pub use issuer::AccessTokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use secret::generate_secret;
pub use secret::SecretError;
pub use secret::SecretHasher;
