pub mod argon2;
pub mod errors;

pub use argon2::SecretHasher;
pub use errors::SecretError;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

/// Generate a cryptographically random refresh-token secret.
///
/// Returns a 256-bit value encoded as base64url (43 characters).
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
