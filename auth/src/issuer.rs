use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issuer of short-lived, signature-verified access tokens.
///
/// Tokens are stateless: verification checks the signature and expiration
/// only, with no store lookup. The signing secret and token lifetime are
/// fixed at construction so callers never reach into process configuration.
pub struct AccessTokenIssuer {
    jwt_handler: JwtHandler,
    ttl_hours: i64,
}

impl AccessTokenIssuer {
    /// Create a new issuer.
    ///
    /// # Arguments
    /// * `secret` - Secret key for JWT signing
    /// * `ttl_hours` - Lifetime of minted tokens, in hours
    ///
    /// # Returns
    /// Configured AccessTokenIssuer instance
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            ttl_hours,
        }
    }

    /// Mint a signed access token bound to a subject.
    ///
    /// # Arguments
    /// * `subject_id` - Subject the token asserts
    ///
    /// # Returns
    /// Signed JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn mint(&self, subject_id: &str) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject_id, self.ttl_hours);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a token and extract the subject it is bound to.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    ///
    /// # Returns
    /// The subject id carried by the token
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired (callers map this to 401)
    /// * `InvalidToken` - Malformed token or bad signature (mapped to 403)
    pub fn verify(&self, token: &str) -> Result<String, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;
        Ok(claims.sub)
    }
}
