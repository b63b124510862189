use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::domain::auth::errors::OtpCodeError;
use crate::domain::auth::errors::RefreshTokenError;
use crate::domain::auth::errors::SessionIdError;
use crate::domain::subject::models::Subject;
use crate::domain::subject::models::SubjectId;

/// Fixed-width, zero-padded numeric one-time code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub const DIGITS: usize = 4;

    /// Generate a code uniformly at random over the full `0000..=9999` range.
    pub fn generate() -> Self {
        let value = rand::thread_rng().gen_range(0..10_000u32);
        Self(format!("{value:04}"))
    }

    /// Reconstruct a code from its stored representation.
    ///
    /// # Errors
    /// * `InvalidFormat` - Value is not exactly four ASCII digits
    pub fn new(code: String) -> Result<Self, OtpCodeError> {
        if code.len() == Self::DIGITS && code.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(code))
        } else {
            Err(OtpCodeError::InvalidFormat {
                expected: Self::DIGITS,
            })
        }
    }

    /// Get the code as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The single live one-time code of a subject.
///
/// At most one row exists per subject; issuing a new code overwrites any
/// previous one. A successfully verified code is deleted.
#[derive(Debug, Clone)]
pub struct OneTimeCode {
    pub subject_id: SubjectId,
    pub code: OtpCode,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Create a code record expiring `ttl` from now.
    pub fn new(subject_id: SubjectId, code: OtpCode, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            subject_id,
            code,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// A code is live strictly before its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Refresh session unique identifier type.
///
/// The session id is the public half of a refresh token; it is safe to
/// index, log, and transmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SessionIdError> {
        Uuid::parse_str(s)
            .map(SessionId)
            .map_err(|e| SessionIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One active session grant backing a refresh token.
///
/// Only the salted hash of the token secret is kept; the plaintext leaves
/// the process exactly once, at issuance. A subject may hold any number of
/// concurrent sessions.
#[derive(Debug, Clone)]
pub struct RefreshSession {
    pub id: SessionId,
    pub subject_id: SubjectId,
    pub secret_hash: String,
    pub issued_to: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshSession {
    /// Create a session record expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject_id` - Owning subject
    /// * `secret_hash` - PHC-format hash of the token secret
    /// * `issued_to` - Label for the contact the session was issued against
    /// * `ttl` - Session lifetime
    pub fn new(subject_id: SubjectId, secret_hash: String, issued_to: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            subject_id,
            secret_hash,
            issued_to: issued_to.to_string(),
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Plaintext refresh token as handed to the client.
///
/// Wire form is `<session id>.<secret>`: the id locates the session record,
/// the secret is verified against the stored hash. Neither half is useful
/// alone.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub session_id: SessionId,
    pub secret: String,
}

impl fmt::Display for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.session_id, self.secret)
    }
}

// No Debug derive: Debug-formatting a request or outcome struct must not
// leak the secret into logs.
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshToken")
            .field("session_id", &self.session_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl FromStr for RefreshToken {
    type Err = RefreshTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (session_id, secret) = s.split_once('.').ok_or(RefreshTokenError::Malformed)?;

        if secret.is_empty() {
            return Err(RefreshTokenError::Malformed);
        }

        let session_id =
            SessionId::from_string(session_id).map_err(|_| RefreshTokenError::Malformed)?;

        Ok(Self {
            session_id,
            secret: secret.to_string(),
        })
    }
}

/// Everything a successful login hands back to the boundary layer.
pub struct LoginOutcome {
    pub access_token: String,
    pub refresh_token: RefreshToken,
    pub subject: Subject,
}

/// A rotated credential pair, returned by refresh.
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: RefreshToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_code_generate_is_four_digits() {
        for _ in 0..100 {
            let code = OtpCode::generate();
            assert_eq!(code.as_str().len(), 4);
            assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_otp_code_new_validates() {
        assert!(OtpCode::new("0042".to_string()).is_ok());
        assert!(OtpCode::new("123".to_string()).is_err());
        assert!(OtpCode::new("12345".to_string()).is_err());
        assert!(OtpCode::new("12a4".to_string()).is_err());
    }

    #[test]
    fn test_one_time_code_expiry_is_strict() {
        let record = OneTimeCode::new(SubjectId::new(), OtpCode::generate(), Duration::minutes(10));

        assert!(!record.is_expired(record.expires_at - Duration::seconds(1)));
        // valid strictly before the expiry instant, not at it
        assert!(record.is_expired(record.expires_at));
        assert!(record.is_expired(record.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let token = RefreshToken {
            session_id: SessionId::new(),
            secret: auth::generate_secret(),
        };

        let parsed: RefreshToken = token.to_string().parse().unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_refresh_token_rejects_malformed() {
        assert!("no-separator".parse::<RefreshToken>().is_err());
        assert!("not-a-uuid.secret".parse::<RefreshToken>().is_err());
        assert!(format!("{}.", SessionId::new())
            .parse::<RefreshToken>()
            .is_err());
    }

    #[test]
    fn test_refresh_token_debug_redacts_secret() {
        let token = RefreshToken {
            session_id: SessionId::new(),
            secret: "super-secret-material".to_string(),
        };

        let rendered = format!("{token:?}");
        assert!(!rendered.contains("super-secret-material"));
    }
}
