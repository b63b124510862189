use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::NotificationError;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::OneTimeCode;
use crate::domain::auth::models::OtpCode;
use crate::domain::auth::models::RefreshSession;
use crate::domain::auth::models::SessionId;
use crate::domain::auth::models::TokenPair;
use crate::domain::subject::models::Contact;
use crate::domain::subject::models::SubjectId;

/// Port for the authentication flow exposed to the HTTP boundary.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Log a subject in by contact, auto-registering unrecognized contacts.
    ///
    /// Every login re-challenges: a fresh one-time code is stored even for
    /// subjects that already exist.
    ///
    /// # Arguments
    /// * `raw_contact` - Email address or regional phone number
    ///
    /// # Returns
    /// Access token, refresh token, and the subject
    ///
    /// # Errors
    /// * `InvalidContact` - Contact is neither a valid email nor phone
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, raw_contact: &str) -> Result<LoginOutcome, AuthError>;

    /// Verify the subject's current one-time code.
    ///
    /// Verification is single-use: success deletes the code.
    ///
    /// # Errors
    /// * `InvalidOrExpiredCode` - Missing, mismatched, or expired code
    /// * `DatabaseError` - Store operation failed
    async fn verify_otp(&self, subject_id: &SubjectId, code: &str) -> Result<(), AuthError>;

    /// Exchange a refresh token for a new access/refresh pair.
    ///
    /// The presented session is rotated away; the returned refresh token is
    /// the only one that will verify afterwards.
    ///
    /// # Errors
    /// * `InvalidOrExpiredToken` - Token fails verification
    /// * `DatabaseError` - Store operation failed
    async fn refresh(&self, raw_token: &str) -> Result<TokenPair, AuthError>;

    /// Revoke the session behind a refresh token.
    ///
    /// The subject id must be supplied explicitly and must own the session,
    /// so a captured token cannot be replayed across subjects.
    ///
    /// # Errors
    /// * `SubjectNotFound` - No such subject
    /// * `SessionNotFound` - Token does not match a live session of the subject
    /// * `DatabaseError` - Store operation failed
    async fn logout(&self, raw_token: &str, subject_id: &SubjectId) -> Result<(), AuthError>;
}

/// Persistence operations for one-time codes.
#[async_trait]
pub trait OneTimeCodeRepository: Send + Sync + 'static {
    /// Store the subject's code, replacing any existing one.
    ///
    /// Must be a single atomic write keyed on the subject id: after the
    /// call exactly one live code exists for the subject, however many
    /// issues race.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn upsert(&self, code: OneTimeCode) -> Result<(), AuthError>;

    /// Retrieve the subject's current code, if any.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<OneTimeCode>, AuthError>;

    /// Delete the subject's code.
    ///
    /// # Returns
    /// True if a row was deleted
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn delete_for_subject(&self, subject_id: &SubjectId) -> Result<bool, AuthError>;
}

/// Persistence operations for refresh sessions.
#[async_trait]
pub trait RefreshSessionRepository: Send + Sync + 'static {
    /// Persist a new session.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, session: RefreshSession) -> Result<(), AuthError>;

    /// Retrieve a session by id, excluding expired rows.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_active(&self, id: &SessionId) -> Result<Option<RefreshSession>, AuthError>;

    /// Delete a session by id.
    ///
    /// # Returns
    /// True if a row was deleted. Rotation relies on this: of two
    /// concurrent rotations of the same session, exactly one sees true.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn delete(&self, id: &SessionId) -> Result<bool, AuthError>;
}

/// Outbound delivery of one-time codes.
///
/// Best-effort: callers log failures and never propagate them into the
/// response path.
#[async_trait]
pub trait NotificationGateway: Send + Sync + 'static {
    /// Send a one-time code to an email address or phone number.
    ///
    /// # Errors
    /// * `DeliveryFailed` - The channel rejected the message
    async fn send_code(
        &self,
        destination: &Contact,
        code: &OtpCode,
    ) -> Result<(), NotificationError>;
}
