use std::sync::Arc;

use auth::SecretHasher;
use chrono::Duration;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RefreshSession;
use crate::domain::auth::models::RefreshToken;
use crate::domain::auth::ports::RefreshSessionRepository;
use crate::domain::subject::models::SubjectId;

/// Issues, verifies, rotates, and revokes refresh sessions.
///
/// Sessions store only the salted hash of their token secret. The token a
/// client holds is `<session id>.<secret>`: verification is a point lookup
/// on the id followed by one constant-time hash check, never a scan over
/// other subjects' sessions.
pub struct RefreshSessionManager<RR>
where
    RR: RefreshSessionRepository,
{
    repository: Arc<RR>,
    hasher: SecretHasher,
    ttl: Duration,
}

impl<RR> RefreshSessionManager<RR>
where
    RR: RefreshSessionRepository,
{
    /// Create a new refresh session manager.
    ///
    /// # Arguments
    /// * `repository` - Session persistence implementation
    /// * `ttl_days` - Days until an issued session expires
    pub fn new(repository: Arc<RR>, ttl_days: i64) -> Self {
        Self {
            repository,
            hasher: SecretHasher::new(),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issue a new session for a subject.
    ///
    /// # Arguments
    /// * `subject_id` - Owning subject
    /// * `issued_to` - Label for the contact used at issuance
    ///
    /// # Returns
    /// The plaintext refresh token. This is the only time it exists outside
    /// the client; the store keeps the hash.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    pub async fn issue(
        &self,
        subject_id: &SubjectId,
        issued_to: &str,
    ) -> Result<RefreshToken, AuthError> {
        let secret = auth::generate_secret();
        let secret_hash = self.hasher.hash(&secret)?;

        let session = RefreshSession::new(*subject_id, secret_hash, issued_to, self.ttl);
        let session_id = session.id;

        self.repository.create(session).await?;
        tracing::info!(
            subject_id = %subject_id,
            session_id = %session_id,
            "Refresh session created"
        );

        Ok(RefreshToken { session_id, secret })
    }

    /// Verify a presented token against its live session.
    ///
    /// # Errors
    /// * `InvalidOrExpiredToken` - No unexpired session with that id, or the
    ///   secret does not match its hash
    /// * `DatabaseError` - Store operation failed
    pub async fn verify(&self, token: &RefreshToken) -> Result<RefreshSession, AuthError> {
        let session = self
            .repository
            .find_active(&token.session_id)
            .await?
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        if !self.hasher.verify(&token.secret, &session.secret_hash)? {
            return Err(AuthError::InvalidOrExpiredToken);
        }

        Ok(session)
    }

    /// Verify a presented token, scoped to a specific subject.
    ///
    /// Used by logout: the session must exist, belong to the claimed
    /// subject, and match the secret. Any miss is reported as not found
    /// rather than an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    pub async fn find_for_subject(
        &self,
        token: &RefreshToken,
        subject_id: &SubjectId,
    ) -> Result<Option<RefreshSession>, AuthError> {
        let Some(session) = self.repository.find_active(&token.session_id).await? else {
            return Ok(None);
        };

        if session.subject_id != *subject_id {
            return Ok(None);
        }

        if !self.hasher.verify(&token.secret, &session.secret_hash)? {
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Replace a verified session with a fresh one.
    ///
    /// The old row is deleted first with a delete-count check, so of two
    /// concurrent rotations presenting the same token exactly one wins;
    /// the loser sees `InvalidOrExpiredToken`. A stolen token therefore has
    /// a single-use window.
    ///
    /// # Errors
    /// * `InvalidOrExpiredToken` - The session was already rotated or revoked
    /// * `DatabaseError` - Store operation failed
    pub async fn rotate(&self, session: &RefreshSession) -> Result<RefreshToken, AuthError> {
        if !self.repository.delete(&session.id).await? {
            return Err(AuthError::InvalidOrExpiredToken);
        }

        tracing::info!(
            subject_id = %session.subject_id,
            session_id = %session.id,
            "Refresh session rotated"
        );

        self.issue(&session.subject_id, &session.issued_to).await
    }

    /// Delete a session outright.
    ///
    /// # Errors
    /// * `SessionNotFound` - The session no longer exists
    /// * `DatabaseError` - Store operation failed
    pub async fn revoke(&self, session: &RefreshSession) -> Result<(), AuthError> {
        if !self.repository.delete(&session.id).await? {
            return Err(AuthError::SessionNotFound);
        }

        tracing::info!(
            subject_id = %session.subject_id,
            session_id = %session.id,
            "Refresh session revoked"
        );

        Ok(())
    }
}
