use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::OneTimeCode;
use crate::domain::auth::models::OtpCode;
use crate::domain::auth::ports::OneTimeCodeRepository;
use crate::domain::subject::models::SubjectId;

/// Issues and verifies single-use one-time codes.
///
/// A subject has at most one live code; issuing overwrites, verifying
/// consumes.
pub struct OtpManager<OR>
where
    OR: OneTimeCodeRepository,
{
    repository: Arc<OR>,
    ttl: Duration,
}

impl<OR> OtpManager<OR>
where
    OR: OneTimeCodeRepository,
{
    /// Create a new OTP manager.
    ///
    /// # Arguments
    /// * `repository` - One-time code persistence implementation
    /// * `ttl_minutes` - Minutes until an issued code expires
    pub fn new(repository: Arc<OR>, ttl_minutes: i64) -> Self {
        Self {
            repository,
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issue a fresh code for the subject, replacing any existing one.
    ///
    /// # Returns
    /// The plaintext code, for delivery to the subject's contact channel
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    pub async fn issue(&self, subject_id: &SubjectId) -> Result<OtpCode, AuthError> {
        let code = OtpCode::generate();
        let record = OneTimeCode::new(*subject_id, code.clone(), self.ttl);

        self.repository.upsert(record).await?;
        tracing::info!(subject_id = %subject_id, "One-time code issued");

        Ok(code)
    }

    /// Verify and consume the subject's current code.
    ///
    /// Succeeds only if a code exists, matches exactly, and has not reached
    /// its expiry instant. The record is deleted on success, so a second
    /// verification with the same code fails.
    ///
    /// # Errors
    /// * `InvalidOrExpiredCode` - Missing, mismatched, or expired code
    /// * `DatabaseError` - Store operation failed
    pub async fn verify(&self, subject_id: &SubjectId, code: &str) -> Result<(), AuthError> {
        let record = self
            .repository
            .find_by_subject(subject_id)
            .await?
            .ok_or(AuthError::InvalidOrExpiredCode)?;

        if record.code.as_str() != code || record.is_expired(Utc::now()) {
            return Err(AuthError::InvalidOrExpiredCode);
        }

        self.repository.delete_for_subject(subject_id).await?;
        tracing::info!(subject_id = %subject_id, "One-time code verified");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestOneTimeCodeRepository {}

        #[async_trait]
        impl OneTimeCodeRepository for TestOneTimeCodeRepository {
            async fn upsert(&self, code: OneTimeCode) -> Result<(), AuthError>;
            async fn find_by_subject(&self, subject_id: &SubjectId) -> Result<Option<OneTimeCode>, AuthError>;
            async fn delete_for_subject(&self, subject_id: &SubjectId) -> Result<bool, AuthError>;
        }
    }

    #[tokio::test]
    async fn test_issue_upserts_single_code() {
        let mut repository = MockTestOneTimeCodeRepository::new();

        let subject_id = SubjectId::new();
        repository
            .expect_upsert()
            .withf(move |record| {
                record.subject_id == subject_id && record.code.as_str().len() == 4
            })
            .times(1)
            .returning(|_| Ok(()));

        let manager = OtpManager::new(Arc::new(repository), 10);

        let code = manager.issue(&subject_id).await.unwrap();
        assert_eq!(code.as_str().len(), 4);
    }

    #[tokio::test]
    async fn test_verify_success_consumes_code() {
        let mut repository = MockTestOneTimeCodeRepository::new();

        let subject_id = SubjectId::new();
        let record = OneTimeCode::new(
            subject_id,
            OtpCode::new("0427".to_string()).unwrap(),
            Duration::minutes(10),
        );

        repository
            .expect_find_by_subject()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        repository
            .expect_delete_for_subject()
            .withf(move |id| *id == subject_id)
            .times(1)
            .returning(|_| Ok(true));

        let manager = OtpManager::new(Arc::new(repository), 10);

        assert!(manager.verify(&subject_id, "0427").await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_wrong_code() {
        let mut repository = MockTestOneTimeCodeRepository::new();

        let subject_id = SubjectId::new();
        let record = OneTimeCode::new(
            subject_id,
            OtpCode::new("0427".to_string()).unwrap(),
            Duration::minutes(10),
        );

        repository
            .expect_find_by_subject()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        repository.expect_delete_for_subject().times(0);

        let manager = OtpManager::new(Arc::new(repository), 10);

        let result = manager.verify(&subject_id, "9999").await;
        assert!(matches!(result, Err(AuthError::InvalidOrExpiredCode)));
    }

    #[tokio::test]
    async fn test_verify_expired_code() {
        let mut repository = MockTestOneTimeCodeRepository::new();

        let subject_id = SubjectId::new();
        // negative ttl backdates the expiry
        let record = OneTimeCode::new(
            subject_id,
            OtpCode::new("0427".to_string()).unwrap(),
            Duration::minutes(-1),
        );

        repository
            .expect_find_by_subject()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        repository.expect_delete_for_subject().times(0);

        let manager = OtpManager::new(Arc::new(repository), 10);

        let result = manager.verify(&subject_id, "0427").await;
        assert!(matches!(result, Err(AuthError::InvalidOrExpiredCode)));
    }

    #[tokio::test]
    async fn test_verify_no_code() {
        let mut repository = MockTestOneTimeCodeRepository::new();

        repository
            .expect_find_by_subject()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_delete_for_subject().times(0);

        let manager = OtpManager::new(Arc::new(repository), 10);

        let result = manager.verify(&SubjectId::new(), "0427").await;
        assert!(matches!(result, Err(AuthError::InvalidOrExpiredCode)));
    }
}
