use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::OneTimeCode;
use crate::domain::auth::models::OtpCode;
use crate::domain::auth::ports::OneTimeCodeRepository;
use crate::domain::subject::models::SubjectId;

pub struct PostgresOneTimeCodeRepository {
    pool: PgPool,
}

impl PostgresOneTimeCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OneTimeCodeRow {
    subject_id: Uuid,
    code: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OneTimeCodeRow> for OneTimeCode {
    type Error = AuthError;

    fn try_from(row: OneTimeCodeRow) -> Result<Self, Self::Error> {
        Ok(OneTimeCode {
            subject_id: SubjectId(row.subject_id),
            code: OtpCode::new(row.code)?,
            expires_at: row.expires_at,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl OneTimeCodeRepository for PostgresOneTimeCodeRepository {
    async fn upsert(&self, code: OneTimeCode) -> Result<(), AuthError> {
        // subject_id is the primary key, so this is the atomic
        // one-live-code-per-subject write
        sqlx::query(
            r#"
            INSERT INTO one_time_codes (subject_id, code, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (subject_id)
            DO UPDATE SET code = EXCLUDED.code,
                          expires_at = EXCLUDED.expires_at,
                          created_at = EXCLUDED.created_at
            "#,
        )
        .bind(code.subject_id.0)
        .bind(code.code.as_str())
        .bind(code.expires_at)
        .bind(code.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<OneTimeCode>, AuthError> {
        let row = sqlx::query_as::<_, OneTimeCodeRow>(
            "SELECT subject_id, code, expires_at, created_at FROM one_time_codes WHERE subject_id = $1",
        )
        .bind(subject_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.map(OneTimeCode::try_from).transpose()
    }

    async fn delete_for_subject(&self, subject_id: &SubjectId) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM one_time_codes WHERE subject_id = $1")
            .bind(subject_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
