use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RefreshSession;
use crate::domain::auth::models::SessionId;
use crate::domain::auth::ports::RefreshSessionRepository;
use crate::domain::subject::models::SubjectId;

pub struct PostgresRefreshSessionRepository {
    pool: PgPool,
}

impl PostgresRefreshSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshSessionRow {
    id: Uuid,
    subject_id: Uuid,
    secret_hash: String,
    issued_to: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<RefreshSessionRow> for RefreshSession {
    fn from(row: RefreshSessionRow) -> Self {
        RefreshSession {
            id: SessionId(row.id),
            subject_id: SubjectId(row.subject_id),
            secret_hash: row.secret_hash,
            issued_to: row.issued_to,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl RefreshSessionRepository for PostgresRefreshSessionRepository {
    async fn create(&self, session: RefreshSession) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_sessions (id, subject_id, secret_hash, issued_to, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.id.0)
        .bind(session.subject_id.0)
        .bind(&session.secret_hash)
        .bind(&session.issued_to)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_active(&self, id: &SessionId) -> Result<Option<RefreshSession>, AuthError> {
        let row = sqlx::query_as::<_, RefreshSessionRow>(
            r#"
            SELECT id, subject_id, secret_hash, issued_to, expires_at, created_at
            FROM refresh_sessions
            WHERE id = $1 AND expires_at > NOW()
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(row.map(RefreshSession::from))
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        // rotation's single-winner guarantee rides on this count
        Ok(result.rows_affected() > 0)
    }
}
