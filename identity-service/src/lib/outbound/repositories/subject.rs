use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::subject::models::Contact;
use crate::domain::subject::models::EmailAddress;
use crate::domain::subject::models::PhoneNumber;
use crate::domain::subject::models::Subject;
use crate::domain::subject::models::SubjectId;
use crate::domain::subject::ports::SubjectRepository;
use crate::subject::errors::SubjectError;

pub struct PostgresSubjectRepository {
    pool: PgPool,
}

impl PostgresSubjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SubjectRow {
    id: Uuid,
    display_name: Option<String>,
    email_address: Option<String>,
    phone_number: Option<String>,
    image_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubjectRow> for Subject {
    type Error = SubjectError;

    fn try_from(row: SubjectRow) -> Result<Self, Self::Error> {
        Ok(Subject {
            id: SubjectId(row.id),
            display_name: row.display_name,
            email_address: row.email_address.map(EmailAddress::new).transpose()?,
            phone_number: row.phone_number.map(PhoneNumber::new).transpose()?,
            image_path: row.image_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SUBJECT_COLUMNS: &str =
    "id, display_name, email_address, phone_number, image_path, created_at, updated_at";

fn map_unique_violation(e: sqlx::Error, subject: &Subject) -> SubjectError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("subjects_email_address_key") {
                return SubjectError::EmailAlreadyExists(
                    subject
                        .email_address
                        .as_ref()
                        .map(|email| email.as_str().to_string())
                        .unwrap_or_default(),
                );
            }
            if db_err.constraint() == Some("subjects_phone_number_key") {
                return SubjectError::PhoneAlreadyExists(
                    subject
                        .phone_number
                        .as_ref()
                        .map(|phone| phone.as_str().to_string())
                        .unwrap_or_default(),
                );
            }
        }
    }
    SubjectError::DatabaseError(e.to_string())
}

#[async_trait]
impl SubjectRepository for PostgresSubjectRepository {
    async fn create(&self, subject: Subject) -> Result<Subject, SubjectError> {
        sqlx::query(
            r#"
            INSERT INTO subjects (id, display_name, email_address, phone_number, image_path, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(subject.id.0)
        .bind(&subject.display_name)
        .bind(subject.email_address.as_ref().map(|email| email.as_str()))
        .bind(subject.phone_number.as_ref().map(|phone| phone.as_str()))
        .bind(&subject.image_path)
        .bind(subject.created_at)
        .bind(subject.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &subject))?;

        Ok(subject)
    }

    async fn find_by_id(&self, id: &SubjectId) -> Result<Option<Subject>, SubjectError> {
        let row = sqlx::query_as::<_, SubjectRow>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SubjectError::DatabaseError(e.to_string()))?;

        row.map(Subject::try_from).transpose()
    }

    async fn find_by_contact(&self, contact: &Contact) -> Result<Option<Subject>, SubjectError> {
        let (column, value) = match contact {
            Contact::Email(email) => ("email_address", email.as_str()),
            Contact::Phone(phone) => ("phone_number", phone.as_str()),
        };

        let row = sqlx::query_as::<_, SubjectRow>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE {column} = $1"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SubjectError::DatabaseError(e.to_string()))?;

        row.map(Subject::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Subject>, SubjectError> {
        let rows = sqlx::query_as::<_, SubjectRow>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| SubjectError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Subject::try_from).collect()
    }

    async fn update(&self, subject: Subject) -> Result<Subject, SubjectError> {
        let result = sqlx::query(
            r#"
            UPDATE subjects
            SET display_name = $2, email_address = $3, phone_number = $4, image_path = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(subject.id.0)
        .bind(&subject.display_name)
        .bind(subject.email_address.as_ref().map(|email| email.as_str()))
        .bind(subject.phone_number.as_ref().map(|phone| phone.as_str()))
        .bind(&subject.image_path)
        .bind(subject.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &subject))?;

        if result.rows_affected() == 0 {
            return Err(SubjectError::NotFound(subject.id.to_string()));
        }

        Ok(subject)
    }

    async fn delete(&self, id: &SubjectId) -> Result<(), SubjectError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| SubjectError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(SubjectError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
