use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::subject::models::Subject;

pub mod create_subject;
pub mod delete_subject;
pub mod get_subject;
pub mod list_subjects;
pub mod update_subject;

pub use create_subject::create_subject;
pub use delete_subject::delete_subject;
pub use get_subject::get_subject;
pub use list_subjects::list_subjects;
pub use update_subject::update_subject;

/// Wire representation of a subject, shared by the subject and auth
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectData {
    pub id: String,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Subject> for SubjectData {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id.to_string(),
            display_name: subject.display_name.clone(),
            email_address: subject
                .email_address
                .as_ref()
                .map(|email| email.as_str().to_string()),
            phone_number: subject
                .phone_number
                .as_ref()
                .map(|phone| phone.as_str().to_string()),
            image_path: subject.image_path.clone(),
            created_at: subject.created_at,
            updated_at: subject.updated_at,
        }
    }
}
