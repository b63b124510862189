use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::SubjectData;
use crate::domain::subject::models::EmailAddress;
use crate::domain::subject::models::PhoneNumber;
use crate::domain::subject::models::SubjectId;
use crate::domain::subject::models::UpdateSubjectCommand;
use crate::domain::subject::ports::SubjectServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::subject::errors::SubjectError;

/// HTTP request body for updating a subject (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateSubjectRequest {
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub image_path: Option<String>,
}

impl UpdateSubjectRequest {
    fn try_into_command(self) -> Result<UpdateSubjectCommand, SubjectError> {
        // Validation happens here - errors are automatically converted via #[from]
        let email_address = self.email_address.map(EmailAddress::new).transpose()?;
        let phone_number = self.phone_number.map(PhoneNumber::new).transpose()?;

        Ok(UpdateSubjectCommand {
            display_name: self.display_name,
            email_address,
            phone_number,
            image_path: self.image_path,
        })
    }
}

pub async fn update_subject(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    Json(body): Json<UpdateSubjectRequest>,
) -> Result<ApiSuccess<SubjectData>, ApiError> {
    let subject_id = SubjectId::from_string(&subject_id).map_err(SubjectError::from)?;
    let command = body.try_into_command()?;

    state
        .subject_service
        .update_subject(&subject_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref subject| ApiSuccess::new(StatusCode::OK, subject.into()))
}
