use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::SubjectData;
use crate::domain::subject::models::CreateSubjectCommand;
use crate::domain::subject::models::EmailAddress;
use crate::domain::subject::models::PhoneNumber;
use crate::domain::subject::ports::SubjectServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::subject::errors::EmailError;
use crate::subject::errors::PhoneError;

pub async fn create_subject(
    State(state): State<AppState>,
    Json(body): Json<CreateSubjectRequest>,
) -> Result<ApiSuccess<SubjectData>, ApiError> {
    state
        .subject_service
        .create_subject(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref subject| ApiSuccess::new(StatusCode::CREATED, subject.into()))
}

/// HTTP request body for creating a subject (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSubjectRequest {
    display_name: Option<String>,
    email_address: Option<String>,
    phone_number: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateSubjectRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid phone number: {0}")]
    Phone(#[from] PhoneError),
}

impl CreateSubjectRequest {
    fn try_into_command(self) -> Result<CreateSubjectCommand, ParseCreateSubjectRequestError> {
        let email_address = self.email_address.map(EmailAddress::new).transpose()?;
        let phone_number = self.phone_number.map(PhoneNumber::new).transpose()?;
        Ok(CreateSubjectCommand::new(
            self.display_name,
            email_address,
            phone_number,
        ))
    }
}

impl From<ParseCreateSubjectRequestError> for ApiError {
    fn from(err: ParseCreateSubjectRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
