use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::EmployeeData;
use crate::domain::employee::errors::EmployeeError;
use crate::domain::employee::models::CreateEmployeeCommand;
use crate::domain::employee::ports::EmployeeServicePort;
use crate::domain::subject::models::EmailAddress;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedSubject;
use crate::inbound::http::router::AppState;

pub async fn create_employee(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedSubject>,
    Json(body): Json<CreateEmployeeRequest>,
) -> Result<ApiSuccess<EmployeeData>, ApiError> {
    if body.name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let email = EmailAddress::new(body.email).map_err(EmployeeError::from)?;

    let command = CreateEmployeeCommand::new(body.name, email, authenticated.subject_id);

    state
        .employee_service
        .create_employee(command)
        .await
        .map_err(ApiError::from)
        .map(|ref employee| ApiSuccess::new(StatusCode::CREATED, employee.into()))
}

/// HTTP request body for creating an employee (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub email: String,
}
