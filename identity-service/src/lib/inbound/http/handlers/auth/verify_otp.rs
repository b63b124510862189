use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::auth::ports::AuthServicePort;
use crate::domain::subject::models::SubjectId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyOtpRequestBody>,
) -> Result<ApiSuccess<VerifyOtpResponseData>, ApiError> {
    if body.code.is_empty() {
        return Err(ApiError::BadRequest("Otp code is required".to_string()));
    }

    let subject_id = SubjectId::from_string(&body.subject_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .auth_service
        .verify_otp(&subject_id, &body.code)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        VerifyOtpResponseData {
            message: "Account verified successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyOtpRequestBody {
    pub subject_id: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyOtpResponseData {
    pub message: String,
}
