use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::SubjectData;
use crate::domain::subject::models::SubjectId;
use crate::domain::subject::ports::SubjectServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_subject(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<ApiSuccess<SubjectData>, ApiError> {
    let subject_id =
        SubjectId::from_string(&subject_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .subject_service
        .get_subject(&subject_id)
        .await
        .map_err(ApiError::from)
        .map(|ref subject| ApiSuccess::new(StatusCode::OK, subject.into()))
}
