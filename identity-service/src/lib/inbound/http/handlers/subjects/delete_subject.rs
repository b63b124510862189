use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::subject::models::SubjectId;
use crate::domain::subject::ports::SubjectServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::subject::errors::SubjectError;

pub async fn delete_subject(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let subject_id = SubjectId::from_string(&subject_id).map_err(SubjectError::from)?;

    state
        .subject_service
        .delete_subject(&subject_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
