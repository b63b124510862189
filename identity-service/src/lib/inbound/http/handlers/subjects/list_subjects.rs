use axum::extract::State;
use axum::http::StatusCode;

use super::SubjectData;
use crate::domain::subject::ports::SubjectServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_subjects(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<SubjectData>>, ApiError> {
    state
        .subject_service
        .list_subjects()
        .await
        .map_err(ApiError::from)
        .map(|subjects| {
            ApiSuccess::new(
                StatusCode::OK,
                subjects.iter().map(SubjectData::from).collect(),
            )
        })
}
