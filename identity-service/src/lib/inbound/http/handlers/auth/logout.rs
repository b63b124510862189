use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::clear_refresh_cookie;
use super::REFRESH_COOKIE;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::subject::models::SubjectId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Revoke the session behind the refresh cookie.
///
/// The subject id in the path must own the session; a token captured from
/// another subject cannot be replayed here.
pub async fn logout(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<LogoutResponseData>), ApiError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::BadRequest("Refresh token is required".to_string()))?;

    let subject_id =
        SubjectId::from_string(&subject_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .auth_service
        .logout(&token, &subject_id)
        .await
        .map_err(ApiError::from)?;

    let jar = jar.remove(clear_refresh_cookie());

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "Logout successful".to_string(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
