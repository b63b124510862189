use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::refresh_cookie;
use super::REFRESH_COOKIE;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange the refresh cookie for a rotated token pair.
///
/// The presented token is single-use: after this call only the returned
/// token verifies. The cookie is rewritten to match.
pub async fn refresh_token(
    State(state): State<AppState>,
    Path(_subject_id): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<RefreshTokenResponseData>), ApiError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::Unauthorized("No refresh token provided".to_string()))?;

    let pair = state
        .auth_service
        .refresh(&token)
        .await
        .map_err(ApiError::from)?;

    let refresh_token = pair.refresh_token.to_string();
    let jar = jar.add(refresh_cookie(refresh_token.clone(), state.secure_cookies));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            RefreshTokenResponseData {
                access_token: pair.access_token,
                refresh_token,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
}
