use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::refresh_cookie;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::handlers::subjects::SubjectData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Passwordless login by contact.
///
/// An unrecognized contact is auto-registered; the response is identical
/// either way. The refresh token is returned in the body and mirrored into
/// an HTTP-only cookie for the refresh and logout endpoints.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let raw_contact = body
        .email_address
        .filter(|raw| !raw.is_empty())
        .or(body.phone_number.filter(|raw| !raw.is_empty()))
        .ok_or_else(|| ApiError::BadRequest("Email or phone is required".to_string()))?;

    let outcome = state
        .auth_service
        .login(&raw_contact)
        .await
        .map_err(ApiError::from)?;

    let refresh_token = outcome.refresh_token.to_string();
    let jar = jar.add(refresh_cookie(refresh_token.clone(), state.secure_cookies));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                access_token: outcome.access_token,
                refresh_token,
                subject: (&outcome.subject).into(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub subject: SubjectData,
}
