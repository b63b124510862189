use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::subject::models::SubjectId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated subject in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    pub subject_id: SubjectId,
}

/// Middleware that validates bearer access tokens.
///
/// Missing credentials and expired tokens are 401 (the client can obtain a
/// fresh token); malformed or forged tokens are 403.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    let subject_id = state.issuer.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        let status = match e {
            JwtError::TokenExpired => StatusCode::UNAUTHORIZED,
            _ => StatusCode::FORBIDDEN,
        };
        (
            status,
            Json(json!({
                "error": "Invalid or expired token"
            })),
        )
            .into_response()
    })?;

    let subject_id = SubjectId::from_string(&subject_id).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse subject ID from token");
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Invalid token format"
            })),
        )
            .into_response()
    })?;

    // Add authenticated subject info to request extensions
    req.extensions_mut()
        .insert(AuthenticatedSubject { subject_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Missing Authorization header"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header"
            })),
        )
            .into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header format. Expected: Bearer <token>"
            })),
        )
            .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
