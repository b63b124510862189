use std::sync::Arc;
use std::time::Duration;

use auth::AccessTokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::login;
use super::handlers::auth::logout;
use super::handlers::auth::refresh_token;
use super::handlers::auth::verify_otp;
use super::handlers::employees::create_employee;
use super::handlers::employees::delete_employee;
use super::handlers::employees::get_employee;
use super::handlers::employees::list_employees;
use super::handlers::employees::update_employee;
use super::handlers::subjects::create_subject;
use super::handlers::subjects::delete_subject;
use super::handlers::subjects::get_subject;
use super::handlers::subjects::list_subjects;
use super::handlers::subjects::update_subject;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::service::AuthService;
use crate::domain::employee::service::EmployeeService;
use crate::domain::subject::service::SubjectService;
use crate::outbound::notifications::LogNotificationGateway;
use crate::outbound::repositories::employee::PostgresEmployeeRepository;
use crate::outbound::repositories::one_time_code::PostgresOneTimeCodeRepository;
use crate::outbound::repositories::refresh_session::PostgresRefreshSessionRepository;
use crate::outbound::repositories::subject::PostgresSubjectRepository;

pub type PostgresAuthService = AuthService<
    PostgresSubjectRepository,
    PostgresOneTimeCodeRepository,
    PostgresRefreshSessionRepository,
    LogNotificationGateway,
>;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<PostgresAuthService>,
    pub subject_service: Arc<SubjectService<PostgresSubjectRepository>>,
    pub employee_service: Arc<EmployeeService<PostgresEmployeeRepository>>,
    pub issuer: Arc<AccessTokenIssuer>,
    pub secure_cookies: bool,
}

pub fn create_router(
    auth_service: Arc<PostgresAuthService>,
    subject_service: Arc<SubjectService<PostgresSubjectRepository>>,
    employee_service: Arc<EmployeeService<PostgresEmployeeRepository>>,
    issuer: Arc<AccessTokenIssuer>,
    secure_cookies: bool,
) -> Router {
    let state = AppState {
        auth_service,
        subject_service,
        employee_service,
        issuer,
        secure_cookies,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify-otp", post(verify_otp))
        .route("/api/auth/refresh-token/:subject_id", post(refresh_token))
        .route("/api/users", post(create_subject));

    let protected_routes = Router::new()
        .route("/api/auth/logout/:subject_id", post(logout))
        .route("/api/users", get(list_subjects))
        .route("/api/users/:subject_id", get(get_subject))
        .route("/api/users/:subject_id", patch(update_subject))
        .route("/api/users/:subject_id", delete(delete_subject))
        .route("/api/employees", post(create_employee))
        .route("/api/employees", get(list_employees))
        .route("/api/employees/:employee_id", get(get_employee))
        .route("/api/employees/:employee_id", put(update_employee))
        .route("/api/employees/:employee_id", delete(delete_employee))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
