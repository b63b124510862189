use std::sync::Arc;

use auth::AccessTokenIssuer;
use identity_service::config::Config;
use identity_service::domain::auth::otp::OtpManager;
use identity_service::domain::auth::service::AuthService;
use identity_service::domain::auth::session::RefreshSessionManager;
use identity_service::domain::employee::service::EmployeeService;
use identity_service::domain::subject::service::SubjectService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::notifications::LogNotificationGateway;
use identity_service::outbound::repositories::PostgresEmployeeRepository;
use identity_service::outbound::repositories::PostgresOneTimeCodeRepository;
use identity_service::outbound::repositories::PostgresRefreshSessionRepository;
use identity_service::outbound::repositories::PostgresSubjectRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // refuses to start without a signing secret
    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_ttl_hours = config.jwt.access_token_ttl_hours,
        refresh_ttl_days = config.session.refresh_ttl_days,
        otp_ttl_minutes = config.otp.ttl_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let issuer = Arc::new(AccessTokenIssuer::new(
        config.jwt.secret.as_bytes(),
        config.jwt.access_token_ttl_hours,
    ));

    let subject_repository = Arc::new(PostgresSubjectRepository::new(pg_pool.clone()));
    let code_repository = Arc::new(PostgresOneTimeCodeRepository::new(pg_pool.clone()));
    let session_repository = Arc::new(PostgresRefreshSessionRepository::new(pg_pool.clone()));
    let employee_repository = Arc::new(PostgresEmployeeRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&subject_repository),
        OtpManager::new(code_repository, config.otp.ttl_minutes),
        RefreshSessionManager::new(session_repository, config.session.refresh_ttl_days),
        Arc::new(LogNotificationGateway::new()),
        Arc::clone(&issuer),
    ));
    let subject_service = Arc::new(SubjectService::new(Arc::clone(&subject_repository)));
    let employee_service = Arc::new(EmployeeService::new(employee_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        subject_service,
        employee_service,
        issuer,
        config.cookie.secure,
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
