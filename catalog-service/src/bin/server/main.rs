use std::sync::Arc;

use auth::Authenticator;
use catalog_service::config::Config;
use catalog_service::domain::auth::service::AuthService;
use catalog_service::domain::branch::service::BranchService;
use catalog_service::domain::plafond::service::PlafondService;
use catalog_service::domain::user::service::UserAdminService;
use catalog_service::inbound::http::policy::RoutePolicy;
use catalog_service::inbound::http::router::create_router;
use catalog_service::outbound::notifier::MailApiNotifier;
use catalog_service::outbound::repositories::PostgresBranchRepository;
use catalog_service::outbound::repositories::PostgresCredentialStore;
use catalog_service::outbound::repositories::PostgresPlafondRepository;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        reset_token_expiry_minutes = config.password_reset.token_expiry_minutes,
        mailer_api = %config.mailer.api_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(max_connections = 5, "Database connection pool created");

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!("Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    ));
    let reset_window = Duration::minutes(config.password_reset.token_expiry_minutes);

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
    let notifier = Arc::new(MailApiNotifier::new(&config.mailer, reset_window));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&credential_store),
        notifier,
        Arc::clone(&authenticator),
        reset_window,
    ));
    let user_service = Arc::new(UserAdminService::new(Arc::clone(&credential_store)));
    let plafond_service = Arc::new(PlafondService::new(Arc::new(
        PostgresPlafondRepository::new(pg_pool.clone()),
    )));
    let branch_service = Arc::new(BranchService::new(Arc::new(PostgresBranchRepository::new(
        pg_pool,
    ))));
    let policy = Arc::new(RoutePolicy::catalog_defaults());

    let application = create_router(
        auth_service,
        user_service,
        plafond_service,
        branch_service,
        policy,
    );

    let address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Http server listening");

    axum::serve(listener, application).await?;

    Ok(())
}
