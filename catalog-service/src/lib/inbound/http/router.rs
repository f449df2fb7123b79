use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_plafond::create_plafond;
use super::handlers::create_user::create_user;
use super::handlers::delete_plafond::delete_plafond;
use super::handlers::delete_user::delete_user;
use super::handlers::forgot_password::forgot_password;
use super::handlers::get_branch::get_branch;
use super::handlers::get_plafond::get_plafond;
use super::handlers::list_branches::list_branches;
use super::handlers::list_plafonds::list_plafonds;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::reset_password::reset_password;
use super::handlers::update_plafond::update_plafond;
use super::handlers::validate_token::validate_token;
use super::middleware::authenticate;
use super::middleware::authorize;
use super::policy::RoutePolicy;
use crate::domain::auth::service::AuthService;
use crate::domain::branch::service::BranchService;
use crate::domain::plafond::service::PlafondService;
use crate::domain::user::service::UserAdminService;
use crate::outbound::notifier::MailApiNotifier;
use crate::outbound::repositories::branch::PostgresBranchRepository;
use crate::outbound::repositories::credential::PostgresCredentialStore;
use crate::outbound::repositories::plafond::PostgresPlafondRepository;

/// Application state shared by handlers and middleware.
///
/// Everything here is immutable after startup; mutable state lives behind
/// the store ports.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PostgresCredentialStore, MailApiNotifier>>,
    pub user_service: Arc<UserAdminService<PostgresCredentialStore>>,
    pub plafond_service: Arc<PlafondService<PostgresPlafondRepository>>,
    pub branch_service: Arc<BranchService<PostgresBranchRepository>>,
    pub policy: Arc<RoutePolicy>,
}

pub fn create_router(
    auth_service: Arc<AuthService<PostgresCredentialStore, MailApiNotifier>>,
    user_service: Arc<UserAdminService<PostgresCredentialStore>>,
    plafond_service: Arc<PlafondService<PostgresPlafondRepository>>,
    branch_service: Arc<BranchService<PostgresBranchRepository>>,
    policy: Arc<RoutePolicy>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        plafond_service,
        branch_service,
        policy,
    };

    let auth_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/validate-token", get(validate_token));

    let catalog_routes = Router::new()
        .route("/plafonds", get(list_plafonds).post(create_plafond))
        .route(
            "/plafonds/:plafond_id",
            get(get_plafond).put(update_plafond).delete(delete_plafond),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/:user_id", delete(delete_user))
        .route("/branches", get(list_branches))
        .route("/branches/:branch_id", get(get_branch));

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

    // Layer order: authentication resolves the bearer token into an
    // AuthContext, then authorization evaluates the route policy against
    // it. The gate itself never rejects.
    Router::new()
        .merge(auth_routes)
        .merge(catalog_routes)
        .layer(middleware::from_fn_with_state(state.clone(), authorize))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
