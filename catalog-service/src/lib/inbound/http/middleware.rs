use std::collections::HashSet;

use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::Utc;

use crate::domain::auth::models::Principal;
use crate::domain::auth::models::Role;
use crate::domain::auth::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::policy::Decision;
use crate::inbound::http::policy::DenyReason;
use crate::inbound::http::router::AppState;

/// Outcome of the authentication gate, attached to every request's
/// extensions for the rest of the pipeline.
///
/// The gate never rejects a request: a missing, malformed, expired, or
/// unresolvable bearer token all forward the request without a principal,
/// and the authorization middleware decides whether that matters for the
/// route. Public endpoints thereby keep working for callers holding a
/// stale token.
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// No bearer-scheme credential was presented.
    NoCredential,
    /// A bearer credential was presented but did not resolve to a live
    /// principal. Authorization treats this exactly like `NoCredential`.
    InvalidCredential,
    Authenticated(CurrentUser),
}

/// The authenticated principal's request-scoped view.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub roles: HashSet<Role>,
}

impl From<&Principal> for CurrentUser {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            username: principal.username.to_string(),
            roles: principal.roles.clone(),
        }
    }
}

/// Authentication gate: turn a bearer token into an [`AuthContext`].
///
/// Runs once per request; shares nothing mutable across requests beyond
/// the immutable codec state and the credential store handle.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let context = match bearer_token(req.headers()) {
        None => AuthContext::NoCredential,
        Some(token) => match state.auth_service.authenticate_bearer(token, Utc::now()).await {
            Ok(principal) => AuthContext::Authenticated(CurrentUser::from(&principal)),
            Err(e) => {
                tracing::debug!(error = %e, "bearer credential rejected, continuing unauthenticated");
                AuthContext::InvalidCredential
            }
        },
    };

    req.extensions_mut().insert(context);
    next.run(req).await
}

/// Authorization middleware: evaluate the route policy against the gate's
/// outcome. Denials carry no detail beyond their status code.
pub async fn authorize(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .unwrap_or(AuthContext::NoCredential);

    match state.policy.decide(req.uri().path(), req.method(), &context) {
        Decision::Allow => next.run(req).await,
        Decision::Deny(DenyReason::Unauthenticated) => {
            ApiError::Unauthorized("Authentication required".to_string()).into_response()
        }
        Decision::Deny(DenyReason::Forbidden) => {
            ApiError::Forbidden("Forbidden".to_string()).into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
