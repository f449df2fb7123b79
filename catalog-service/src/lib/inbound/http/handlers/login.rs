use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::auth::models::AuthenticatedSession;
use crate::inbound::http::router::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Json<LoginResponseBody>, ApiError> {
    let session = state
        .auth_service
        .login(&body.username, &body.password, Utc::now())
        .await?;

    Ok(Json(LoginResponseBody::from(session)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseBody {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

impl From<AuthenticatedSession> for LoginResponseBody {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            token: session.token,
            token_type: session.token_type.to_string(),
            username: session.username,
            email: session.email,
            roles: session.roles,
            expires_in: session.expires_in,
        }
    }
}
