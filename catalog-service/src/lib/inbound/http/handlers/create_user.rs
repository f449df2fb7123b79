use std::collections::HashSet;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Principal;
use crate::domain::auth::models::Role;
use crate::domain::auth::models::Username;
use crate::domain::user::models::CreateUserCommand;
use crate::inbound::http::router::AppState;

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let username = Username::new(body.username)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
    let email =
        EmailAddress::new(body.email).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
    let roles = body
        .roles
        .iter()
        .map(|name| name.parse::<Role>())
        .collect::<Result<HashSet<Role>, _>>()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let command = CreateUserCommand::new(username, email, body.password, roles);

    let user = state.user_service.create_user(command).await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, UserData::from(&user)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequestBody {
    username: String,
    email: String,
    password: String,
    roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub active: bool,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for UserData {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.to_string(),
            username: principal.username.to_string(),
            email: principal.email.to_string(),
            active: principal.active,
            roles: principal.role_names(),
            created_at: principal.created_at,
        }
    }
}
