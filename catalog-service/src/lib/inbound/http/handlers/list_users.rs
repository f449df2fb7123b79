use axum::extract::State;
use axum::http::StatusCode;

use super::create_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let users = state.user_service.list_users().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        users.iter().map(UserData::from).collect(),
    ))
}
