use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::UserId;
use crate::inbound::http::router::AppState;

/// DELETE /users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let user_id =
        UserId::from_string(&user_id).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state.user_service.delete_user(&user_id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, ()))
}
