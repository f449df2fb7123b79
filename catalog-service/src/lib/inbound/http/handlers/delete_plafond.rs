use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::plafond::models::PlafondId;
use crate::inbound::http::router::AppState;

/// DELETE /plafonds/:plafond_id (soft delete)
pub async fn delete_plafond(
    State(state): State<AppState>,
    Path(plafond_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let plafond_id = PlafondId::from_string(&plafond_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state.plafond_service.delete_plafond(&plafond_id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, ()))
}
