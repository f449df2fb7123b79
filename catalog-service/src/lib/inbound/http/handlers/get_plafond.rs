use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_plafond::PlafondData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::plafond::models::PlafondId;
use crate::inbound::http::router::AppState;

/// GET /plafonds/:plafond_id
pub async fn get_plafond(
    State(state): State<AppState>,
    Path(plafond_id): Path<String>,
) -> Result<ApiSuccess<PlafondData>, ApiError> {
    let plafond_id = PlafondId::from_string(&plafond_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let plafond = state.plafond_service.get_plafond(&plafond_id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, PlafondData::from(&plafond)))
}
