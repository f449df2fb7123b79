use axum::extract::State;
use axum::http::StatusCode;

use super::create_plafond::PlafondData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// GET /plafonds
pub async fn list_plafonds(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PlafondData>>, ApiError> {
    let plafonds = state.plafond_service.list_plafonds().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        plafonds.iter().map(PlafondData::from).collect(),
    ))
}
