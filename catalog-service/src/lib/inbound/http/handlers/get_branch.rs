use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::list_branches::BranchData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::branch::models::BranchId;
use crate::inbound::http::router::AppState;

/// GET /branches/:branch_id
pub async fn get_branch(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
) -> Result<ApiSuccess<BranchData>, ApiError> {
    let branch_id = BranchId::from_string(&branch_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let branch = state.branch_service.get_branch(&branch_id).await?;

    Ok(ApiSuccess::new(StatusCode::OK, BranchData::from(&branch)))
}
