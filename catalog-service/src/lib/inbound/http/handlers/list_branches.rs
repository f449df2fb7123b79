use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::branch::models::Branch;
use crate::inbound::http::router::AppState;

/// GET /branches
pub async fn list_branches(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<BranchData>>, ApiError> {
    let branches = state.branch_service.list_branches().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        branches.iter().map(BranchData::from).collect(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchData {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl From<&Branch> for BranchData {
    fn from(branch: &Branch) -> Self {
        Self {
            id: branch.id.to_string(),
            name: branch.name.clone(),
            address: branch.address.clone(),
            city: branch.city.clone(),
        }
    }
}
