use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::create_plafond::PlafondData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::plafond::models::PlafondId;
use crate::domain::plafond::models::UpdatePlafondCommand;
use crate::inbound::http::router::AppState;

/// PUT /plafonds/:plafond_id
pub async fn update_plafond(
    State(state): State<AppState>,
    Path(plafond_id): Path<String>,
    Json(body): Json<UpdatePlafondRequestBody>,
) -> Result<ApiSuccess<PlafondData>, ApiError> {
    let plafond_id = PlafondId::from_string(&plafond_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let command = UpdatePlafondCommand {
        name: body.name,
        description: body.description.map(Some),
        max_amount: body.max_amount,
        interest_rate: body.interest_rate,
        tenor_month: body.tenor_month,
        is_active: body.is_active,
    };

    let plafond = state
        .plafond_service
        .update_plafond(&plafond_id, command)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, PlafondData::from(&plafond)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePlafondRequestBody {
    name: Option<String>,
    description: Option<String>,
    max_amount: Option<Decimal>,
    interest_rate: Option<Decimal>,
    tenor_month: Option<i32>,
    is_active: Option<bool>,
}
