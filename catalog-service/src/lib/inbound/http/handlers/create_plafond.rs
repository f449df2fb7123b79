use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::plafond::models::CreatePlafondCommand;
use crate::domain::plafond::models::Plafond;
use crate::inbound::http::router::AppState;

/// POST /plafonds
pub async fn create_plafond(
    State(state): State<AppState>,
    Json(body): Json<CreatePlafondRequestBody>,
) -> Result<ApiSuccess<PlafondData>, ApiError> {
    let command = CreatePlafondCommand {
        name: body.name,
        description: body.description,
        max_amount: body.max_amount,
        interest_rate: body.interest_rate,
        tenor_month: body.tenor_month,
    };

    let plafond = state.plafond_service.create_plafond(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        PlafondData::from(&plafond),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePlafondRequestBody {
    name: String,
    description: Option<String>,
    max_amount: Decimal,
    interest_rate: Decimal,
    tenor_month: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlafondData {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub max_amount: Decimal,
    pub interest_rate: Decimal,
    pub tenor_month: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Plafond> for PlafondData {
    fn from(plafond: &Plafond) -> Self {
        Self {
            id: plafond.id.to_string(),
            name: plafond.name.clone(),
            description: plafond.description.clone(),
            max_amount: plafond.max_amount,
            interest_rate: plafond.interest_rate,
            tenor_month: plafond.tenor_month,
            is_active: plafond.is_active,
            created_at: plafond.created_at,
        }
    }
}
