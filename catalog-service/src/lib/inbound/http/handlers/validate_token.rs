use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// GET /auth/validate-token?token=
///
/// Read-only check so a client can gate its reset form; never consumes.
pub async fn validate_token(
    State(state): State<AppState>,
    Query(params): Query<ValidateTokenParams>,
) -> Result<Json<ValidateTokenResponseBody>, ApiError> {
    let valid = state
        .auth_service
        .peek_valid(&params.token, Utc::now())
        .await?;

    Ok(Json(ValidateTokenResponseBody { valid }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateTokenParams {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseBody {
    pub valid: bool,
}
