use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// POST /auth/forgot-password
///
/// Always answers success for a well-formed request, whether or not the
/// email is known; only an internal failure (store, mail delivery) breaks
/// that, and then without revealing whether the account exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequestBody>,
) -> Result<Json<ForgotPasswordResponseBody>, ApiError> {
    state
        .auth_service
        .request_reset(&body.email, Utc::now())
        .await?;

    Ok(Json(ForgotPasswordResponseBody {
        success: true,
        message: "If the email exists, a password reset link has been sent.".to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequestBody {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordResponseBody {
    pub success: bool,
    pub message: String,
}
