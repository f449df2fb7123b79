use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::auth::errors::AuthError;
use crate::inbound::http::router::AppState;

/// POST /auth/reset-password
///
/// Absent, used, and expired tokens all answer the same generic message.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Result<(StatusCode, Json<ResetPasswordResponseBody>), ApiError> {
    match state
        .auth_service
        .reset_password(&body.token, &body.new_password, Utc::now())
        .await
    {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(ResetPasswordResponseBody {
                success: true,
                message: "Password has been reset successfully.".to_string(),
            }),
        )),
        Err(AuthError::ResetTokenInvalid) => Ok((
            StatusCode::BAD_REQUEST,
            Json(ResetPasswordResponseBody {
                success: false,
                message: "Invalid or expired token.".to_string(),
            }),
        )),
        Err(e) => Err(ApiError::from(e)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequestBody {
    token: String,
    #[serde(rename = "newPassword")]
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordResponseBody {
    pub success: bool,
    pub message: String,
}
