use async_trait::async_trait;
use chrono::Duration;
use serde_json::json;

use crate::config::MailerConfig;
use crate::domain::auth::errors::NotifierError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::ports::ResetNotifier;

/// Delivers reset tokens through the transactional mail HTTP API.
///
/// The service treats delivery as fire-and-forget per request: a failure
/// here surfaces to the caller but never rolls back token issuance.
pub struct MailApiNotifier {
    client: reqwest::Client,
    api_url: String,
    from: String,
    reset_window_minutes: i64,
}

impl MailApiNotifier {
    pub fn new(config: &MailerConfig, reset_window: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            from: config.from.clone(),
            reset_window_minutes: reset_window.num_minutes(),
        }
    }
}

#[async_trait]
impl ResetNotifier for MailApiNotifier {
    async fn send_reset_message(
        &self,
        to: &EmailAddress,
        token: &str,
    ) -> Result<(), NotifierError> {
        let message = json!({
            "from": self.from,
            "to": to.as_str(),
            "subject": "Password reset request",
            "text": format!(
                "We received a request to reset the password for your account.\n\n\
                 Use this token to reset your password: {token}\n\n\
                 The token expires in {} minutes. If you did not request a reset, \
                 you can ignore this message.",
                self.reset_window_minutes
            ),
        });

        let response = self
            .client
            .post(format!("{}/messages", self.api_url))
            .json(&message)
            .send()
            .await
            .map_err(|e| NotifierError::SendFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifierError::SendFailed(format!(
                "mail api returned {}",
                response.status()
            )));
        }

        tracing::info!(to = %to, "password reset email dispatched");
        Ok(())
    }
}
