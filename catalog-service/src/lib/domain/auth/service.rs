use std::sync::Arc;

use auth::AuthenticationError;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::auth::models::Principal;
use crate::domain::auth::models::ResetToken;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::auth::ports::ResetNotifier;

/// Reset tokens: 32 alphanumeric characters, upper-cased for presentation
/// in the reset email.
const RESET_TOKEN_LEN: usize = 32;

/// Credential authentication and the reset-token lifecycle.
///
/// Stateless across requests: all shared mutable state lives behind the
/// store port, and every time-sensitive operation takes `now` explicitly.
pub struct AuthService<S, N>
where
    S: CredentialStore,
    N: ResetNotifier,
{
    store: Arc<S>,
    notifier: Arc<N>,
    authenticator: Arc<Authenticator>,
    reset_window: Duration,
}

impl<S, N> AuthService<S, N>
where
    S: CredentialStore,
    N: ResetNotifier,
{
    pub fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        authenticator: Arc<Authenticator>,
        reset_window: Duration,
    ) -> Self {
        Self {
            store,
            notifier,
            authenticator,
            reset_window,
        }
    }

    /// Verify a username/password pair and issue a bearer token.
    ///
    /// Unknown username, inactive account, and wrong password all collapse
    /// into the same `BadCredentials` so the response never reveals whether
    /// the username exists.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedSession, AuthError> {
        let principal = match self.store.find_by_username(username).await? {
            Some(principal) if principal.active => principal,
            _ => {
                tracing::warn!(username, "login rejected");
                return Err(AuthError::BadCredentials);
            }
        };

        let issued = self
            .authenticator
            .authenticate(
                password,
                &principal.password_hash,
                principal.username.as_str(),
                now,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(username, "login rejected");
                    AuthError::BadCredentials
                }
                AuthenticationError::Password(e) => AuthError::Password(e),
                AuthenticationError::Token(e) => AuthError::Token(e),
            })?;

        tracing::info!(username = %principal.username, "login successful");

        Ok(AuthenticatedSession::new(
            &principal,
            issued.token,
            issued.expires_in,
        ))
    }

    /// Turn a presented bearer token into a live principal.
    ///
    /// Used by the authentication gate; any failure here is reported to the
    /// gate, which treats the request as anonymous rather than rejecting it.
    pub async fn authenticate_bearer(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthError> {
        let claims = self.authenticator.codec().verify(token, now)?;

        match self.store.find_by_username(claims.subject()).await? {
            Some(principal) if principal.active => Ok(principal),
            _ => Err(AuthError::BadCredentials),
        }
    }

    /// Handle a forgot-password request for `email`.
    ///
    /// Enumeration-safe: an unknown email is reported as success to the
    /// caller and leaves no trace in the store or the notifier. For a known
    /// email, any prior token for the principal is replaced atomically and
    /// the new token is delivered out-of-band.
    pub async fn request_reset(&self, email: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        let Some(principal) = self.store.find_by_email(email).await? else {
            tracing::warn!("password reset requested for unknown email");
            return Ok(());
        };

        if let Some(prior) = self
            .store
            .find_live_token_for_user(&principal.id, now)
            .await?
        {
            tracing::debug!(
                username = %principal.username,
                expires_at = %prior.expiry_date,
                "superseding live reset token"
            );
        }

        let token = generate_reset_token();
        let reset = ResetToken::issue(principal.id, token.clone(), now, self.reset_window);
        self.store.replace_reset_token(reset).await?;

        tracing::info!(username = %principal.username, "password reset token issued");

        // Token issuance stands even if delivery fails; the error is
        // surfaced so the caller sees the request did not complete.
        self.notifier
            .send_reset_message(&principal.email, &token)
            .await?;

        Ok(())
    }

    /// Consume a reset token and set a new password.
    ///
    /// Absent, already-used, and expired tokens are indistinguishable to
    /// the caller. The claim-and-update runs as one conditional store
    /// operation, so of N concurrent calls for the same token at most one
    /// succeeds; the rest observe `ResetTokenInvalid`.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        let Some(reset) = self.store.find_reset_token(token).await? else {
            tracing::warn!("reset attempted with unknown token");
            return Err(AuthError::ResetTokenInvalid);
        };

        if !reset.is_valid(now) {
            tracing::warn!("reset attempted with used or expired token");
            return Err(AuthError::ResetTokenInvalid);
        }

        let password_hash = self.authenticator.hash_password(new_password)?;

        if !self
            .store
            .consume_reset_token(token, &password_hash, now)
            .await?
        {
            // Lost a race against a concurrent consume of the same token.
            return Err(AuthError::ResetTokenInvalid);
        }

        tracing::info!("password reset successful");
        Ok(())
    }

    /// Read-only validity check; never marks the token used.
    pub async fn peek_valid(&self, token: &str, now: DateTime<Utc>) -> Result<bool, AuthError> {
        Ok(self
            .store
            .find_reset_token(token)
            .await?
            .map_or(false, |t| t.is_valid(now)))
    }
}

fn generate_reset_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}
