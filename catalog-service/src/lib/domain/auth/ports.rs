use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::errors::NotifierError;
use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Principal;
use crate::domain::auth::models::ResetToken;
use crate::domain::auth::models::UserId;

/// Persistence port for principals and their reset tokens.
///
/// Reset tokens are managed through two compound operations rather than
/// bare delete/save so the store, not the caller, carries the atomicity
/// obligations: `replace_reset_token` keeps at most one token per
/// principal, and `consume_reset_token` makes check-and-mark a single
/// conditional write.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, StoreError>;

    /// Persist a new principal together with its role assignments.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` / `EmailAlreadyExists` - uniqueness violated
    async fn create(&self, principal: Principal) -> Result<Principal, StoreError>;

    async fn list_all(&self) -> Result<Vec<Principal>, StoreError>;

    /// # Errors
    /// * `NotFound` - no principal with this id
    async fn delete(&self, id: &UserId) -> Result<(), StoreError>;

    /// Look up a reset token by its opaque string value.
    async fn find_reset_token(&self, token: &str) -> Result<Option<ResetToken>, StoreError>;

    /// The principal's live (unused, unexpired as of `now`) token, if any.
    async fn find_live_token_for_user(
        &self,
        id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<ResetToken>, StoreError>;

    /// Delete any existing token for the owning principal and insert the
    /// new one, as a single atomic unit. Two concurrent calls for the same
    /// principal must never leave two live tokens behind.
    async fn replace_reset_token(&self, token: ResetToken) -> Result<(), StoreError>;

    /// Claim the token and update the owning principal's password hash,
    /// atomically. The claim is conditional on `used = false` and an
    /// unexpired `expiry_date` as of `now`; returns whether this call won
    /// the token. Of N concurrent calls for the same token value, at most
    /// one may see `true`.
    async fn consume_reset_token(
        &self,
        token: &str,
        new_password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError>;
}

/// Out-of-band delivery of a reset token to the account's email.
#[async_trait]
pub trait ResetNotifier: Send + Sync + 'static {
    /// Deliver `token` to `to`. A `SendFailed` here does not undo token
    /// issuance; the caller surfaces it as a request failure.
    async fn send_reset_message(&self, to: &EmailAddress, token: &str)
        -> Result<(), NotifierError>;
}
