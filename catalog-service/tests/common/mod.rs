use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use catalog_service::domain::auth::errors::NotifierError;
use catalog_service::domain::auth::errors::StoreError;
use catalog_service::domain::auth::models::EmailAddress;
use catalog_service::domain::auth::models::Principal;
use catalog_service::domain::auth::models::ResetToken;
use catalog_service::domain::auth::models::Role;
use catalog_service::domain::auth::models::UserId;
use catalog_service::domain::auth::models::Username;
use catalog_service::domain::auth::ports::CredentialStore;
use catalog_service::domain::auth::ports::ResetNotifier;
use catalog_service::domain::auth::service::AuthService;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

/// Credential store over a single mutex, giving the same atomicity the
/// Postgres adapter gets from transactions and conditional updates.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, Principal>,
    tokens: HashMap<String, ResetToken>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, principal: Principal) {
        let mut inner = self.inner.lock().unwrap();
        inner.users.insert(principal.id.0, principal);
    }

    pub fn token_count(&self) -> usize {
        self.inner.lock().unwrap().tokens.len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|p| p.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|p| p.email.as_str() == email)
            .cloned())
    }

    async fn create(&self, principal: Principal) -> Result<Principal, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .users
            .values()
            .any(|p| p.username.as_str() == principal.username.as_str())
        {
            return Err(StoreError::UsernameAlreadyExists(
                principal.username.to_string(),
            ));
        }
        if inner
            .users
            .values()
            .any(|p| p.email.as_str() == principal.email.as_str())
        {
            return Err(StoreError::EmailAlreadyExists(principal.email.to_string()));
        }
        inner.users.insert(principal.id.0, principal.clone());
        Ok(principal)
    }

    async fn list_all(&self) -> Result<Vec<Principal>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.values().cloned().collect())
    }

    async fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .users
            .remove(&id.0)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id.to_string()))
    }

    async fn find_reset_token(&self, token: &str) -> Result<Option<ResetToken>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.tokens.get(token).cloned())
    }

    async fn find_live_token_for_user(
        &self,
        id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<ResetToken>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tokens
            .values()
            .find(|t| t.user_id == *id && t.is_valid(now))
            .cloned())
    }

    async fn replace_reset_token(&self, token: ResetToken) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.tokens.retain(|_, t| t.user_id != token.user_id);
        inner.tokens.insert(token.token.clone(), token);
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        new_password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        // Check-and-mark and the password write all happen under the one
        // lock; this is the in-memory equivalent of the conditional UPDATE.
        let mut inner = self.inner.lock().unwrap();
        let Inner { users, tokens } = &mut *inner;

        let Some(reset) = tokens.get_mut(token) else {
            return Ok(false);
        };
        if reset.used || now >= reset.expiry_date {
            return Ok(false);
        }
        reset.used = true;

        if let Some(user) = users.get_mut(&reset.user_id.0) {
            user.password_hash = new_password_hash.to_string();
        }

        Ok(true)
    }
}

/// Notifier that records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_token(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl ResetNotifier for RecordingNotifier {
    async fn send_reset_message(
        &self,
        to: &EmailAddress,
        token: &str,
    ) -> Result<(), NotifierError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), token.to_string()));
        Ok(())
    }
}

pub fn test_authenticator() -> Arc<Authenticator> {
    Arc::new(Authenticator::new(
        b"test_secret_key_of_at_least_32_bytes!",
        Duration::hours(24),
    ))
}

pub fn auth_service(
    store: Arc<InMemoryCredentialStore>,
    notifier: Arc<RecordingNotifier>,
    authenticator: Arc<Authenticator>,
) -> AuthService<InMemoryCredentialStore, RecordingNotifier> {
    AuthService::new(store, notifier, authenticator, Duration::minutes(30))
}

pub fn seed_user(
    store: &InMemoryCredentialStore,
    authenticator: &Authenticator,
    username: &str,
    email: &str,
    password: &str,
    roles: &[Role],
) -> Principal {
    let principal = Principal {
        id: UserId::new(),
        username: Username::new(username.to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: authenticator.hash_password(password).unwrap(),
        active: true,
        roles: HashSet::from_iter(roles.iter().copied()),
        created_at: Utc::now(),
    };
    store.insert_user(principal.clone());
    principal
}
