use std::sync::Arc;

use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::auth::models::Principal;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;

/// Back-office administration of principals.
///
/// Sits on the same credential store the authentication core reads from;
/// passwords are hashed here, before they ever reach a port.
pub struct UserAdminService<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
}

impl<S> UserAdminService<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
        }
    }

    pub async fn create_user(&self, command: CreateUserCommand) -> Result<Principal, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let principal = Principal {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            active: command.active,
            roles: command.roles,
            created_at: Utc::now(),
        };

        let created = self.store.create(principal).await?;
        tracing::info!(username = %created.username, "user created");

        Ok(created)
    }

    pub async fn list_users(&self) -> Result<Vec<Principal>, UserError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.store.delete(id).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}
