use std::collections::HashSet;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Principal;
use crate::domain::auth::models::ResetToken;
use crate::domain::auth::models::Role;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;
use crate::domain::auth::ports::CredentialStore;

/// Base select joining each user with its role names. Callers append a
/// WHERE clause and the GROUP BY.
const PRINCIPAL_SELECT: &str = r#"
    SELECT u.id, u.username, u.email, u.password_hash, u.is_active, u.created_at,
           COALESCE(array_agg(r.name) FILTER (WHERE r.name IS NOT NULL), '{}') AS roles
    FROM users u
    LEFT JOIN user_roles ur ON ur.user_id = u.id
    LEFT JOIN roles r ON r.id = ur.role_id
"#;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

fn corrupt(e: impl std::fmt::Display) -> StoreError {
    StoreError::Corrupt(e.to_string())
}

fn principal_from_row(row: &PgRow) -> Result<Principal, StoreError> {
    let role_names: Vec<String> = row.try_get("roles").map_err(db_err)?;
    let roles = role_names
        .iter()
        .map(|name| name.parse::<Role>())
        .collect::<Result<HashSet<Role>, _>>()
        .map_err(corrupt)?;

    Ok(Principal {
        id: UserId(row.try_get("id").map_err(db_err)?),
        username: Username::new(row.try_get("username").map_err(db_err)?).map_err(corrupt)?,
        email: EmailAddress::new(row.try_get("email").map_err(db_err)?).map_err(corrupt)?,
        password_hash: row.try_get("password_hash").map_err(db_err)?,
        active: row.try_get("is_active").map_err(db_err)?,
        roles,
        created_at: row.try_get("created_at").map_err(db_err)?,
    })
}

fn reset_token_from_row(row: &PgRow) -> Result<ResetToken, StoreError> {
    Ok(ResetToken {
        token: row.try_get("token").map_err(db_err)?,
        user_id: UserId(row.try_get("user_id").map_err(db_err)?),
        expiry_date: row.try_get("expiry_date").map_err(db_err)?,
        used: row.try_get("used").map_err(db_err)?,
    })
}

fn map_unique_violation(e: sqlx::Error, principal: &Principal) -> StoreError {
    if let Some(db_error) = e.as_database_error() {
        if db_error.is_unique_violation() {
            if db_error.constraint() == Some("users_username_key") {
                return StoreError::UsernameAlreadyExists(principal.username.to_string());
            }
            if db_error.constraint() == Some("users_email_key") {
                return StoreError::EmailAlreadyExists(principal.email.to_string());
            }
        }
    }
    db_err(e)
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>, StoreError> {
        let row = sqlx::query(&format!(
            "{PRINCIPAL_SELECT} WHERE u.username = $1 GROUP BY u.id"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(principal_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, StoreError> {
        let row = sqlx::query(&format!(
            "{PRINCIPAL_SELECT} WHERE u.email = $1 GROUP BY u.id"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(principal_from_row).transpose()
    }

    async fn create(&self, principal: Principal) -> Result<Principal, StoreError> {
        let role_names: Vec<String> = principal
            .roles
            .iter()
            .map(|role| role.as_str().to_string())
            .collect();

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(principal.id.0)
        .bind(principal.username.as_str())
        .bind(principal.email.as_str())
        .bind(&principal.password_hash)
        .bind(principal.active)
        .bind(principal.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &principal))?;

        if !role_names.is_empty() {
            let assigned = sqlx::query(
                r#"
                INSERT INTO user_roles (user_id, role_id)
                SELECT $1, id FROM roles WHERE name = ANY($2)
                "#,
            )
            .bind(principal.id.0)
            .bind(&role_names)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

            if assigned.rows_affected() != role_names.len() as u64 {
                return Err(StoreError::Corrupt(format!(
                    "not all roles exist in the roles table: {:?}",
                    role_names
                )));
            }
        }

        tx.commit().await.map_err(db_err)?;

        Ok(principal)
    }

    async fn list_all(&self) -> Result<Vec<Principal>, StoreError> {
        let rows = sqlx::query(&format!(
            "{PRINCIPAL_SELECT} GROUP BY u.id ORDER BY u.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(principal_from_row).collect()
    }

    async fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn find_reset_token(&self, token: &str) -> Result<Option<ResetToken>, StoreError> {
        let row = sqlx::query(
            "SELECT token, user_id, expiry_date, used FROM password_reset_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(reset_token_from_row).transpose()
    }

    async fn find_live_token_for_user(
        &self,
        id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<ResetToken>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, expiry_date, used
            FROM password_reset_tokens
            WHERE user_id = $1 AND used = FALSE AND expiry_date > $2
            "#,
        )
        .bind(id.0)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(reset_token_from_row).transpose()
    }

    async fn replace_reset_token(&self, token: ResetToken) -> Result<(), StoreError> {
        // Delete-old plus insert-new in one transaction, so concurrent
        // duplicate requests cannot leave two live tokens for a principal.
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1")
            .bind(token.user_id.0)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (token, user_id, expiry_date, used)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&token.token)
        .bind(token.user_id.0)
        .bind(token.expiry_date)
        .bind(token.used)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        new_password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        // The conditional UPDATE is the single atomic claim: of N racing
        // transactions, the row lock lets exactly one see used = FALSE.
        let claimed_user: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE password_reset_tokens
            SET used = TRUE
            WHERE token = $1 AND used = FALSE AND expiry_date > $2
            RETURNING user_id
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        let Some(user_id) = claimed_user else {
            tx.rollback().await.map_err(db_err)?;
            return Ok(false);
        };

        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(new_password_hash)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        Ok(true)
    }
}
