use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::plafond::errors::PlafondError;
use crate::domain::plafond::models::Plafond;
use crate::domain::plafond::models::PlafondId;
use crate::domain::plafond::ports::PlafondRepository;

pub struct PostgresPlafondRepository {
    pool: PgPool,
}

impl PostgresPlafondRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> PlafondError {
    PlafondError::DatabaseError(e.to_string())
}

fn plafond_from_row(row: &PgRow) -> Result<Plafond, PlafondError> {
    Ok(Plafond {
        id: PlafondId(row.try_get("id").map_err(db_err)?),
        name: row.try_get("name").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        max_amount: row.try_get("max_amount").map_err(db_err)?,
        interest_rate: row.try_get("interest_rate").map_err(db_err)?,
        tenor_month: row.try_get("tenor_month").map_err(db_err)?,
        is_active: row.try_get("is_active").map_err(db_err)?,
        created_at: row.try_get("created_at").map_err(db_err)?,
    })
}

#[async_trait]
impl PlafondRepository for PostgresPlafondRepository {
    async fn create(&self, plafond: Plafond) -> Result<Plafond, PlafondError> {
        sqlx::query(
            r#"
            INSERT INTO plafonds
                (id, name, description, max_amount, interest_rate, tenor_month, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(plafond.id.0)
        .bind(&plafond.name)
        .bind(&plafond.description)
        .bind(plafond.max_amount)
        .bind(plafond.interest_rate)
        .bind(plafond.tenor_month)
        .bind(plafond.is_active)
        .bind(plafond.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_error) = e.as_database_error() {
                if db_error.is_unique_violation() {
                    return PlafondError::NameAlreadyExists(plafond.name.clone());
                }
            }
            db_err(e)
        })?;

        Ok(plafond)
    }

    async fn find_by_id(&self, id: &PlafondId) -> Result<Option<Plafond>, PlafondError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, max_amount, interest_rate, tenor_month, is_active, created_at
            FROM plafonds
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(plafond_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Plafond>, PlafondError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, max_amount, interest_rate, tenor_month, is_active, created_at
            FROM plafonds
            WHERE is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(plafond_from_row).collect()
    }

    async fn update(&self, plafond: Plafond) -> Result<Plafond, PlafondError> {
        let result = sqlx::query(
            r#"
            UPDATE plafonds
            SET name = $2, description = $3, max_amount = $4, interest_rate = $5,
                tenor_month = $6, is_active = $7
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(plafond.id.0)
        .bind(&plafond.name)
        .bind(&plafond.description)
        .bind(plafond.max_amount)
        .bind(plafond.interest_rate)
        .bind(plafond.tenor_month)
        .bind(plafond.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_error) = e.as_database_error() {
                if db_error.is_unique_violation() {
                    return PlafondError::NameAlreadyExists(plafond.name.clone());
                }
            }
            db_err(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(PlafondError::NotFound(plafond.id.to_string()));
        }

        Ok(plafond)
    }

    async fn soft_delete(&self, id: &PlafondId, now: DateTime<Utc>) -> Result<(), PlafondError> {
        let result = sqlx::query(
            r#"
            UPDATE plafonds
            SET is_deleted = TRUE, deleted_at = $2
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id.0)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(PlafondError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
