use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::branch::errors::BranchError;
use crate::domain::branch::models::Branch;
use crate::domain::branch::models::BranchId;
use crate::domain::branch::ports::BranchRepository;

pub struct PostgresBranchRepository {
    pool: PgPool,
}

impl PostgresBranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> BranchError {
    BranchError::DatabaseError(e.to_string())
}

fn branch_from_row(row: &PgRow) -> Result<Branch, BranchError> {
    Ok(Branch {
        id: BranchId(row.try_get("id").map_err(db_err)?),
        name: row.try_get("name").map_err(db_err)?,
        address: row.try_get("address").map_err(db_err)?,
        city: row.try_get("city").map_err(db_err)?,
    })
}

#[async_trait]
impl BranchRepository for PostgresBranchRepository {
    async fn find_by_id(&self, id: &BranchId) -> Result<Option<Branch>, BranchError> {
        let row = sqlx::query("SELECT id, name, address, city FROM branches WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(branch_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Branch>, BranchError> {
        let rows = sqlx::query("SELECT id, name, address, city FROM branches ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(branch_from_row).collect()
    }
}
