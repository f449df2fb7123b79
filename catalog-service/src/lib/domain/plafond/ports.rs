use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::plafond::errors::PlafondError;
use crate::domain::plafond::models::Plafond;
use crate::domain::plafond::models::PlafondId;

/// Persistence operations for loan plans. Deletion is soft: removed plans
/// stay on record but drop out of every read path.
#[async_trait]
pub trait PlafondRepository: Send + Sync + 'static {
    async fn create(&self, plafond: Plafond) -> Result<Plafond, PlafondError>;

    async fn find_by_id(&self, id: &PlafondId) -> Result<Option<Plafond>, PlafondError>;

    async fn list(&self) -> Result<Vec<Plafond>, PlafondError>;

    async fn update(&self, plafond: Plafond) -> Result<Plafond, PlafondError>;

    async fn soft_delete(&self, id: &PlafondId, now: DateTime<Utc>) -> Result<(), PlafondError>;
}
