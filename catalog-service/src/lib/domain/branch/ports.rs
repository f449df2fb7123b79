use async_trait::async_trait;

use crate::domain::branch::errors::BranchError;
use crate::domain::branch::models::Branch;
use crate::domain::branch::models::BranchId;

#[async_trait]
pub trait BranchRepository: Send + Sync + 'static {
    async fn find_by_id(&self, id: &BranchId) -> Result<Option<Branch>, BranchError>;

    async fn list_all(&self) -> Result<Vec<Branch>, BranchError>;
}
