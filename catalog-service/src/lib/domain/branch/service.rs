use std::sync::Arc;

use crate::domain::branch::errors::BranchError;
use crate::domain::branch::models::Branch;
use crate::domain::branch::models::BranchId;
use crate::domain::branch::ports::BranchRepository;

pub struct BranchService<R>
where
    R: BranchRepository,
{
    repository: Arc<R>,
}

impl<R> BranchService<R>
where
    R: BranchRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn get_branch(&self, id: &BranchId) -> Result<Branch, BranchError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BranchError::NotFound(id.to_string()))
    }

    pub async fn list_branches(&self) -> Result<Vec<Branch>, BranchError> {
        self.repository.list_all().await
    }
}
