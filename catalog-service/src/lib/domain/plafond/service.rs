use std::sync::Arc;

use chrono::Utc;

use crate::domain::plafond::errors::PlafondError;
use crate::domain::plafond::models::CreatePlafondCommand;
use crate::domain::plafond::models::Plafond;
use crate::domain::plafond::models::PlafondId;
use crate::domain::plafond::models::UpdatePlafondCommand;
use crate::domain::plafond::ports::PlafondRepository;

pub struct PlafondService<R>
where
    R: PlafondRepository,
{
    repository: Arc<R>,
}

impl<R> PlafondService<R>
where
    R: PlafondRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_plafond(
        &self,
        command: CreatePlafondCommand,
    ) -> Result<Plafond, PlafondError> {
        let plafond = Plafond {
            id: PlafondId::new(),
            name: command.name,
            description: command.description,
            max_amount: command.max_amount,
            interest_rate: command.interest_rate,
            tenor_month: command.tenor_month,
            is_active: true,
            created_at: Utc::now(),
        };

        let created = self.repository.create(plafond).await?;
        tracing::info!(plafond = %created.name, "plafond created");

        Ok(created)
    }

    pub async fn get_plafond(&self, id: &PlafondId) -> Result<Plafond, PlafondError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PlafondError::NotFound(id.to_string()))
    }

    pub async fn list_plafonds(&self) -> Result<Vec<Plafond>, PlafondError> {
        self.repository.list().await
    }

    pub async fn update_plafond(
        &self,
        id: &PlafondId,
        command: UpdatePlafondCommand,
    ) -> Result<Plafond, PlafondError> {
        let mut plafond = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PlafondError::NotFound(id.to_string()))?;

        if let Some(name) = command.name {
            plafond.name = name;
        }
        if let Some(description) = command.description {
            plafond.description = description;
        }
        if let Some(max_amount) = command.max_amount {
            plafond.max_amount = max_amount;
        }
        if let Some(interest_rate) = command.interest_rate {
            plafond.interest_rate = interest_rate;
        }
        if let Some(tenor_month) = command.tenor_month {
            plafond.tenor_month = tenor_month;
        }
        if let Some(is_active) = command.is_active {
            plafond.is_active = is_active;
        }

        self.repository.update(plafond).await
    }

    pub async fn delete_plafond(&self, id: &PlafondId) -> Result<(), PlafondError> {
        self.repository.soft_delete(id, Utc::now()).await?;
        tracing::info!(plafond_id = %id, "plafond deleted");
        Ok(())
    }
}
