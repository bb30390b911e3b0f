//! Benefit repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::benefit::{self, ActiveModel, Entity as BenefitEntity};
use crate::domain::{Benefit, BenefitId, NewBenefit};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Benefit repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BenefitRepository: Send + Sync {
    /// All benefits, ordered by id
    async fn list(&self) -> AppResult<Vec<Benefit>>;

    /// The benefits among `ids` that exist, ordered by id
    async fn find_by_ids(&self, ids: &[BenefitId]) -> AppResult<Vec<Benefit>>;

    /// Create a benefit. `Conflict` when the name is taken.
    async fn create(&self, benefit: NewBenefit) -> AppResult<Benefit>;
}

/// Concrete implementation of BenefitRepository
pub struct BenefitStore {
    db: DatabaseConnection,
}

impl BenefitStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BenefitRepository for BenefitStore {
    async fn list(&self) -> AppResult<Vec<Benefit>> {
        let models = BenefitEntity::find()
            .order_by_asc(benefit::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Benefit::from).collect())
    }

    async fn find_by_ids(&self, ids: &[BenefitId]) -> AppResult<Vec<Benefit>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let models = BenefitEntity::find()
            .filter(benefit::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(benefit::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Benefit::from).collect())
    }

    async fn create(&self, new: NewBenefit) -> AppResult<Benefit> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(new.name),
            description: Set(new.description),
            base_cost: Set(new.base_cost),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_write(e, "Benefit"))?;
        Ok(Benefit::from(model))
    }
}
