use async_trait::async_trait;
use bugs_sdk::Bug;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repo::BugsRepository;

use super::db_err;
use super::entity::{self, Column, Entity as BugsEntity};

/// `SeaORM` implementation of [`BugsRepository`].
pub struct OrmBugsRepository {
    db: DatabaseConnection,
}

impl OrmBugsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BugsRepository for OrmBugsRepository {
    async fn find_all(&self) -> Result<Vec<Bug>, DomainError> {
        let rows = BugsEntity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter().map(Bug::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bug>, DomainError> {
        BugsEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(Bug::try_from)
            .transpose()
    }

    async fn create(&self, bug: Bug) -> Result<Bug, DomainError> {
        let model = entity::ActiveModel::from(&bug)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Bug::try_from(model)
    }

    async fn update(&self, bug: Bug) -> Result<Bug, DomainError> {
        let active = entity::ActiveModel {
            id: ActiveValue::Unchanged(bug.id),
            ..entity::ActiveModel::from(&bug)
        };

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::not_found(bug.id),
            other => db_err(other),
        })?;
        Bug::try_from(model)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let res = BugsEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}
