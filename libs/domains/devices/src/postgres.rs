use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::entity::{self, Column, Entity};
use crate::error::StorageResult;
use crate::models::{Device, DeviceRecord};
use crate::repository::{DeviceRepository, require_columns};

/// PostgreSQL implementation of DeviceRepository using SeaORM
#[derive(Clone)]
pub struct PgDeviceRepository {
    db: DatabaseConnection,
}

impl PgDeviceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DeviceRepository for PgDeviceRepository {
    async fn save(&self, device: DeviceRecord) -> StorageResult<Device> {
        // Checked here as well as by the schema so a bad record costs no round trip.
        let (name, brand) = require_columns(&device)?;

        let existing = match device.id {
            Some(id) => Entity::find_by_id(id).one(&self.db).await?,
            None => None,
        };

        let model = entity::active_model(device.id, name, brand, device.creation_time);
        let saved = match existing {
            Some(_) => model.update(&self.db).await?,
            None => model.insert(&self.db).await?,
        };

        tracing::debug!(device_id = saved.id, "Saved device");
        Ok(saved.into())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Device>> {
        let model = Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> StorageResult<Vec<Device>> {
        let models = Entity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_brand(&self, brand: &str) -> StorageResult<Vec<Device>> {
        let models = Entity::find()
            .filter(Column::Brand.eq(brand))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn exists_by_id(&self, id: i64) -> StorageResult<bool> {
        let count = Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        let result = Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!(device_id = id, rows = result.rows_affected, "Deleted device");
        Ok(())
    }

    async fn delete_all(&self) -> StorageResult<()> {
        Entity::delete_many().exec(&self.db).await?;
        Ok(())
    }
}
