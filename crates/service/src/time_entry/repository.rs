use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::time_entry::{Model, TimeEntryInput};
use crate::{errors::ServiceError, Lookup};

#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Lookup<Model>, ServiceError>;
    async fn create(&self, input: TimeEntryInput) -> Result<Model, ServiceError>;
    async fn update(&self, id: i32, input: TimeEntryInput) -> Result<Lookup<Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<Lookup<Model>, ServiceError>;
    /// Round-trip to the store without touching any table.
    async fn ping(&self) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmTimeEntryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl TimeEntryRepository for SeaOrmTimeEntryRepository {
    async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        crate::db::time_entry_service::list_time_entries(&self.db).await
    }

    async fn get(&self, id: i32) -> Result<Lookup<Model>, ServiceError> {
        crate::db::time_entry_service::get_time_entry(&self.db, id).await
    }

    async fn create(&self, input: TimeEntryInput) -> Result<Model, ServiceError> {
        crate::db::time_entry_service::create_time_entry(&self.db, input).await
    }

    async fn update(&self, id: i32, input: TimeEntryInput) -> Result<Lookup<Model>, ServiceError> {
        crate::db::time_entry_service::update_time_entry(&self.db, id, input).await
    }

    async fn delete(&self, id: i32) -> Result<Lookup<Model>, ServiceError> {
        crate::db::time_entry_service::delete_time_entry(&self.db, id).await
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        Ok(self.db.ping().await?)
    }
}
