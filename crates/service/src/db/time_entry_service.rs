use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, QueryOrder};
use models::errors::ModelError;
use models::time_entry::{self, Entity as TimeEntryEntity, TimeEntryInput};
use crate::{errors::ServiceError, Lookup};

/// All entries, newest date first; same-day entries keep insertion order.
pub async fn list_time_entries(db: &DatabaseConnection) -> Result<Vec<time_entry::Model>, ServiceError> {
    let rows = TimeEntryEntity::find()
        .order_by_desc(time_entry::Column::Date)
        .order_by_asc(time_entry::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Get a time entry by id.
pub async fn get_time_entry(db: &DatabaseConnection, id: i32) -> Result<Lookup<time_entry::Model>, ServiceError> {
    let found = TimeEntryEntity::find_by_id(id).one(db).await?;
    Ok(found.into())
}

/// Insert a new entry; the store assigns the id.
pub async fn create_time_entry(db: &DatabaseConnection, input: TimeEntryInput) -> Result<time_entry::Model, ServiceError> {
    let created = time_entry::create(db, input).await?;
    Ok(created)
}

/// Replace every mutable field of an existing entry.
pub async fn update_time_entry(
    db: &DatabaseConnection,
    id: i32,
    input: TimeEntryInput,
) -> Result<Lookup<time_entry::Model>, ServiceError> {
    match time_entry::replace(db, id, input).await {
        Ok(updated) => Ok(Lookup::Found(updated)),
        Err(ModelError::NotFound(_)) => Ok(Lookup::NotFound),
        Err(e) => Err(e.into()),
    }
}

/// Delete an entry, handing back the removed row.
pub async fn delete_time_entry(db: &DatabaseConnection, id: i32) -> Result<Lookup<time_entry::Model>, ServiceError> {
    let Some(existing) = TimeEntryEntity::find_by_id(id).one(db).await? else {
        return Ok(Lookup::NotFound);
    };
    let res = existing.clone().delete(db).await?;
    if res.rows_affected == 0 {
        // removed concurrently between the lookup and the delete
        return Ok(Lookup::NotFound);
    }
    Ok(Lookup::Found(existing))
}
