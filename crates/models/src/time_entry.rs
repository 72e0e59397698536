use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A day's worth of tracked hours. Amounts travel as JSON numbers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "time_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub multiplier: Decimal,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Body of `POST` and `PUT`. An `id` in the payload is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeEntryInput {
    pub date: Date,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(default = "default_multiplier", with = "rust_decimal::serde::float")]
    pub multiplier: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn default_multiplier() -> Decimal {
    Decimal::ONE
}

impl TimeEntryInput {
    /// Insertable row; the store assigns the id.
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            date: Set(self.date),
            quantity: Set(self.quantity),
            multiplier: Set(self.multiplier),
            notes: Set(self.notes),
        }
    }

    /// Full replacement of every mutable column; nothing is merged.
    pub fn overwrite(self, am: &mut ActiveModel) {
        am.date = Set(self.date);
        am.quantity = Set(self.quantity);
        am.multiplier = Set(self.multiplier);
        am.notes = Set(self.notes);
    }
}

pub async fn create(db: &DatabaseConnection, input: TimeEntryInput) -> Result<Model, ModelError> {
    input
        .into_active_model()
        .insert(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn replace(db: &DatabaseConnection, id: i32, input: TimeEntryInput) -> Result<Model, ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
        .ok_or(ModelError::NotFound(id))?
        .into();
    input.overwrite(&mut found);
    update_existing(db, id, found).await
}

/// Write back a row loaded earlier. A row deleted in the meantime is `NotFound`.
pub async fn update_existing(db: &DatabaseConnection, id: i32, am: ActiveModel) -> Result<Model, ModelError> {
    match am.update(db).await {
        Ok(m) => Ok(m),
        Err(DbErr::RecordNotUpdated) => Err(ModelError::NotFound(id)),
        Err(e) => Err(ModelError::Db(e.to_string())),
    }
}
