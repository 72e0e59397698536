//! Migrator replaying the `time_entries` schema history in order.
//! The last step leaves the table matching `models::time_entry`.
pub use sea_orm_migration::prelude::*;

mod m20260224_000001_create_time_entries;
mod m20260224_170408_update_time_entry;
mod m20260224_171955_add_multiplier;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260224_000001_create_time_entries::Migration),
            Box::new(m20260224_170408_update_time_entry::Migration),
            Box::new(m20260224_171955_add_multiplier::Migration),
        ]
    }
}
