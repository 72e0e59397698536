//! Create `time_entries` with the first, timer-style columns.
//!
//! Superseded by the date/quantity model; kept so existing databases replay
//! the same history as fresh ones.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TimeEntries::Table)
                    .if_not_exists()
                    .col(pk_auto(TimeEntries::Id))
                    .col(string(TimeEntries::Title))
                    .col(timestamp_with_time_zone(TimeEntries::StartTime))
                    .col(timestamp_with_time_zone_null(TimeEntries::EndTime))
                    .col(text_null(TimeEntries::Notes))
                    .col(timestamp_with_time_zone(TimeEntries::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(TimeEntries::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum TimeEntries {
    Table,
    Id,
    Title,
    StartTime,
    EndTime,
    Notes,
    CreatedAt,
}
