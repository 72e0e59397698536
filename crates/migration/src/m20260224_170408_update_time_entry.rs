//! Replace the timer columns with `date` + `quantity`.
//!
//! One change per `ALTER TABLE`: SQLite rejects multi-clause alters.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const EPOCH: &str = "1970-01-01 00:00:00+00:00";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for col in [
            TimeEntries::CreatedAt,
            TimeEntries::EndTime,
            TimeEntries::StartTime,
            TimeEntries::Title,
        ] {
            manager
                .alter_table(Table::alter().table(TimeEntries::Table).drop_column(col).to_owned())
                .await?;
        }

        manager
            .alter_table(
                Table::alter()
                    .table(TimeEntries::Table)
                    .add_column(ColumnDef::new(TimeEntries::Date).date().not_null().default("0001-01-01"))
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(TimeEntries::Table)
                    .add_column(ColumnDef::new(TimeEntries::Quantity).decimal().not_null().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for col in [TimeEntries::Date, TimeEntries::Quantity] {
            manager
                .alter_table(Table::alter().table(TimeEntries::Table).drop_column(col).to_owned())
                .await?;
        }

        let restored = [
            ColumnDef::new(TimeEntries::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(EPOCH)
                .to_owned(),
            ColumnDef::new(TimeEntries::EndTime).timestamp_with_time_zone().null().to_owned(),
            ColumnDef::new(TimeEntries::StartTime)
                .timestamp_with_time_zone()
                .not_null()
                .default(EPOCH)
                .to_owned(),
            ColumnDef::new(TimeEntries::Title).string().not_null().default("").to_owned(),
        ];
        for col in restored {
            manager
                .alter_table(Table::alter().table(TimeEntries::Table).add_column(col).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum TimeEntries {
    Table,
    Date,
    Quantity,
    Title,
    StartTime,
    EndTime,
    CreatedAt,
}
