//! Add the pay-rate `multiplier`; existing rows count at the normal rate.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(TimeEntries::Table)
                    .add_column(ColumnDef::new(TimeEntries::Multiplier).decimal().not_null().default(1))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(TimeEntries::Table)
                    .drop_column(TimeEntries::Multiplier)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum TimeEntries {
    Table,
    Multiplier,
}
