//! Create sales table

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_spares::Spares;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sales::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sales::SpareId).integer().not_null())
                    .col(ColumnDef::new(Sales::QuantitySold).integer().not_null())
                    .col(
                        ColumnDef::new(Sales::SoldAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // Restrict: a spare with recorded sales cannot be deleted;
                    // sales are the only history the system keeps.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_spare")
                            .from(Sales::Table, Sales::SpareId)
                            .to(Spares::Table, Spares::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for listing by recency
        manager
            .create_index(
                Index::create()
                    .name("idx_sales_sold_at")
                    .table(Sales::Table)
                    .col(Sales::SoldAt)
                    .to_owned(),
            )
            .await?;

        // Index for per-spare lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_sales_spare_id")
                    .table(Sales::Table)
                    .col(Sales::SpareId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Sales {
    Table,
    Id,
    SpareId,
    QuantitySold,
    SoldAt,
}
