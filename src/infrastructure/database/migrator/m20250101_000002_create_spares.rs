//! Create spares table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Spares::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Spares::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Spares::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Spares::Company).string_len(100).null())
                    .col(ColumnDef::new(Spares::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(Spares::Price)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Spares::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Spares::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Spares::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Spares {
    Table,
    Id,
    Name,
    Company,
    Quantity,
    Price,
    CreatedAt,
    UpdatedAt,
}
