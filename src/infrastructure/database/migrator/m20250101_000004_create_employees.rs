//! Create employees table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Employees::Designation)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::Contact).string_len(20).not_null())
                    .col(ColumnDef::new(Employees::Aadhaar).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Employees::DocumentFile)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Employees::JoiningDate).date().not_null())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Employees {
    Table,
    Id,
    Name,
    Designation,
    Contact,
    Aadhaar,
    DocumentFile,
    JoiningDate,
    CreatedAt,
    UpdatedAt,
}
