//! Migration: Create members table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Members::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Members::FullName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Members::MembershipType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Members::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(ColumnDef::new(Members::StartDate).date().not_null())
                    .col(ColumnDef::new(Members::EndDate).date().null())
                    .col(
                        ColumnDef::new(Members::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Members::Status).is_in(["ACTIVE", "PAUSED", "CANCELLED"]))
                    .to_owned(),
            )
            .await?;

        // List ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_members_created_at")
                    .table(Members::Table)
                    .col(Members::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Members {
    Table,
    Id,
    FullName,
    MembershipType,
    Status,
    StartDate,
    EndDate,
    CreatedAt,
}
