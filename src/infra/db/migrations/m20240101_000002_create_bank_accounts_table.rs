//! Migration: Create bank_accounts table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

const IDX_OWNER_NAME: &str = "idx_bank_accounts_owner_name";
const IDX_OWNER: &str = "idx_bank_accounts_owner";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BankAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BankAccounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BankAccounts::OwnerUserId).uuid().not_null())
                    .col(ColumnDef::new(BankAccounts::Name).string().not_null())
                    .col(
                        ColumnDef::new(BankAccounts::BalanceMinor)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(BankAccounts::BalanceMinor).gte(0)),
                    )
                    .col(ColumnDef::new(BankAccounts::State).string().not_null())
                    .col(
                        ColumnDef::new(BankAccounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BankAccounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_accounts_owner_user_id")
                            .from(BankAccounts::Table, BankAccounts::OwnerUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The arbiter for concurrent creates with the same (owner, name)
        manager
            .create_index(
                Index::create()
                    .name(IDX_OWNER_NAME)
                    .table(BankAccounts::Table)
                    .col(BankAccounts::OwnerUserId)
                    .col(BankAccounts::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OWNER)
                    .table(BankAccounts::Table)
                    .col(BankAccounts::OwnerUserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Indexes go with the table
        manager
            .drop_table(Table::drop().table(BankAccounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BankAccounts {
    Table,
    Id,
    OwnerUserId,
    Name,
    BalanceMinor,
    State,
    CreatedAt,
    UpdatedAt,
}
