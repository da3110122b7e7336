use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_groups_table::Groups;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Users::Table)
                .if_not_exists()
                .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Users::Email).string().not_null())
                .col(ColumnDef::new(Users::Name).string().not_null())
                .col(ColumnDef::new(Users::Role).string_len(16).not_null().default("member"))
                .col(ColumnDef::new(Users::PasswordHash).string().null())
                // nullable: users may register before picking a team
                .col(ColumnDef::new(Users::GroupId).uuid().null())
                .col(ColumnDef::new(Users::IsApproved).boolean().not_null().default(false))
                .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_users_group")
                        .from(Users::Table, Users::GroupId)
                        .to(Groups::Table, Groups::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("uk_users_email")
                .table(Users::Table)
                .col(Users::Email)
                .unique()
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_users_group_id")
                .table(Users::Table)
                .col(Users::GroupId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Users::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    Name,
    Role,
    PasswordHash,
    GroupId,
    IsApproved,
    CreatedAt,
}
