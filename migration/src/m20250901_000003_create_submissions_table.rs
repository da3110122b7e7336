use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_groups_table::Groups;
use crate::m20250901_000002_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    GroupId,
    Title,
    FileUrl,
    SubmittedAt,
    UploadedBy,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Submissions::Table)
                .if_not_exists()
                .col(ColumnDef::new(Submissions::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Submissions::GroupId).uuid().not_null())
                .col(ColumnDef::new(Submissions::Title).string().not_null())
                .col(ColumnDef::new(Submissions::FileUrl).string().null())
                .col(ColumnDef::new(Submissions::SubmittedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Submissions::UploadedBy).uuid().null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_submissions_group")
                        .from(Submissions::Table, Submissions::GroupId)
                        .to(Groups::Table, Groups::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_submissions_uploader")
                        .from(Submissions::Table, Submissions::UploadedBy)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_submissions_group_id")
                .table(Submissions::Table)
                .col(Submissions::GroupId)
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_submissions_uploaded_by")
                .table(Submissions::Table)
                .col(Submissions::UploadedBy)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Submissions::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
