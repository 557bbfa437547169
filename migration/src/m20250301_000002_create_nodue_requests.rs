use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NodueRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NodueRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NodueRequests::StudentId)
                            .string()
                            .not_null(),
                    )
                    // true once the HOD has approved
                    .col(
                        ColumnDef::new(NodueRequests::IsApproved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(NodueRequests::HodComment).string_len(200).null())
                    .col(ColumnDef::new(NodueRequests::LibraryComment).string_len(200).null())
                    .col(ColumnDef::new(NodueRequests::StaffComment).string_len(200).null())
                    .col(
                        ColumnDef::new(NodueRequests::CollegeName)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NodueRequests::BranchName)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NodueRequests::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NodueRequests::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nodue_requests_student_id")
                            .from(NodueRequests::Table, NodueRequests::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_nodue_requests_scope")
                    .table(NodueRequests::Table)
                    .col(NodueRequests::CollegeName)
                    .col(NodueRequests::BranchName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_nodue_requests_student")
                    .table(NodueRequests::Table)
                    .col(NodueRequests::StudentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NodueRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NodueRequests {
    Table,
    Id,
    StudentId,
    IsApproved,
    HodComment,
    LibraryComment,
    StaffComment,
    CollegeName,
    BranchName,
    CreatedAt,
    UpdatedAt,
}
