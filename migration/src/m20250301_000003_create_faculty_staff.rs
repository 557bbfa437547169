use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No unique constraint on (college_name, branch_name): readers take the oldest row
        manager
            .create_table(
                Table::create()
                    .table(FacultyStaff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FacultyStaff::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FacultyStaff::CollegeName).string_len(50).not_null())
                    .col(ColumnDef::new(FacultyStaff::BranchName).string_len(50).not_null())
                    .col(ColumnDef::new(FacultyStaff::FacultyName).string_len(100).not_null())
                    .col(ColumnDef::new(FacultyStaff::StaffName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(FacultyStaff::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_faculty_staff_scope")
                    .table(FacultyStaff::Table)
                    .col(FacultyStaff::CollegeName)
                    .col(FacultyStaff::BranchName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FacultyStaff::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FacultyStaff {
    Table,
    Id,
    CollegeName,
    BranchName,
    FacultyName,
    StaffName,
    CreatedAt,
}
