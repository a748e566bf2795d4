use sea_orm_migration::prelude::*;

use crate::m20250304_105428_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Submissions::CourseId).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Submissions::ProjectTitle)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Description).text().not_null())
                    .col(ColumnDef::new(Submissions::ProjectUrl).string_len(500).null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Submissions::Grade).integer().null())
                    .col(ColumnDef::new(Submissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(Submissions::GradedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Submissions::GradedBy).uuid().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_user")
                            .from(Submissions::Table, Submissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_submissions_submitted_at
                ON submissions (submitted_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    UserId,
    CourseId,
    ProjectTitle,
    Description,
    ProjectUrl,
    SubmittedAt,
    Grade,
    Feedback,
    GradedAt,
    GradedBy,
}
