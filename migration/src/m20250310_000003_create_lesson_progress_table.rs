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
                    .table(LessonProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonProgress::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LessonProgress::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(LessonProgress::CourseId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::LessonId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::CompletedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_progress_user")
                            .from(LessonProgress::Table, LessonProgress::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_progress_unique")
                    .table(LessonProgress::Table)
                    .col(LessonProgress::UserId)
                    .col(LessonProgress::CourseId)
                    .col(LessonProgress::LessonId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LessonProgress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LessonProgress {
    Table,
    Id,
    UserId,
    CourseId,
    LessonId,
    CompletedAt,
}
