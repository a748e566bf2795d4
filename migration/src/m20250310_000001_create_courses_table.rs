use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .string_len(100)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Courses::Description).text().not_null())
                    .col(ColumnDef::new(Courses::Instructor).string_len(200).not_null())
                    .col(ColumnDef::new(Courses::Duration).string_len(50).not_null())
                    .col(ColumnDef::new(Courses::Units).string_len(50).not_null())
                    .col(ColumnDef::new(Courses::Schedule).string_len(100).not_null())
                    .col(ColumnDef::new(Courses::Category).string_len(100).not_null())
                    // Minor currency units, 0 = free
                    .col(
                        ColumnDef::new(Courses::Price)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Courses::IsPremium)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Courses {
    Table,
    Id,
    Title,
    Description,
    Instructor,
    Duration,
    Units,
    Schedule,
    Category,
    Price,
    IsPremium,
}
