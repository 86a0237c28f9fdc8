use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Item::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Item::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Item::NameSearch).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Item::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Item::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Item::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Listing is always ordered by creation time, newest first
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_item_created_at")
                    .table(Item::Table)
                    .col(Item::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_item_is_active")
                    .table(Item::Table)
                    .col(Item::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Item::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Item {
    Table,
    Id,
    Name,
    NameSearch,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
