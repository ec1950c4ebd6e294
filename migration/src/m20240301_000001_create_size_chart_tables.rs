use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductMeta::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductMeta::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProductMeta::MetaKey).string().not_null())
                    .col(ColumnDef::new(ProductMeta::MetaValue).text().not_null())
                    .primary_key(
                        Index::create()
                            .col(ProductMeta::ProductId)
                            .col(ProductMeta::MetaKey),
                    )
                    .to_owned(),
            )
            .await?;

        // uploaded files, resolved to urls per rendition
        manager
            .create_table(
                Table::create()
                    .table(Attachment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attachment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attachment::Url).text().not_null())
                    .col(ColumnDef::new(Attachment::ThumbnailUrl).text().null())
                    .col(
                        ColumnDef::new(Attachment::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attachment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductMeta::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum ProductMeta {
    Table,
    ProductId,
    MetaKey,
    MetaValue,
}

#[derive(Iden)]
pub(crate) enum Attachment {
    Table,
    Id,
    Url,
    ThumbnailUrl,
    CreatedAt,
}
