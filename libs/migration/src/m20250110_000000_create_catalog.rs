use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create product_brands table
        manager
            .create_table(
                Table::create()
                    .table(ProductBrands::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductBrands::Id))
                    .col(string(ProductBrands::Name))
                    .to_owned(),
            )
            .await?;

        // Create product_types table
        manager
            .create_table(
                Table::create()
                    .table(ProductTypes::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductTypes::Id))
                    .col(string(ProductTypes::Name))
                    .to_owned(),
            )
            .await?;

        // Create products table
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string(Products::Name))
                    .col(text(Products::Description))
                    .col(double(Products::Price))
                    .col(string(Products::PictureUrl))
                    .col(integer(Products::BrandId))
                    .col(integer(Products::TypeId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_brand_id")
                            .from(Products::Table, Products::BrandId)
                            .to(ProductBrands::Table, ProductBrands::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_type_id")
                            .from(Products::Table, Products::TypeId)
                            .to(ProductTypes::Table, ProductTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes for the filter columns and the default sort
        manager
            .create_index(
                Index::create()
                    .name("idx_products_brand_id")
                    .table(Products::Table)
                    .col(Products::BrandId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_type_id")
                    .table(Products::Table)
                    .col(Products::TypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_name")
                    .table(Products::Table)
                    .col(Products::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProductTypes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProductBrands::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    PictureUrl,
    BrandId,
    TypeId,
}

#[derive(DeriveIden)]
enum ProductBrands {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum ProductTypes {
    Table,
    Id,
    Name,
}
