use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_initial_schema::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create property_images table
        manager
            .create_table(
                Table::create()
                    .table(PropertyImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyImages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PropertyImages::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(PropertyImages::File).blob().not_null())
                    .col(string(PropertyImages::FileName))
                    .col(
                        ColumnDef::new(PropertyImages::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_images_property_id")
                            .from(PropertyImages::Table, PropertyImages::PropertyId)
                            .to(Properties::Table, Properties::PropertyId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_property_images_property_id")
                    .table(PropertyImages::Table)
                    .col(PropertyImages::PropertyId)
                    .to_owned(),
            )
            .await?;

        // Create property_traces table
        manager
            .create_table(
                Table::create()
                    .table(PropertyTraces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyTraces::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PropertyTraces::PropertyId).uuid().not_null())
                    .col(string(PropertyTraces::Name))
                    .col(text(PropertyTraces::Value))
                    .col(text(PropertyTraces::Tax))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_traces_property_id")
                            .from(PropertyTraces::Table, PropertyTraces::PropertyId)
                            .to(Properties::Table, Properties::PropertyId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_property_traces_property_id")
                    .table(PropertyTraces::Table)
                    .col(PropertyTraces::PropertyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyTraces::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PropertyImages::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum PropertyImages {
    Table,
    Id,
    PropertyId,
    File,
    FileName,
    Enabled,
}

#[derive(DeriveIden)]
enum PropertyTraces {
    Table,
    Id,
    PropertyId,
    Name,
    Value,
    Tax,
}
