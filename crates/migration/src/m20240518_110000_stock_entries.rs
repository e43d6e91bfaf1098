use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum StockEntries {
    Table,
    Id,
    Supplier,
    Driver,
    Origin,
    ReceivedAt,
    SuperCount,
    SuperVolume,
    SuperPrice,
    RijekCount,
    RijekVolume,
    RijekPrice,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StockEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockEntries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StockEntries::Supplier).string().not_null())
                    .col(ColumnDef::new(StockEntries::Driver).string().not_null())
                    .col(ColumnDef::new(StockEntries::Origin).string().not_null())
                    .col(
                        ColumnDef::new(StockEntries::ReceivedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockEntries::SuperCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockEntries::SuperVolume)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockEntries::SuperPrice)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockEntries::RijekCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockEntries::RijekVolume)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StockEntries::RijekPrice)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-stock_entries-received_at")
                    .table(StockEntries::Table)
                    .col(StockEntries::ReceivedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-stock_entries-origin")
                    .table(StockEntries::Table)
                    .col(StockEntries::Origin)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockEntries::Table).to_owned())
            .await?;
        Ok(())
    }
}
