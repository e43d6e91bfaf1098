use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum CashflowEntries {
    Table,
    Id,
    Date,
    Kind,
    Category,
    Description,
    Amount,
    MaterialStockId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CashflowEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CashflowEntries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CashflowEntries::Date).date().not_null())
                    .col(ColumnDef::new(CashflowEntries::Kind).string().not_null())
                    .col(
                        ColumnDef::new(CashflowEntries::Category)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashflowEntries::Description)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashflowEntries::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CashflowEntries::MaterialStockId).big_integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cashflow_entries-date")
                    .table(CashflowEntries::Table)
                    .col(CashflowEntries::Date)
                    .to_owned(),
            )
            .await?;

        // At most one mirror entry per stock purchase.
        manager
            .create_index(
                Index::create()
                    .name("uq-cashflow_entries-material_stock_id")
                    .table(CashflowEntries::Table)
                    .col(CashflowEntries::MaterialStockId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CashflowEntries::Table).to_owned())
            .await?;
        Ok(())
    }
}
