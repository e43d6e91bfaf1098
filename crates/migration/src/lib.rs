pub use sea_orm_migration::prelude::*;

mod m20240518_100000_cashflow_entries;
mod m20240518_110000_stock_entries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240518_100000_cashflow_entries::Migration),
            Box::new(m20240518_110000_stock_entries::Migration),
        ]
    }
}
