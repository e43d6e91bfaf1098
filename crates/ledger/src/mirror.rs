//! The material-to-cashflow mirror.
//!
//! Every stock mutation and its ledger side effect run inside one database
//! transaction: either both become visible or neither does. Statements within
//! a unit execute strictly in sequence because later ones depend on earlier
//! results (the mirror insert needs the fresh stock id).

use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, entity::prelude::*};

use crate::{
    Ledger, ResultLedger,
    entries::{self, EntryKind, NewEntry},
    error::LedgerError,
    stock::{self, NewStock, StockEntry},
    validate::MAX_AMOUNT,
};

/// Fixed category of mirrored log-purchase entries.
pub const MATERIAL_CATEGORY: &str = "Raw Material";

fn mirror_entry_for(stock_id: i64, stock: &NewStock) -> ResultLedger<NewEntry> {
    let amount = stock.mirror_amount().ok_or_else(|| {
        LedgerError::Validation(format!(
            "Combined super and rijek price must not exceed {MAX_AMOUNT}."
        ))
    })?;

    Ok(NewEntry {
        date: stock.mirror_date(),
        kind: EntryKind::Expense,
        category: MATERIAL_CATEGORY.to_string(),
        description: stock.mirror_description(),
        amount,
        material_stock_id: Some(stock_id),
    })
}

impl Ledger {
    /// Inserts a stock entry together with its mirrored expense entry.
    pub async fn create_stock(&self, stock: NewStock) -> ResultLedger<StockEntry> {
        let txn = self.database().begin().await?;

        let model = stock::ActiveModel::from(&stock).insert(&txn).await?;
        let mirror = mirror_entry_for(model.id, &stock)?;
        entries::ActiveModel::from(&mirror)
            .insert(&txn)
            .await
            .map_err(LedgerError::from)?;

        txn.commit().await?;
        tracing::debug!(stock_id = model.id, "created stock entry with mirror");
        Ok(StockEntry::from(model))
    }

    /// Updates a stock entry and re-derives its mirror.
    ///
    /// The mirror is upserted by `material_stock_id`: updated in place when a
    /// row exists, inserted when none does (rows that predate mirroring).
    pub async fn update_stock(&self, id: i64, stock: NewStock) -> ResultLedger<StockEntry> {
        let txn = self.database().begin().await?;

        let existing = stock::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| LedgerError::NotFound("Stock entry".to_string()))?;

        let model = stock::ActiveModel {
            id: ActiveValue::Set(existing.id),
            supplier: ActiveValue::Set(stock.supplier.clone()),
            driver: ActiveValue::Set(stock.driver.clone()),
            origin: ActiveValue::Set(stock.origin.clone()),
            received_at: ActiveValue::Set(stock.received_at),
            super_count: ActiveValue::Set(stock.super_log.count),
            super_volume: ActiveValue::Set(stock.super_log.volume),
            super_price: ActiveValue::Set(stock.super_log.price),
            rijek_count: ActiveValue::Set(stock.rijek_log.count),
            rijek_volume: ActiveValue::Set(stock.rijek_log.volume),
            rijek_price: ActiveValue::Set(stock.rijek_log.price),
        }
        .update(&txn)
        .await?;

        let mirror = mirror_entry_for(model.id, &stock)?;
        let current = entries::Entity::find()
            .filter(entries::Column::MaterialStockId.eq(model.id))
            .one(&txn)
            .await?;
        match current {
            Some(row) => {
                entries::ActiveModel {
                    id: ActiveValue::Set(row.id),
                    date: ActiveValue::Set(mirror.date),
                    kind: ActiveValue::Set(mirror.kind.as_str().to_string()),
                    category: ActiveValue::Set(mirror.category),
                    description: ActiveValue::Set(mirror.description),
                    amount: ActiveValue::Set(mirror.amount),
                    material_stock_id: ActiveValue::NotSet,
                }
                .update(&txn)
                .await?;
            }
            None => {
                entries::ActiveModel::from(&mirror)
                    .insert(&txn)
                    .await
                    .map_err(LedgerError::from)?;
            }
        }

        txn.commit().await?;
        tracing::debug!(stock_id = model.id, "updated stock entry and mirror");
        Ok(StockEntry::from(model))
    }

    /// Deletes a stock entry and its mirror as one unit.
    ///
    /// The mirror rows go first; if the stock delete then matches no row the
    /// transaction is dropped without commit, so the mirror delete never
    /// applies on its own.
    pub async fn delete_stock(&self, id: i64) -> ResultLedger<()> {
        let txn = self.database().begin().await?;

        entries::Entity::delete_many()
            .filter(entries::Column::MaterialStockId.eq(id))
            .exec(&txn)
            .await?;

        let result = stock::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(LedgerError::NotFound("Stock entry".to_string()));
        }

        txn.commit().await?;
        tracing::debug!(stock_id = id, "deleted stock entry and mirror");
        Ok(())
    }
}
