//! Cashflow ledger core for the timber operations dashboard.
//!
//! The [`Ledger`] owns the database connection and exposes every read and
//! write the dashboard needs: window queries with derived running balances,
//! direct entry mutations, and the material-stock mirror that keeps an
//! auto-generated expense entry consistent with each stock purchase.
//!
//! Running balances are never stored; they are recomputed on every read, so
//! mutations only have to keep the rows themselves correct.

use sea_orm::{ActiveValue, DatabaseConnection, QueryFilter, entity::prelude::*};

pub use entries::{CashflowEntry, EntryKind, NewEntry};
pub use error::LedgerError;
pub use mirror::MATERIAL_CATEGORY;
pub use report::{Breakdown, CashflowReport, LedgerRow};
pub use stock::{NewStock, QualityLog, StockEntry, StockPage, StockSummary};
pub use window::Window;

pub mod entries;
mod error;
mod mirror;
mod report;
pub mod seed;
pub mod stock;
pub mod validate;
mod window;

pub type ResultLedger<T> = Result<T, LedgerError>;

/// The ledger over both dashboard tables.
///
/// Requests borrow the shared connection pool for their duration; mutual
/// exclusion between conflicting writes is left to the database's own
/// transaction isolation plus the unique index on `material_stock_id`.
#[derive(Clone, Debug)]
pub struct Ledger {
    database: DatabaseConnection,
}

impl Ledger {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    pub(crate) fn database(&self) -> &DatabaseConnection {
        &self.database
    }

    /// Inserts a user-created cashflow entry and returns the persisted row.
    pub async fn create_entry(&self, entry: NewEntry) -> ResultLedger<CashflowEntry> {
        let model = entries::ActiveModel::from(&entry)
            .insert(&self.database)
            .await?;
        CashflowEntry::try_from(model)
    }

    /// Updates an existing entry in place and returns the persisted row.
    ///
    /// The mirror back-reference is left untouched: editing a mirror row's
    /// date or amount by hand does not detach it from its stock entry.
    pub async fn update_entry(&self, id: i64, entry: NewEntry) -> ResultLedger<CashflowEntry> {
        let existing = entries::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::NotFound("Entry".to_string()))?;

        let model = entries::ActiveModel {
            id: ActiveValue::Set(existing.id),
            date: ActiveValue::Set(entry.date),
            kind: ActiveValue::Set(entry.kind.as_str().to_string()),
            category: ActiveValue::Set(entry.category),
            description: ActiveValue::Set(entry.description),
            amount: ActiveValue::Set(entry.amount),
            material_stock_id: ActiveValue::NotSet,
        }
        .update(&self.database)
        .await?;

        CashflowEntry::try_from(model)
    }

    /// Deletes one entry; fails with not-found when no row matched.
    pub async fn delete_entry(&self, id: i64) -> ResultLedger<()> {
        let result = entries::Entity::delete_by_id(id).exec(&self.database).await?;
        if result.rows_affected == 0 {
            return Err(LedgerError::NotFound("Entry".to_string()));
        }
        Ok(())
    }

    /// Deletes a batch of entries in one statement.
    ///
    /// An empty set is an Ok no-op; ids without a matching row are silently
    /// ignored. Returns the number of rows removed.
    pub async fn delete_entries(&self, ids: &[i64]) -> ResultLedger<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entries::Entity::delete_many()
            .filter(entries::Column::Id.is_in(ids.iter().copied()))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected)
    }

    /// Looks up a single entry by id.
    pub async fn entry(&self, id: i64) -> ResultLedger<Option<CashflowEntry>> {
        let model = entries::Entity::find_by_id(id).one(&self.database).await?;
        model.map(CashflowEntry::try_from).transpose()
    }

    /// The mirror entry derived from a stock purchase, if any.
    pub async fn mirror_entry(&self, stock_id: i64) -> ResultLedger<Option<CashflowEntry>> {
        let model = entries::Entity::find()
            .filter(entries::Column::MaterialStockId.eq(stock_id))
            .one(&self.database)
            .await?;
        model.map(CashflowEntry::try_from).transpose()
    }

    /// Looks up a single stock entry by id.
    pub async fn stock_entry(&self, id: i64) -> ResultLedger<Option<StockEntry>> {
        let model = stock::Entity::find_by_id(id).one(&self.database).await?;
        Ok(model.map(StockEntry::from))
    }
}
