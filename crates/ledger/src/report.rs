//! The ledger query engine.
//!
//! Computes, for a time window: the starting balance (signed sum of all
//! entries strictly before the window), the window's entries annotated with a
//! running balance, and the per-category income/expense breakdowns.
//!
//! Running balances are always derived on read from the chronological order
//! `(date ASC, id ASC)`, no matter which order the rows are returned in. The
//! id tie-break keeps same-day entries stable.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{QueryFilter, QueryOrder, Statement, entity::prelude::*};

use crate::{
    Ledger, ResultLedger,
    entries::{self, CashflowEntry, EntryKind},
    error::LedgerError,
    window::Window,
};

/// A window entry annotated with the balance after applying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerRow {
    pub entry: CashflowEntry,
    pub running_balance: i64,
}

/// Sum of amounts for one `(kind, category)` group inside the window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breakdown {
    pub category: String,
    pub total: i64,
}

/// The composed answer to a window query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CashflowReport {
    pub starting_balance: i64,
    /// Entries in storage display order (`date DESC, id DESC`), each carrying
    /// its running balance.
    pub daily_log: Vec<LedgerRow>,
    pub income: Vec<Breakdown>,
    pub expenses: Vec<Breakdown>,
}

/// Walks the entries chronologically and returns each entry's running
/// balance, keyed by id.
///
/// The computation order is fixed; the caller is free to present the rows in
/// any display order.
fn running_balances(starting_balance: i64, entries: &[CashflowEntry]) -> HashMap<i64, i64> {
    let mut chronological: Vec<&CashflowEntry> = entries.iter().collect();
    chronological.sort_by_key(|entry| (entry.date, entry.id));

    let mut balances = HashMap::with_capacity(entries.len());
    let mut balance = starting_balance;
    for entry in chronological {
        balance += entry.signed_amount();
        balances.insert(entry.id, balance);
    }
    balances
}

impl Ledger {
    /// Runs a window query against the ledger.
    ///
    /// The three reads (starting balance, detail rows, breakdown) are
    /// independent and issued concurrently; only all-complete matters.
    pub async fn cashflow_report(&self, window: Window) -> ResultLedger<CashflowReport> {
        self.cashflow_report_at(window, Utc::now().date_naive()).await
    }

    /// Same as [`Self::cashflow_report`] with an explicit "today" used to
    /// resolve relative periods.
    pub async fn cashflow_report_at(
        &self,
        window: Window,
        today: NaiveDate,
    ) -> ResultLedger<CashflowReport> {
        let lower = window.lower_bound(today);
        let upper = window.upper_bound();

        let (starting_balance, rows, groups) = tokio::try_join!(
            self.starting_balance(lower),
            self.window_entries(lower, upper),
            self.window_breakdown(lower, upper),
        )?;

        let balances = running_balances(starting_balance, &rows);
        let daily_log = rows
            .into_iter()
            .map(|entry| {
                let running_balance = balances.get(&entry.id).copied().unwrap_or(0);
                LedgerRow {
                    entry,
                    running_balance,
                }
            })
            .collect();

        let mut income = Vec::new();
        let mut expenses = Vec::new();
        for (kind, breakdown) in groups {
            match kind {
                EntryKind::Income => income.push(breakdown),
                EntryKind::Expense => expenses.push(breakdown),
            }
        }

        Ok(CashflowReport {
            starting_balance,
            daily_log,
            income,
            expenses,
        })
    }

    /// Signed sum of all entries strictly before `before`; zero when the
    /// window is unbounded below.
    async fn starting_balance(&self, before: Option<NaiveDate>) -> ResultLedger<i64> {
        let Some(before) = before else {
            return Ok(0);
        };

        let backend = self.database().get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT COALESCE(SUM(CASE WHEN kind = 'income' THEN amount ELSE -amount END), 0) \
             AS balance FROM cashflow_entries WHERE date < ?",
            vec![before.into()],
        );

        let row = self.database().query_one(stmt).await?;
        Ok(row
            .and_then(|row| row.try_get("", "balance").ok())
            .unwrap_or(0))
    }

    /// Window entries in storage display order (`date DESC, id DESC`).
    async fn window_entries(
        &self,
        lower: Option<NaiveDate>,
        upper: Option<NaiveDate>,
    ) -> ResultLedger<Vec<CashflowEntry>> {
        let mut query = entries::Entity::find()
            .order_by_desc(entries::Column::Date)
            .order_by_desc(entries::Column::Id);
        if let Some(lower) = lower {
            query = query.filter(entries::Column::Date.gte(lower));
        }
        if let Some(upper) = upper {
            query = query.filter(entries::Column::Date.lte(upper));
        }

        let models = query.all(self.database()).await.map_err(LedgerError::from)?;
        models.into_iter().map(CashflowEntry::try_from).collect()
    }

    async fn window_breakdown(
        &self,
        lower: Option<NaiveDate>,
        upper: Option<NaiveDate>,
    ) -> ResultLedger<Vec<(EntryKind, Breakdown)>> {
        let backend = self.database().get_database_backend();

        let mut clauses = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if let Some(lower) = lower {
            clauses.push("date >= ?");
            values.push(lower.into());
        }
        if let Some(upper) = upper {
            clauses.push("date <= ?");
            values.push(upper.into());
        }
        let filter = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let stmt = Statement::from_sql_and_values(
            backend,
            format!(
                "SELECT kind, category, COALESCE(SUM(amount), 0) AS total \
                 FROM cashflow_entries{filter} GROUP BY kind, category"
            ),
            values,
        );

        let rows = self.database().query_all(stmt).await?;
        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            let kind: String = row.try_get("", "kind")?;
            let category: String = row.try_get("", "category")?;
            let total: i64 = row.try_get("", "total")?;
            groups.push((EntryKind::try_from(kind.as_str())?, Breakdown { category, total }));
        }
        Ok(groups)
    }
}
