//! Idempotent demo seeding.
//!
//! Seeding is an explicit initialization step run once at startup when
//! enabled, never part of request handling. It is gated on both tables being
//! empty, so re-running it against an existing database is a no-op.

use chrono::NaiveDate;
use sea_orm::{PaginatorTrait, entity::prelude::*};

use crate::{
    Ledger, NewEntry, NewStock, QualityLog, ResultLedger,
    entries::{self, EntryKind},
    error::LedgerError,
    stock,
};

/// Seeds the demo dataset when the database is empty.
///
/// Cashflow rows are inserted directly; stock rows go through
/// [`Ledger::create_stock`] so their mirror entries exist from the start.
/// Returns whether anything was inserted.
pub async fn seed_demo(ledger: &Ledger) -> ResultLedger<bool> {
    let entry_count = entries::Entity::find().count(ledger.database()).await?;
    let stock_count = stock::Entity::find().count(ledger.database()).await?;
    if entry_count > 0 || stock_count > 0 {
        return Ok(false);
    }

    for entry in demo_entries() {
        ledger.create_entry(entry).await?;
    }
    for stock in demo_stock() {
        ledger.create_stock(stock).await?;
    }

    tracing::info!("seeded demo data");
    Ok(true)
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, LedgerError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| LedgerError::Validation("invalid seed date".to_string()))
}

fn demo_entries() -> Vec<NewEntry> {
    let rows = [
        (
            (2024, 5, 20),
            EntryKind::Income,
            "Sales",
            "Payment from PT. Maju Jaya for teak wood order #123",
            150_000_000,
        ),
        (
            (2024, 5, 20),
            EntryKind::Expense,
            "Operational",
            "Purchase of new saw blades and safety gear",
            7_500_000,
        ),
        (
            (2024, 5, 19),
            EntryKind::Expense,
            "Salary",
            "Monthly salary for production team",
            85_000_000,
        ),
        (
            (2024, 5, 18),
            EntryKind::Income,
            "Sales",
            "Down payment for custom furniture from Mr. Hartono",
            25_000_000,
        ),
        (
            (2024, 5, 18),
            EntryKind::Expense,
            "Utilities",
            "Electricity and water bill for the month",
            12_000_000,
        ),
    ];

    rows.into_iter()
        .filter_map(|((y, m, d), kind, category, description, amount)| {
            Some(NewEntry {
                date: date(y, m, d).ok()?,
                kind,
                category: category.to_string(),
                description: description.to_string(),
                amount,
                material_stock_id: None,
            })
        })
        .collect()
}

fn demo_stock() -> Vec<NewStock> {
    let rows = [
        (
            "PT Jati Unggul",
            "Budi Santoso",
            "Jawa",
            "2024-05-20T10:00:00Z",
            (50, 15.5, 75_000_000),
            (10, 2.1, 8_000_000),
        ),
        (
            "CV Rimba Lestari",
            "Agus Wijaya",
            "Kalimantan",
            "2024-05-19T14:30:00Z",
            (120, 30.2, 150_000_000),
            (25, 5.5, 20_000_000),
        ),
        (
            "UD Kayu Makmur",
            "Eko Prasetyo",
            "Sumatera",
            "2024-05-18T09:00:00Z",
            (75, 22.0, 110_000_000),
            (15, 3.0, 12_000_000),
        ),
    ];

    rows.into_iter()
        .filter_map(|(supplier, driver, origin, received_at, sup, rij)| {
            Some(NewStock {
                supplier: supplier.to_string(),
                driver: driver.to_string(),
                origin: origin.to_string(),
                received_at: received_at.parse().ok()?,
                super_log: QualityLog {
                    count: sup.0,
                    volume: sup.1,
                    price: sup.2,
                },
                rijek_log: QualityLog {
                    count: rij.0,
                    volume: rij.1,
                    price: rij.2,
                },
            })
        })
        .collect()
}
