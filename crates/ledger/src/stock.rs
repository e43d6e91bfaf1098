//! Material stock primitives.
//!
//! A stock entry records one timber delivery, split into a `super` and a
//! `rijek` quality log. Every stock entry is mirrored by exactly one expense
//! row in the cashflow ledger; see [`crate::mirror`].

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{Ledger, ResultLedger, error::LedgerError};

/// Page size used when the caller supplies no usable limit.
const DEFAULT_LIMIT: u64 = 6;

/// Counts, volume and price for one quality grade of a delivery.
///
/// `volume` is measurement data (cubic meters) and never participates in
/// currency arithmetic; prices stay integer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityLog {
    pub count: i32,
    pub volume: f64,
    pub price: i64,
}

/// A persisted material stock entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: i64,
    pub supplier: String,
    pub driver: String,
    pub origin: String,
    pub received_at: DateTime<Utc>,
    pub super_log: QualityLog,
    pub rijek_log: QualityLog,
}

/// A validated stock entry that has not been persisted yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewStock {
    pub supplier: String,
    pub driver: String,
    pub origin: String,
    pub received_at: DateTime<Utc>,
    pub super_log: QualityLog,
    pub rijek_log: QualityLog,
}

impl NewStock {
    /// Amount of the mirrored expense entry: the summed grade prices.
    /// `None` when the sum leaves the cashflow amount domain.
    pub fn mirror_amount(&self) -> Option<i64> {
        self.super_log.price.checked_add(self.rijek_log.price)
    }

    /// Ledger date of the mirrored entry (delivery day, time dropped).
    pub fn mirror_date(&self) -> NaiveDate {
        self.received_at.date_naive()
    }

    /// Synthesized description for the mirrored entry. Never user-supplied.
    pub fn mirror_description(&self) -> String {
        format!(
            "Log purchase from {} (driver {}, {}): {} super / {} rijek logs",
            self.supplier,
            self.driver,
            self.origin,
            self.super_log.count,
            self.rijek_log.count
        )
    }
}

/// Aggregates over the (optionally origin-filtered) stock table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub total_volume: f64,
    pub total_value: i64,
    pub total_logs: i64,
    pub total_super_volume: f64,
    pub total_rijek_volume: f64,
    pub all_origins: Vec<String>,
}

/// One page of stock entries plus table-wide aggregates.
#[derive(Clone, Debug, PartialEq)]
pub struct StockPage {
    pub entries: Vec<StockEntry>,
    pub summary: StockSummary,
    pub total_count: u64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stock_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub supplier: String,
    pub driver: String,
    pub origin: String,
    pub received_at: DateTimeUtc,
    pub super_count: i32,
    pub super_volume: f64,
    pub super_price: i64,
    pub rijek_count: i32,
    pub rijek_volume: f64,
    pub rijek_price: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&NewStock> for ActiveModel {
    fn from(stock: &NewStock) -> Self {
        Self {
            id: ActiveValue::NotSet,
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
    }
}

impl From<Model> for StockEntry {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            supplier: model.supplier,
            driver: model.driver,
            origin: model.origin,
            received_at: model.received_at,
            super_log: QualityLog {
                count: model.super_count,
                volume: model.super_volume,
                price: model.super_price,
            },
            rijek_log: QualityLog {
                count: model.rijek_count,
                volume: model.rijek_volume,
                price: model.rijek_price,
            },
        }
    }
}

impl Ledger {
    /// Returns one page of stock entries with the table-wide summary.
    ///
    /// The page, count, summary and distinct-origin reads are independent and
    /// issued concurrently; only all-complete matters.
    pub async fn stock_page(
        &self,
        page: u64,
        limit: u64,
        origin: Option<&str>,
    ) -> ResultLedger<StockPage> {
        let page = page.max(1);
        let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
        let offset = (page - 1) * limit;

        let mut entries_query = Entity::find()
            .order_by_desc(Column::ReceivedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .offset(offset);
        let mut count_query = Entity::find();
        if let Some(origin) = origin {
            // LIKE without wildcards: case-insensitive equality.
            entries_query = entries_query.filter(Column::Origin.like(origin));
            count_query = count_query.filter(Column::Origin.like(origin));
        }

        let (models, total_count, summary, origins) = tokio::try_join!(
            async { entries_query.all(self.database()).await.map_err(LedgerError::from) },
            async { count_query.count(self.database()).await.map_err(LedgerError::from) },
            self.stock_summary(origin),
            self.stock_origins(),
        )?;

        let mut summary = summary;
        summary.all_origins = origins;

        Ok(StockPage {
            entries: models.into_iter().map(StockEntry::from).collect(),
            summary,
            total_count,
        })
    }

    async fn stock_summary(&self, origin: Option<&str>) -> ResultLedger<StockSummary> {
        let backend = self.database().get_database_backend();
        let (filter, values) = match origin {
            Some(origin) => (" WHERE origin LIKE ?", vec![origin.into()]),
            None => ("", Vec::<Value>::new()),
        };
        let stmt = Statement::from_sql_and_values(
            backend,
            format!(
                "SELECT COALESCE(SUM(super_count), 0) AS super_count, \
                        COALESCE(SUM(rijek_count), 0) AS rijek_count, \
                        COALESCE(SUM(super_volume), 0) AS super_volume, \
                        COALESCE(SUM(rijek_volume), 0) AS rijek_volume, \
                        COALESCE(SUM(super_price), 0) AS super_price, \
                        COALESCE(SUM(rijek_price), 0) AS rijek_price \
                 FROM stock_entries{filter}"
            ),
            values,
        );

        let row = self.database().query_one(stmt).await?;
        let Some(row) = row else {
            return Ok(StockSummary::default());
        };

        let super_count: i64 = row.try_get("", "super_count").unwrap_or(0);
        let rijek_count: i64 = row.try_get("", "rijek_count").unwrap_or(0);
        let super_volume: f64 = row.try_get("", "super_volume").unwrap_or(0.0);
        let rijek_volume: f64 = row.try_get("", "rijek_volume").unwrap_or(0.0);
        let super_price: i64 = row.try_get("", "super_price").unwrap_or(0);
        let rijek_price: i64 = row.try_get("", "rijek_price").unwrap_or(0);

        Ok(StockSummary {
            total_volume: super_volume + rijek_volume,
            total_value: super_price + rijek_price,
            total_logs: super_count + rijek_count,
            total_super_volume: super_volume,
            total_rijek_volume: rijek_volume,
            all_origins: Vec::new(),
        })
    }

    async fn stock_origins(&self) -> ResultLedger<Vec<String>> {
        let backend = self.database().get_database_backend();
        let stmt = Statement::from_string(
            backend,
            "SELECT DISTINCT origin FROM stock_entries ORDER BY origin",
        );
        let rows = self.database().query_all(stmt).await?;
        let mut origins = Vec::with_capacity(rows.len());
        for row in rows {
            origins.push(row.try_get("", "origin")?);
        }
        Ok(origins)
    }
}
