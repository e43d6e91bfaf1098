//! Wire types shared by the server and its clients.
//!
//! Field casing follows the existing browser UI: camelCase response keys
//! (`dailyLog`, `runningBalance`, `totalCount`) and the legacy `type` /
//! `super` JSON keys. Drafts keep every field optional so the validator can
//! answer with a specific field-level message instead of a serde error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod cashflow {
    use super::*;

    /// Body of `POST`/`PUT /api/cashflow`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct EntryDraft {
        pub id: Option<i64>,
        pub date: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub amount: Option<i64>,
    }

    /// A persisted entry as returned by create/update.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: i64,
        pub date: NaiveDate,
        #[serde(rename = "type")]
        pub kind: String,
        pub category: String,
        pub description: String,
        pub amount: i64,
        #[serde(rename = "materialStockId", skip_serializing_if = "Option::is_none")]
        pub material_stock_id: Option<i64>,
    }

    /// Query string of `GET /api/cashflow`.
    #[derive(Clone, Debug, Default, Deserialize)]
    pub struct CashflowQuery {
        pub period: Option<String>,
        pub from: Option<String>,
        pub to: Option<String>,
    }

    /// One `dailyLog` row: the entry plus its running balance.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct LogRow {
        #[serde(flatten)]
        pub entry: EntryView,
        #[serde(rename = "runningBalance")]
        pub running_balance: i64,
    }

    /// One `(category, total)` group of the income/expense breakdown.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BreakdownItem {
        pub category: String,
        pub amount: i64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CashflowResponse {
        pub daily_log: Vec<LogRow>,
        pub income: Vec<BreakdownItem>,
        pub expenses: Vec<BreakdownItem>,
    }

    /// Body of `DELETE /api/cashflow`: a single id or a batch.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct EntryDelete {
        pub id: Option<i64>,
        pub ids: Option<Vec<i64>>,
    }
}

pub mod material {
    use super::*;

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct QualityDraft {
        pub count: Option<i64>,
        pub volume: Option<f64>,
        pub price: Option<i64>,
    }

    /// Body of `POST`/`PUT /api/material`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct StockDraft {
        pub id: Option<i64>,
        pub date: Option<String>,
        pub supplier: Option<String>,
        pub driver: Option<String>,
        pub origin: Option<String>,
        #[serde(rename = "super")]
        pub super_log: Option<QualityDraft>,
        pub rijek: Option<QualityDraft>,
    }

    #[derive(Clone, Copy, Debug, Serialize, Deserialize)]
    pub struct QualityView {
        pub count: i32,
        pub volume: f64,
        pub price: i64,
    }

    /// A persisted stock entry.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct StockView {
        pub id: i64,
        pub supplier: String,
        pub driver: String,
        pub origin: String,
        pub date: DateTime<Utc>,
        #[serde(rename = "super")]
        pub super_log: QualityView,
        pub rijek: QualityView,
    }

    /// Query string of `GET /api/material`.
    #[derive(Clone, Debug, Default, Deserialize)]
    pub struct MaterialQuery {
        pub page: Option<u64>,
        pub limit: Option<u64>,
        pub origin: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MaterialSummary {
        pub total_volume: f64,
        pub total_value: i64,
        pub total_logs: i64,
        pub total_super_volume: f64,
        pub total_rijek_volume: f64,
        pub all_origins: Vec<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MaterialResponse {
        pub entries: Vec<StockView>,
        pub summary: MaterialSummary,
        pub total_count: u64,
    }

    /// Body of `DELETE /api/material`.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct StockDelete {
        pub id: Option<i64>,
    }
}
