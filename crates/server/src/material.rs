//! Handlers for `/api/material`.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};
use api_types::material::{
    MaterialQuery, MaterialResponse, MaterialSummary, QualityDraft, QualityView, StockDelete,
    StockDraft, StockView,
};
use ledger::{
    StockEntry, StockSummary,
    validate::{QualityInput, StockInput, validate_stock, validate_stock_update},
};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 6;

fn quality_input(draft: QualityDraft) -> QualityInput {
    QualityInput {
        count: draft.count,
        volume: draft.volume,
        price: draft.price,
    }
}

fn stock_input(draft: StockDraft) -> StockInput {
    StockInput {
        id: draft.id,
        date: draft.date,
        supplier: draft.supplier,
        driver: draft.driver,
        origin: draft.origin,
        super_log: draft.super_log.map(quality_input),
        rijek_log: draft.rijek.map(quality_input),
    }
}

fn stock_view(entry: StockEntry) -> StockView {
    StockView {
        id: entry.id,
        supplier: entry.supplier,
        driver: entry.driver,
        origin: entry.origin,
        date: entry.received_at,
        super_log: QualityView {
            count: entry.super_log.count,
            volume: entry.super_log.volume,
            price: entry.super_log.price,
        },
        rijek: QualityView {
            count: entry.rijek_log.count,
            volume: entry.rijek_log.volume,
            price: entry.rijek_log.price,
        },
    }
}

fn summary_view(summary: StockSummary) -> MaterialSummary {
    MaterialSummary {
        total_volume: summary.total_volume,
        total_value: summary.total_value,
        total_logs: summary.total_logs,
        total_super_volume: summary.total_super_volume,
        total_rijek_volume: summary.total_rijek_volume,
        all_origins: summary.all_origins,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MaterialQuery>,
) -> Result<Json<MaterialResponse>, ServerError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let stock_page = state
        .ledger
        .stock_page(page, limit, query.origin.as_deref())
        .await?;

    Ok(Json(MaterialResponse {
        entries: stock_page.entries.into_iter().map(stock_view).collect(),
        summary: summary_view(stock_page.summary),
        total_count: stock_page.total_count,
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    draft: Result<Json<StockDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<StockView>), ServerError> {
    let Json(draft) = draft?;
    let stock = validate_stock(&stock_input(draft))?;
    let created = state.ledger.create_stock(stock).await?;
    Ok((StatusCode::CREATED, Json(stock_view(created))))
}

pub async fn update(
    State(state): State<ServerState>,
    draft: Result<Json<StockDraft>, JsonRejection>,
) -> Result<Json<StockView>, ServerError> {
    let Json(draft) = draft?;
    let (id, stock) = validate_stock_update(&stock_input(draft))?;
    let updated = state.ledger.update_stock(id, stock).await?;
    Ok(Json(stock_view(updated)))
}

pub async fn remove(
    State(state): State<ServerState>,
    body: Result<Json<StockDelete>, JsonRejection>,
) -> Result<StatusCode, ServerError> {
    let Json(body) = body?;
    let id = match body.id {
        Some(id) if id > 0 => id,
        _ => return Err(ServerError::Generic("Invalid or missing ID.".to_string())),
    };

    state.ledger.delete_stock(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
