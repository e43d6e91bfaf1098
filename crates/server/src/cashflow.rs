//! Handlers for `/api/cashflow`.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};
use api_types::cashflow::{
    BreakdownItem, CashflowQuery, CashflowResponse, EntryDelete, EntryDraft, EntryView, LogRow,
};
use ledger::{
    CashflowEntry, Window,
    validate::{EntryInput, validate_entry, validate_entry_update},
};

fn entry_input(draft: EntryDraft) -> EntryInput {
    EntryInput {
        id: draft.id,
        date: draft.date,
        kind: draft.kind,
        category: draft.category,
        description: draft.description,
        amount: draft.amount,
    }
}

fn entry_view(entry: CashflowEntry) -> EntryView {
    EntryView {
        id: entry.id,
        date: entry.date,
        kind: entry.kind.as_str().to_string(),
        category: entry.category,
        description: entry.description,
        amount: entry.amount,
        material_stock_id: entry.material_stock_id,
    }
}

fn breakdown_items(groups: Vec<ledger::Breakdown>) -> Vec<BreakdownItem> {
    groups
        .into_iter()
        .map(|group| BreakdownItem {
            category: group.category,
            amount: group.total,
        })
        .collect()
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CashflowQuery>,
) -> Result<Json<CashflowResponse>, ServerError> {
    let window = Window::from_query(
        query.period.as_deref(),
        query.from.as_deref(),
        query.to.as_deref(),
    );
    let report = state.ledger.cashflow_report(window).await?;

    let daily_log = report
        .daily_log
        .into_iter()
        .map(|row| LogRow {
            entry: entry_view(row.entry),
            running_balance: row.running_balance,
        })
        .collect();

    Ok(Json(CashflowResponse {
        daily_log,
        income: breakdown_items(report.income),
        expenses: breakdown_items(report.expenses),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    draft: Result<Json<EntryDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let Json(draft) = draft?;
    let entry = validate_entry(&entry_input(draft))?;
    let created = state.ledger.create_entry(entry).await?;
    Ok((StatusCode::CREATED, Json(entry_view(created))))
}

pub async fn update(
    State(state): State<ServerState>,
    draft: Result<Json<EntryDraft>, JsonRejection>,
) -> Result<Json<EntryView>, ServerError> {
    let Json(draft) = draft?;
    let (id, entry) = validate_entry_update(&entry_input(draft))?;
    let updated = state.ledger.update_entry(id, entry).await?;
    Ok(Json(entry_view(updated)))
}

/// `DELETE` accepts either a single `id` or a batch of `ids`. The batch wins
/// when both are present, and an empty batch succeeds without touching rows.
pub async fn remove(
    State(state): State<ServerState>,
    body: Result<Json<EntryDelete>, JsonRejection>,
) -> Result<StatusCode, ServerError> {
    let Json(body) = body?;
    if let Some(ids) = body.ids {
        state.ledger.delete_entries(&ids).await?;
        return Ok(StatusCode::NO_CONTENT);
    }

    match body.id {
        Some(id) => {
            state.ledger.delete_entry(id).await?;
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ServerError::Generic(
            "Invalid ID or IDs provided.".to_string(),
        )),
    }
}
