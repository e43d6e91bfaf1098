use axum::{
    Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse,
};
use ledger::LedgerError;

use serde::Serialize;
pub use server::{router, run, run_with_listener, spawn_with_listener};

mod cashflow;
mod material;
mod server;

pub enum ServerError {
    Ledger(LedgerError),
    Generic(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

fn status_for_ledger_error(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::Validation(_) => StatusCode::BAD_REQUEST,
        LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
        LedgerError::Conflict(_) => StatusCode::CONFLICT,
        LedgerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_ledger_error(err: LedgerError) -> String {
    match err {
        // Storage detail stays in the server log.
        LedgerError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "An unexpected error occurred on the server.".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Ledger(err) => (
                status_for_ledger_error(&err),
                message_for_ledger_error(err),
            ),
            ServerError::Generic(message) => (StatusCode::BAD_REQUEST, message),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<LedgerError> for ServerError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}

impl From<JsonRejection> for ServerError {
    /// Undeserializable bodies (malformed JSON, out-of-range numbers) are
    /// caller errors; the serde detail stays in the server log.
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {}", rejection.body_text());
        Self::Generic("Invalid request body.".to_string())
    }
}
