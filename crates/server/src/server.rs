use std::sync::Arc;

use axum::{Router, routing::get};

use crate::{cashflow, material};
use ledger::Ledger;

#[derive(Clone)]
pub struct ServerState {
    pub ledger: Arc<Ledger>,
}

/// Builds the dashboard API router.
///
/// Each resource lives on a single path with the verbs combined, so an
/// unsupported verb gets the automatic 405 with an `Allow` header instead of
/// a 404.
pub fn router(ledger: Ledger) -> Router {
    let state = ServerState {
        ledger: Arc::new(ledger),
    };

    Router::new()
        .route(
            "/api/cashflow",
            get(cashflow::list)
                .post(cashflow::create)
                .put(cashflow::update)
                .delete(cashflow::remove),
        )
        .route(
            "/api/material",
            get(material::list)
                .post(material::create)
                .put(material::update)
                .delete(material::remove),
        )
        .with_state(state)
}

pub async fn run(ledger: Ledger) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(ledger, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    ledger: Ledger,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ledger)).await
}

pub fn spawn_with_listener(
    ledger: Ledger,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(ledger, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
