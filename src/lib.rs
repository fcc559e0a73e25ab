//! Tally is a small web service for recording debits, credits and income
//! against named categories.
//!
//! This library provides a JSON REST API backed by a SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod category;
mod config;
mod db;
mod endpoints;
mod error;
mod logging;
mod repository;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use category::Category;
pub use config::Config;
pub use db::initialize as initialize_db;
pub use error::{CreateError, DbError, Error, StorageError, ValidationError};
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_REQUEST_BODY_SIZE, logging_middleware};
pub use repository::{SQLiteTransactionRepository, TransactionRepository};
pub use routing::build_router;
pub use transaction::{
    CreateTransactionUseCase, ListTransactionUseCase, Transaction, TransactionBuilder,
    TransactionCreator, TransactionId, TransactionLister, TransactionRequest, TransactionResponse,
    TransactionType, validate,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
