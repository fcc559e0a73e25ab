//! Defines the error types for each layer of the app and how they are shown to API clients.
//!
//! Each layer wraps the error of the layer below it, so the display string of
//! an error reads as a causal chain, e.g.
//! `create failed: create category failed: database is locked`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// A transaction did not pass validation and was never sent to storage.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The amount was zero or negative.
    #[error("invalid amount")]
    InvalidAmount,

    /// The type code was not one of debit, credit or income.
    #[error("invalid type")]
    InvalidType,

    /// The category name was empty.
    #[error("invalid category")]
    InvalidCategory,

    /// The date cannot be represented in UTC.
    #[error("invalid date")]
    InvalidDate,
}

/// A failure talking to the database.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// An error reported by SQLite.
    #[error("{0}")]
    Sql(#[from] rusqlite::Error),

    /// The transaction date cannot be represented in UTC.
    #[error("date is out of range")]
    DateOutOfRange,
}

/// A storage failure tagged with the repository step that failed.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StorageError {
    /// The category could not be written, so the transaction was not attempted.
    #[error("create category failed: {0}")]
    CreateCategoryFailed(DbError),

    /// The transaction row could not be written.
    #[error("create transaction failed: {0}")]
    CreateFailed(DbError),

    /// The transactions could not be read.
    #[error("find transactions failed: {0}")]
    FindFailed(DbError),
}

/// The reason a transaction could not be created.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CreateError {
    /// The transaction was rejected before reaching storage.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The repository failed to persist the transaction.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The errors returned by the transaction use cases.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// Creating a transaction failed.
    #[error("create failed: {0}")]
    CreateFailed(CreateError),

    /// Listing transactions failed.
    #[error("list failed: {0}")]
    ListFailed(StorageError),
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::CreateFailed(CreateError::Validation(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
