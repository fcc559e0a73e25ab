//! Defines the JSON endpoints for creating and listing transactions.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use crate::{
    AppState, Category,
    transaction::{
        Transaction, TransactionBuilder, TransactionCreator, TransactionId, TransactionLister,
        TransactionType,
    },
};

/// The state needed to create a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// The use case that validates and saves transactions.
    pub creator: Arc<dyn TransactionCreator>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            creator: state.transaction_creator.clone(),
        }
    }
}

/// The state needed to list transactions.
#[derive(Clone)]
pub struct ListTransactionsState {
    /// The use case that retrieves transactions.
    pub lister: Arc<dyn TransactionLister>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            lister: state.transaction_lister.clone(),
        }
    }
}

/// The request body for creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// The amount in the smallest currency unit.
    pub amount: i64,
    /// The type code: 1 for debit, 2 for credit and 3 for income.
    #[serde(rename = "type")]
    pub transaction_type: i64,
    /// The category name.
    pub category: String,
    /// When the transaction happened, defaults to now.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    /// An optional label.
    #[serde(default)]
    pub name: Option<String>,
}

impl From<TransactionRequest> for TransactionBuilder {
    fn from(request: TransactionRequest) -> Self {
        Transaction::build(
            request.amount,
            TransactionType::from_code(request.transaction_type),
            Category {
                name: request.category,
            },
        )
        .date(request.date)
        .name(request.name.as_deref().unwrap_or_default())
    }
}

/// A transaction as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// The ID assigned by the database.
    pub id: TransactionId,
    /// The amount in the smallest currency unit.
    pub amount: i64,
    /// The type code.
    #[serde(rename = "type")]
    pub transaction_type: i64,
    /// The category name.
    pub category: String,
    /// When the transaction happened, in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// The label, empty if none was given.
    pub name: String,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type.code(),
            category: transaction.category.name,
            date: transaction.date,
            name: transaction.name,
        }
    }
}

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the saved transaction on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("could not decode transaction payload: {rejection}");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!("could not decode payload: {}", rejection.body_text())
                })),
            )
                .into_response();
        }
    };

    match state.creator.create(request.into()) {
        Ok(transaction) => (
            StatusCode::CREATED,
            Json(TransactionResponse::from(transaction)),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler for listing all transactions, oldest first.
pub async fn list_transactions_endpoint(State(state): State<ListTransactionsState>) -> Response {
    match state.lister.list() {
        Ok(transactions) => {
            let transactions: Vec<TransactionResponse> =
                transactions.into_iter().map(Into::into).collect();

            (StatusCode::OK, Json(transactions)).into_response()
        }
        Err(error) => error.into_response(),
    }
}
