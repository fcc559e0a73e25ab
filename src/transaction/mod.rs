//! Transactions: the model, the create and list use cases and their HTTP endpoints.

mod core;
mod create;
mod endpoint;
mod list;

#[cfg(test)]
pub(crate) mod test_utils;

pub use self::core::{
    Transaction, TransactionBuilder, TransactionId, TransactionType, create_transaction_table,
    get_all_transactions, insert_transaction, resolve_date, validate,
};
pub use create::{CreateTransactionUseCase, TransactionCreator};
pub use endpoint::{
    TransactionRequest, TransactionResponse, create_transaction_endpoint,
    list_transactions_endpoint,
};
pub use list::{ListTransactionUseCase, TransactionLister};
