//! The use case for listing all transactions.

use crate::{Error, TransactionRepository, transaction::Transaction};

/// Something that can list transactions, used by the HTTP handlers.
pub trait TransactionLister: Send + Sync {
    /// Retrieve every transaction, oldest first.
    fn list(&self) -> Result<Vec<Transaction>, Error>;
}

/// Lists transactions from a [TransactionRepository].
#[derive(Debug, Clone)]
pub struct ListTransactionUseCase<R> {
    repository: R,
}

impl<R: TransactionRepository> ListTransactionUseCase<R> {
    /// Create the use case on top of `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: TransactionRepository> TransactionLister for ListTransactionUseCase<R> {
    /// Return the transactions in the order the repository gives them.
    ///
    /// # Errors
    /// Returns [Error::ListFailed] if the repository fails.
    fn list(&self) -> Result<Vec<Transaction>, Error> {
        self.repository.find().map_err(Error::ListFailed)
    }
}
