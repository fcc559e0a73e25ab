//! The use case for recording a new transaction.

use crate::{
    Error, TransactionRepository,
    transaction::{Transaction, TransactionBuilder, validate},
};

/// Something that can create a transaction, used by the HTTP handlers.
pub trait TransactionCreator: Send + Sync {
    /// Validate and save a transaction.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error>;
}

/// Validates a transaction and saves it with a [TransactionRepository].
#[derive(Debug, Clone)]
pub struct CreateTransactionUseCase<R> {
    repository: R,
}

impl<R: TransactionRepository> CreateTransactionUseCase<R> {
    /// Create the use case on top of `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: TransactionRepository> TransactionCreator for CreateTransactionUseCase<R> {
    /// Validate `builder` and, if it is valid, save it.
    ///
    /// An invalid transaction is never passed to the repository.
    ///
    /// # Errors
    /// Returns [Error::CreateFailed] wrapping either the validation error or the
    /// storage error.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        validate(&builder).map_err(|error| Error::CreateFailed(error.into()))?;

        let transaction = self
            .repository
            .create(builder)
            .map_err(|error| Error::CreateFailed(error.into()))?;

        tracing::debug!("Created transaction {}", transaction.id);

        Ok(transaction)
    }
}
