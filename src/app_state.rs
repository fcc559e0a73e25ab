//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    SQLiteTransactionRepository,
    db::initialize,
    transaction::{
        CreateTransactionUseCase, ListTransactionUseCase, TransactionCreator, TransactionLister,
    },
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The use case for creating transactions.
    pub transaction_creator: Arc<dyn TransactionCreator>,

    /// The use case for listing transactions.
    pub transaction_lister: Arc<dyn TransactionLister>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the
    /// domain models, then wire both use cases to a repository sharing the connection.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, rusqlite::Error> {
        initialize(&db_connection)?;

        let repository = SQLiteTransactionRepository::new(Arc::new(Mutex::new(db_connection)));

        Ok(Self::with_use_cases(
            Arc::new(CreateTransactionUseCase::new(repository.clone())),
            Arc::new(ListTransactionUseCase::new(repository)),
        ))
    }

    /// Create a new [AppState] from already constructed use cases.
    pub fn with_use_cases(
        transaction_creator: Arc<dyn TransactionCreator>,
        transaction_lister: Arc<dyn TransactionLister>,
    ) -> Self {
        Self {
            transaction_creator,
            transaction_lister,
        }
    }
}
