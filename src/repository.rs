//! Defines the transaction repository trait and its SQLite implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{
    Category, DbError, StorageError,
    category::create_category,
    transaction::{
        Transaction, TransactionBuilder, get_all_transactions, insert_transaction, resolve_date,
    },
};

/// Saves and retrieves transactions.
///
/// The transaction use cases only depend on this trait, so any storage engine
/// that implements it can be swapped in when the app is wired together.
pub trait TransactionRepository: Send + Sync {
    /// Save a validated transaction, creating its category if it does not exist yet.
    ///
    /// Returns the saved transaction with its new ID and resolved date.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, StorageError>;

    /// Retrieve all transactions ordered by date, oldest first.
    fn find(&self) -> Result<Vec<Transaction>, StorageError>;
}

impl<R: TransactionRepository + ?Sized> TransactionRepository for Arc<R> {
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, StorageError> {
        (**self).create(builder)
    }

    fn find(&self) -> Result<Vec<Transaction>, StorageError> {
        (**self).find()
    }
}

/// Stores transactions and their categories in a SQLite database.
///
/// The database must have been set up with [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionRepository {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionRepository {
    /// Create a new repository for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Create `category` unless a category with the same name already exists.
    ///
    /// # Errors
    /// Returns [StorageError::CreateCategoryFailed] if the category could not be written.
    pub fn create_category(&self, category: &Category) -> Result<(), StorageError> {
        let connection = self.lock();

        create_category(category, &connection)
            .map_err(|error| StorageError::CreateCategoryFailed(error.into()))
    }

    /// Lock the connection, recovering it if a thread panicked while holding it.
    ///
    /// Every write runs inside an SQL transaction that is rolled back when its
    /// guard is dropped during unwinding, so the connection is still usable.
    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("recovering database connection after a panic: {poisoned}");
            self.connection.clear_poison();
            poisoned.into_inner()
        })
    }
}

impl TransactionRepository for SQLiteTransactionRepository {
    /// Save a transaction and its category in one database transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [StorageError::CreateFailed] with [DbError::DateOutOfRange] if the date
    ///   cannot be represented in UTC, in which case nothing is written,
    /// - [StorageError::CreateCategoryFailed] if the category could not be written,
    ///   in which case the transaction row is not attempted,
    /// - or [StorageError::CreateFailed] if the transaction row could not be written.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, StorageError> {
        let date = resolve_date(builder.date)
            .ok_or(StorageError::CreateFailed(DbError::DateOutOfRange))?;

        let connection = self.lock();

        let tx = connection
            .unchecked_transaction()
            .map_err(|error| StorageError::CreateFailed(error.into()))?;

        create_category(&builder.category, &tx)
            .map_err(|error| StorageError::CreateCategoryFailed(error.into()))?;

        let transaction = insert_transaction(builder, date, &tx)
            .map_err(|error| StorageError::CreateFailed(error.into()))?;

        tx.commit()
            .map_err(|error| StorageError::CreateFailed(error.into()))?;

        Ok(transaction)
    }

    /// Retrieve all transactions joined with their category name, ordered by date.
    ///
    /// # Errors
    /// Returns [StorageError::FindFailed] if there is an SQL error.
    fn find(&self) -> Result<Vec<Transaction>, StorageError> {
        let connection = self.lock();

        get_all_transactions(&connection).map_err(|error| StorageError::FindFailed(error.into()))
    }
}
