//! A hand-written fake repository for testing the transaction use cases.

use std::sync::Mutex;

use time::OffsetDateTime;

use crate::{
    StorageError, TransactionRepository,
    transaction::{Transaction, TransactionBuilder},
};

/// Keeps transactions in memory and can be told to fail the next call.
#[derive(Debug, Default)]
pub(crate) struct FakeRepository {
    create_calls: Mutex<Vec<TransactionBuilder>>,
    find_calls: Mutex<usize>,
    create_error: Mutex<Option<StorageError>>,
    find_error: Mutex<Option<StorageError>>,
    transactions: Mutex<Vec<Transaction>>,
}

impl FakeRepository {
    pub(crate) fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            ..Default::default()
        }
    }

    pub(crate) fn failing_create(error: StorageError) -> Self {
        Self {
            create_error: Mutex::new(Some(error)),
            ..Default::default()
        }
    }

    pub(crate) fn failing_find(error: StorageError) -> Self {
        Self {
            find_error: Mutex::new(Some(error)),
            ..Default::default()
        }
    }

    pub(crate) fn create_calls(&self) -> Vec<TransactionBuilder> {
        self.create_calls.lock().unwrap().clone()
    }

    pub(crate) fn find_calls(&self) -> usize {
        *self.find_calls.lock().unwrap()
    }
}

impl TransactionRepository for FakeRepository {
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, StorageError> {
        self.create_calls.lock().unwrap().push(builder.clone());

        if let Some(error) = self.create_error.lock().unwrap().take() {
            return Err(error);
        }

        let mut transactions = self.transactions.lock().unwrap();
        let transaction = Transaction {
            id: transactions.len() as i64 + 1,
            amount: builder.amount,
            transaction_type: builder.transaction_type,
            category: builder.category,
            date: builder.date.unwrap_or_else(OffsetDateTime::now_utc),
            name: builder.name,
        };
        transactions.push(transaction.clone());

        Ok(transaction)
    }

    fn find(&self) -> Result<Vec<Transaction>, StorageError> {
        *self.find_calls.lock().unwrap() += 1;

        if let Some(error) = self.find_error.lock().unwrap().take() {
            return Err(error);
        }

        Ok(self.transactions.lock().unwrap().clone())
    }
}
