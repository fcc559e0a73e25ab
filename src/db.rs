//! Sets up the application's database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{category::create_category_table, transaction::create_transaction_table};

/// Create all the tables for the domain models if they do not exist yet.
///
/// Also turns on foreign key enforcement for `connection`.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
