//! Categories classify transactions, e.g. "Food" or "Health".
//!
//! Categories are identified by their name and are created on demand the first
//! time a transaction uses them.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// The general class of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Category {
    /// The unique name of the category.
    pub name: String,
}

impl Category {
    /// Create a category with `name`.
    ///
    /// The name is not checked here, transactions with an empty category name
    /// are rejected by [crate::validate].
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

/// Insert `category` unless a category with the same name already exists.
///
/// Creating a category that already exists is not an error and leaves the
/// existing row untouched.
pub fn create_category(
    category: &Category,
    connection: &Connection,
) -> Result<(), rusqlite::Error> {
    let rows_affected = connection.execute(
        "INSERT INTO category (name) VALUES (?1) ON CONFLICT(name) DO NOTHING;",
        (&category.name,),
    )?;

    if rows_affected > 0 {
        tracing::debug!("Created category {:?}", category.name);
    }

    Ok(())
}

/// Create the category table in the database.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );",
        (),
    )?;

    Ok(())
}
