//! Defines the core data models, validation and database queries for transactions.

use rusqlite::{Connection, Row, types::Type};
use time::{OffsetDateTime, UtcOffset};

use crate::{Category, ValidationError};

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs in the database.
pub type TransactionId = i64;

/// The kind of money movement a transaction records.
///
/// Wraps the integer code used on the wire and in the database. Codes other
/// than [TransactionType::DEBIT], [TransactionType::CREDIT] and
/// [TransactionType::INCOME] can be represented but are rejected by [validate].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionType(i64);

impl TransactionType {
    /// Money that is subtracted.
    pub const DEBIT: Self = Self(1);
    /// Money that is subtracted the next month.
    pub const CREDIT: Self = Self(2);
    /// Money that is received.
    pub const INCOME: Self = Self(3);

    /// Wrap a raw type code without checking it.
    pub fn from_code(code: i64) -> Self {
        Self(code)
    }

    /// The integer code for this type.
    pub fn code(self) -> i64 {
        self.0
    }

    /// Whether the code is one of debit, credit or income.
    pub fn is_known(self) -> bool {
        matches!(self, Self::DEBIT | Self::CREDIT | Self::INCOME)
    }
}

/// Money received or spent that has been saved to the database.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID assigned by the database.
    pub id: TransactionId,
    /// The amount in the smallest currency unit, always positive.
    pub amount: i64,
    /// Whether this is a debit, credit or income.
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category: Category,
    /// When the transaction happened, in UTC.
    pub date: OffsetDateTime,
    /// An optional label, empty if not given.
    pub name: String,
}

impl Transaction {
    /// Start building a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: i64,
        transaction_type: TransactionType,
        category: Category,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            transaction_type,
            category,
            date: None,
            name: String::new(),
        }
    }
}

/// A transaction that has not been saved yet and may not be valid.
///
/// # Examples
///
/// ```ignore
/// use time::macros::datetime;
///
/// let builder = Transaction::build(5000, TransactionType::DEBIT, Category::new("Food"))
///     .date(Some(datetime!(2025-01-15 12:30 UTC)))
///     .name("Groceries");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The amount in the smallest currency unit. Must be greater than zero.
    pub amount: i64,

    /// Must be one of the known transaction types.
    pub transaction_type: TransactionType,

    /// The category, created on demand when the transaction is saved. Must
    /// have a non-empty name.
    pub category: Category,

    /// When the transaction happened.
    ///
    /// `None` means the current UTC time at the moment the transaction is saved.
    pub date: Option<OffsetDateTime>,

    /// A free text label, may be empty.
    pub name: String,
}

impl TransactionBuilder {
    /// Set the date of the transaction.
    pub fn date(mut self, date: Option<OffsetDateTime>) -> Self {
        self.date = date;
        self
    }

    /// Set the label of the transaction.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }
}

/// Check that a transaction has all of its required properties set.
///
/// The checks run in a fixed order and the first failure is returned:
/// amount, then type, then category, then date.
///
/// # Errors
/// This function will return a:
/// - [ValidationError::InvalidAmount] if the amount is zero or negative,
/// - [ValidationError::InvalidType] if the type is not debit, credit or income,
/// - [ValidationError::InvalidCategory] if the category name is empty,
/// - or [ValidationError::InvalidDate] if the date falls outside the range
///   supported in UTC.
pub fn validate(transaction: &TransactionBuilder) -> Result<(), ValidationError> {
    if transaction.amount <= 0 {
        return Err(ValidationError::InvalidAmount);
    }

    if !transaction.transaction_type.is_known() {
        return Err(ValidationError::InvalidType);
    }

    if transaction.category.name.is_empty() {
        return Err(ValidationError::InvalidCategory);
    }

    if transaction
        .date
        .is_some_and(|date| date.checked_to_offset(UtcOffset::UTC).is_none())
    {
        return Err(ValidationError::InvalidDate);
    }

    Ok(())
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a transaction row dated `date`, which should come from [resolve_date].
///
/// The category must already exist in the database. The date on `builder` is ignored.
///
/// # Errors
/// Returns an error if the row cannot be inserted, e.g. the category is missing.
pub fn insert_transaction(
    builder: TransactionBuilder,
    date: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, rusqlite::Error> {
    let description = (!builder.name.is_empty()).then_some(builder.name.as_str());

    connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, type, category, description, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, type, category, description, date",
        )?
        .query_row(
            (
                builder.amount,
                builder.transaction_type.code(),
                &builder.category.name,
                description,
                date,
            ),
            map_transaction_row,
        )
}

/// Retrieve all transactions with their category, oldest first.
///
/// Transactions with the same date are returned in the order they were saved.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, rusqlite::Error> {
    connection
        .prepare(
            "SELECT t.id, t.amount, t.type, c.name, t.description, t.date
             FROM \"transaction\" t
             INNER JOIN category c ON c.name = t.category
             ORDER BY t.date ASC, t.id ASC",
        )?
        .query_map([], map_transaction_row)?
        .collect()
}

/// Create the transaction table in the database.
///
/// The category table must be created first.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount INTEGER NOT NULL,
                type INTEGER NOT NULL,
                category TEXT NOT NULL,
                description TEXT,
                date TEXT NOT NULL,
                FOREIGN KEY(category) REFERENCES category(name) ON UPDATE CASCADE
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Use the given date in UTC, or the current UTC time if no date was given.
///
/// Returns `None` if the date cannot be represented in UTC, e.g. a date late on
/// 9999-12-31 with a negative offset.
pub fn resolve_date(date: Option<OffsetDateTime>) -> Option<OffsetDateTime> {
    match date {
        Some(date) => date.checked_to_offset(UtcOffset::UTC),
        None => Some(OffsetDateTime::now_utc()),
    }
}

/// Map a database row to a Transaction.
///
/// Expects the columns id, amount, type, category name, description and date.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let transaction_type = TransactionType::from_code(row.get(2)?);
    let category = Category { name: row.get(3)? };
    let name: Option<String> = row.get(4)?;
    let date = resolve_date(Some(row.get(5)?)).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, "date is out of range".into())
    })?;

    Ok(Transaction {
        id,
        amount,
        transaction_type,
        category,
        date,
        name: name.unwrap_or_default(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
