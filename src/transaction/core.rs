//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

// ============================================================================
// MODELS
// ============================================================================

/// A product listing from the sales dataset and whether it was sold.
///
/// The JSON representation matches the field names used by the transaction source, e.g.
/// `dateOfSale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction, assigned by the source dataset.
    pub id: i64,
    /// The name of the product.
    pub title: String,
    /// The price of the product.
    pub price: f64,
    /// A text description of the product.
    pub description: String,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// A URL to an image of the product.
    pub image: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the sale happened, as an ISO 8601 date-time string.
    ///
    /// The string is stored as given so that SQLite's date functions can read the month.
    pub date_of_sale: String,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a transaction into the database, keeping its ID.
///
/// If a transaction with the same ID already exists, nothing is changed.
///
/// # Returns
/// `true` if the transaction was inserted, `false` if it was skipped.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn insert_transaction(
    transaction: &Transaction,
    connection: &Connection,
) -> Result<bool, rusqlite::Error> {
    let rows_changed = connection
        .prepare_cached(
            "INSERT OR IGNORE INTO transactions
             (id, title, price, description, category, image, sold, dateOfSale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?
        .execute((
            transaction.id,
            &transaction.title,
            transaction.price,
            &transaction.description,
            &transaction.category,
            &transaction.image,
            transaction.sold,
            &transaction.date_of_sale,
        ))?;

    Ok(rows_changed == 1)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return an error if there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, rusqlite::Error> {
    connection.query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
}

/// Create the transactions table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                title TEXT,
                price REAL,
                description TEXT,
                category TEXT,
                image TEXT,
                sold BOOLEAN,
                dateOfSale DATETIME
                )",
        (),
    )?;

    // Used by the category breakdown.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns in table order.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
