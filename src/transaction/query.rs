//! Database query helpers for searching transactions.

use rusqlite::{Connection, named_params};

use crate::month::{MONTH_CONDITION, MonthFilter};

use super::core::{Transaction, map_transaction_row};

/// A search over transactions.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionSearch {
    /// Text that must appear in the title, description or price.
    pub text: String,
    /// The month of sale to restrict results to.
    pub month: MonthFilter,
}

impl TransactionSearch {
    /// The `LIKE` pattern that matches `text` literally anywhere in a column.
    ///
    /// Wildcards in `text` are escaped with a backslash.
    fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.text.len() + 2);
        pattern.push('%');
        for c in self.text.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

fn search_condition() -> String {
    format!(
        "(title LIKE :pattern ESCAPE '\\' \
        OR description LIKE :pattern ESCAPE '\\' \
        OR price LIKE :pattern ESCAPE '\\') \
        AND {MONTH_CONDITION}"
    )
}

/// Get a page of transactions matching `search`, ordered by ID.
///
/// # Errors
/// Returns an error if the SQL query fails or a row cannot be mapped to a transaction.
pub(crate) fn search_transactions(
    search: &TransactionSearch,
    limit: u32,
    offset: u32,
    connection: &Connection,
) -> Result<Vec<Transaction>, rusqlite::Error> {
    let query = format!(
        "SELECT id, title, price, description, category, image, sold, dateOfSale \
        FROM transactions \
        WHERE {} \
        ORDER BY id ASC \
        LIMIT :limit OFFSET :offset",
        search_condition()
    );

    connection
        .prepare(&query)?
        .query_map(
            named_params! {
                ":pattern": search.like_pattern(),
                ":month": search.month.as_param(),
                ":limit": limit,
                ":offset": offset,
            },
            map_transaction_row,
        )?
        .collect()
}

/// Count every transaction matching `search`, ignoring paging.
///
/// # Errors
/// Returns an error if the SQL query fails.
pub(crate) fn count_matching_transactions(
    search: &TransactionSearch,
    connection: &Connection,
) -> Result<u32, rusqlite::Error> {
    let query = format!(
        "SELECT COUNT(id) FROM transactions WHERE {}",
        search_condition()
    );

    connection.query_row(
        &query,
        named_params! {
            ":pattern": search.like_pattern(),
            ":month": search.month.as_param(),
        },
        |row| row.get(0),
    )
}
