//! Database initialization.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Create the application tables if they do not already exist.
///
/// This is safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        test_utils::sample_transaction,
        transaction::{count_transactions, insert_transaction},
    };

    use super::initialize;

    #[test]
    fn initialize_creates_transactions_table() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialize database");

        let table_count: u32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'transactions'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(table_count, 1);
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        insert_transaction(&sample_transaction(1, 10.0, "2021-03-01T10:00:00+05:30"), &conn)
            .unwrap();

        initialize(&conn).expect("Second initialization should succeed");

        assert_eq!(count_transactions(&conn).unwrap(), 1);
    }
}
