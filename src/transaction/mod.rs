//! Transactions from the sales dataset.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model
//! - Database functions for storing and searching transactions
//! - The handler for the transaction listing endpoint

mod core;
mod list_endpoint;
mod query;

pub use core::{Transaction, count_transactions, create_transaction_table, insert_transaction};
pub use list_endpoint::{ListQuery, TransactionList, get_transactions_endpoint, list_transactions};
