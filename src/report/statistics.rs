//! Sales statistics for a month.

use axum::{Json, extract::State};
use rusqlite::{Connection, named_params};
use serde::Serialize;

use crate::{
    AppState, Error,
    month::{MONTH_CONDITION, MonthFilter, MonthQuery},
};

/// The sum of prices over the matching transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleAmount {
    /// `None` when no transactions match.
    pub total: Option<f64>,
}

/// A number of transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCount {
    /// The number of transactions.
    pub count: u32,
}

/// Sales statistics over the transactions in a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The total price of all matching transactions, sold or not.
    pub total_sale_amount: SaleAmount,
    /// The number of matching transactions that were sold.
    pub sold_items: ItemCount,
    /// The number of matching transactions that were not sold.
    pub not_sold_items: ItemCount,
}

/// Calculate the sales statistics for the transactions matching `month`.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_statistics(month: &MonthFilter, connection: &Connection) -> Result<Statistics, Error> {
    let query = format!(
        "SELECT
            SUM(price),
            COUNT(CASE WHEN sold = 1 THEN id END),
            COUNT(CASE WHEN sold = 0 THEN id END)
        FROM transactions
        WHERE {MONTH_CONDITION}"
    );

    let statistics = connection.query_row(
        &query,
        named_params! { ":month": month.as_param() },
        |row| {
            Ok(Statistics {
                total_sale_amount: SaleAmount { total: row.get(0)? },
                sold_items: ItemCount { count: row.get(1)? },
                not_sold_items: ItemCount { count: row.get(2)? },
            })
        },
    )?;

    Ok(statistics)
}

/// Get the total sale amount and the sold and unsold item counts for a month.
pub async fn get_statistics_endpoint(
    State(state): State<AppState>,
    query: MonthQuery,
) -> Result<Json<Statistics>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_statistics(&query.filter(), &connection).map(Json)
}
