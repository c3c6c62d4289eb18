//! A breakdown of transactions by category.

use axum::{Json, extract::State};
use rusqlite::{Connection, named_params};
use serde::Serialize;

use crate::{
    AppState, Error,
    month::{MONTH_CONDITION, MonthFilter, MonthQuery},
};

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    /// The category name.
    pub category: Option<String>,
    /// The number of transactions in the category.
    pub count: u32,
}

/// The response body for the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    /// One entry per category, ordered by category name.
    pub pie_chart_data: Vec<CategoryCount>,
}

/// Count the transactions matching `month` in each category.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_pie_chart(month: &MonthFilter, connection: &Connection) -> Result<PieChart, Error> {
    let query = format!(
        "SELECT category, COUNT(id)
        FROM transactions
        WHERE {MONTH_CONDITION}
        GROUP BY category
        ORDER BY category ASC"
    );

    let pie_chart_data = connection
        .prepare(&query)?
        .query_map(named_params! { ":month": month.as_param() }, |row| {
            Ok(CategoryCount {
                category: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    Ok(PieChart { pie_chart_data })
}

/// Get the number of transactions in each category for a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<AppState>,
    query: MonthQuery,
) -> Result<Json<PieChart>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_pie_chart(&query.filter(), &connection).map(Json)
}
