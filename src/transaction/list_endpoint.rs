//! The endpoint for listing and searching transactions.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{AppState, Error, month::MonthFilter, query_params::QueryParams};

use super::{
    core::Transaction,
    query::{TransactionSearch, count_matching_transactions, search_transactions},
};

/// The number of transactions returned when `limit` is not given.
const DEFAULT_LIMIT: u32 = 10;

/// The query string for the transaction listing.
///
/// All fields are kept as strings so that malformed values fall back to the defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListQuery {
    /// A month number such as "03", or empty for all months.
    pub month: String,
    /// Text to search for in the title, description and price.
    pub s_query: String,
    /// The maximum number of transactions to return.
    pub limit: Option<String>,
    /// The number of matching transactions to skip.
    pub offset: Option<String>,
}

impl ListQuery {
    pub(crate) fn from_params(params: &QueryParams) -> Self {
        Self {
            month: params.get("month").unwrap_or_default().to_owned(),
            s_query: params.get("s_query").unwrap_or_default().to_owned(),
            limit: params.get("limit").map(str::to_owned),
            offset: params.get("offset").map(str::to_owned),
        }
    }

    fn limit(&self) -> u32 {
        parse_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    fn offset(&self) -> u32 {
        parse_or(self.offset.as_deref(), 0)
    }

    pub(crate) fn month_filter(&self) -> MonthFilter {
        MonthFilter::parse(&self.month)
    }
}

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_params(&QueryParams::from_uri(&parts.uri)))
    }
}

fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// The number of transactions matching a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Total {
    /// The count, ignoring `limit` and `offset`.
    pub total: u32,
}

/// A page of transactions and the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionList {
    /// The transactions in the requested page, ordered by ID.
    pub transactions: Vec<Transaction>,
    /// The number of transactions across all pages.
    pub total: Total,
}

/// Get a page of transactions matching `query` and the total number of matches.
///
/// # Errors
/// Returns an [Error::SqlError] if a query fails.
pub fn list_transactions(
    query: &ListQuery,
    connection: &Connection,
) -> Result<TransactionList, Error> {
    let search = TransactionSearch {
        text: query.s_query.clone(),
        month: query.month_filter(),
    };

    let transactions = search_transactions(&search, query.limit(), query.offset(), connection)?;
    let total = count_matching_transactions(&search, connection)?;

    Ok(TransactionList {
        transactions,
        total: Total { total },
    })
}

/// List transactions, optionally filtered by month and search text.
pub async fn get_transactions_endpoint(
    State(state): State<AppState>,
    query: ListQuery,
) -> Result<Json<TransactionList>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    list_transactions(&query, &connection).map(Json)
}
