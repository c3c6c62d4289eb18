//! The month filter shared by the transaction queries.
//!
//! Transactions are filtered by the month of their sale date, ignoring the year.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use time::Month;

use crate::query_params::QueryParams;

/// SQL condition for the month filter, bound to the named parameter `:month`.
///
/// Use with [MonthFilter::as_param]. SQLite converts date-times with an offset to UTC before
/// taking the month.
pub(crate) const MONTH_CONDITION: &str =
    "(:month IS NULL OR strftime('%m', dateOfSale) = :month)";

/// Restricts rows to a calendar month regardless of year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthFilter {
    /// Match every row.
    AnyMonth,
    /// Match rows whose month, as SQLite formats it with `%m`, equals this token.
    Token(String),
}

impl MonthFilter {
    /// Parse the `month` query parameter.
    ///
    /// An empty string means any month. Numbers from 1 to 12, with or without a leading zero,
    /// are normalised to two digits. Anything else is kept as-is, so it matches no rows.
    pub(crate) fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if raw.is_empty() {
            return Self::AnyMonth;
        }

        match raw.parse::<u8>().ok().and_then(|n| Month::try_from(n).ok()) {
            Some(month) => Self::Token(format!("{:02}", month as u8)),
            None => Self::Token(raw.to_owned()),
        }
    }

    /// The value to bind to `:month` in [MONTH_CONDITION].
    pub(crate) fn as_param(&self) -> Option<&str> {
        match self {
            Self::AnyMonth => None,
            Self::Token(token) => Some(token),
        }
    }
}

/// Query string for endpoints that only take a month.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MonthQuery {
    /// A month number such as "03", or empty for all months.
    pub month: String,
}

impl MonthQuery {
    pub(crate) fn from_params(params: &QueryParams) -> Self {
        Self {
            month: params.get("month").unwrap_or_default().to_owned(),
        }
    }

    pub(crate) fn filter(&self) -> MonthFilter {
        MonthFilter::parse(&self.month)
    }
}

impl<S> FromRequestParts<S> for MonthQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_params(&QueryParams::from_uri(&parts.uri)))
    }
}
