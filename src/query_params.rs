//! Lenient query string parsing for the read endpoints.
//!
//! Unknown keys are ignored and a repeated key keeps its first value, so a query string never
//! causes a request to be rejected.

use axum::{extract::Query, http::Uri};

/// The key-value pairs of a request's query string, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Parse the query string of `uri`.
    ///
    /// Percent-decoding is lossy, so this does not fail.
    pub(crate) fn from_uri(uri: &Uri) -> Self {
        match Query::<Vec<(String, String)>>::try_from_uri(uri) {
            Ok(Query(pairs)) => Self(pairs),
            Err(error) => {
                tracing::debug!("ignoring unparsable query string {:?}: {error}", uri.query());
                Self::default()
            }
        }
    }

    /// The first value given for `key`.
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}
