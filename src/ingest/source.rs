//! Fetching transactions from the remote source and storing them.

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{Transaction, insert_transaction},
};

/// The URL of the third party transaction dataset.
pub const DEFAULT_SOURCE_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The outcome of storing a batch of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestSummary {
    /// The number of new transactions.
    pub inserted: usize,
    /// The number of transactions whose ID was already in the database.
    pub skipped: usize,
}

/// Download the list of transactions at `url`.
///
/// The whole body is read into memory before it is parsed.
///
/// # Errors
/// Returns an [Error::SourceRequest] if the request fails, the response has an error status,
/// or the body is not a JSON list of transactions.
pub async fn fetch_transactions(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Transaction>, Error> {
    tracing::debug!(url, "Fetching transactions");

    let transactions = client
        .get(url)
        .send()
        .await
        .inspect_err(|error| tracing::warn!(url, %error, "Transaction source request failed"))?
        .error_for_status()?
        .json::<Vec<Transaction>>()
        .await?;

    tracing::debug!(url, count = transactions.len(), "Fetched transactions");

    Ok(transactions)
}

/// Insert each transaction in turn, skipping IDs that already exist.
///
/// The inserts are not wrapped in a single SQL transaction: if one fails, the transactions
/// before it stay in the database.
///
/// # Errors
/// Returns an [Error::SqlError] if an insert fails.
pub fn insert_transactions(
    transactions: &[Transaction],
    connection: &Connection,
) -> Result<IngestSummary, Error> {
    let mut summary = IngestSummary::default();

    for transaction in transactions {
        if insert_transaction(transaction, connection)? {
            summary.inserted += 1;
        } else {
            summary.skipped += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        test_utils::{
            UNREACHABLE_SOURCE_URL, get_test_connection, sample_transaction, serve_transactions,
        },
        transaction::count_transactions,
    };

    use super::{IngestSummary, fetch_transactions, insert_transactions};

    #[test]
    fn inserting_twice_does_not_duplicate_rows() {
        let conn = get_test_connection();
        let transactions = vec![
            sample_transaction(1, 10.0, "2021-03-01T10:00:00+05:30"),
            sample_transaction(2, 20.0, "2021-04-01T10:00:00+05:30"),
            sample_transaction(3, 30.0, "2021-05-01T10:00:00+05:30"),
        ];

        let first = insert_transactions(&transactions, &conn).unwrap();
        let second = insert_transactions(&transactions, &conn).unwrap();

        assert_eq!(
            first,
            IngestSummary {
                inserted: 3,
                skipped: 0
            }
        );
        assert_eq!(
            second,
            IngestSummary {
                inserted: 0,
                skipped: 3
            }
        );
        assert_eq!(count_transactions(&conn).unwrap(), 3);
    }

    #[tokio::test]
    async fn fetches_transactions_from_source() {
        let want = vec![
            sample_transaction(1, 10.0, "2021-03-01T10:00:00+05:30"),
            sample_transaction(2, 20.0, "2021-04-01T10:00:00+05:30"),
        ];
        let url = serve_transactions(want.clone()).await;

        let got = fetch_transactions(&reqwest::Client::new(), &url)
            .await
            .expect("Could not fetch transactions");

        assert_eq!(want, got);
    }

    #[tokio::test]
    async fn unreachable_source_is_an_error() {
        let result = fetch_transactions(&reqwest::Client::new(), UNREACHABLE_SOURCE_URL).await;

        assert!(
            matches!(result, Err(Error::SourceRequest(_))),
            "want source request error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn missing_dataset_is_an_error() {
        let url = serve_transactions(Vec::new()).await;
        let url = url.replace("product_transaction.json", "missing.json");

        let result = fetch_transactions(&reqwest::Client::new(), &url).await;

        assert!(
            matches!(result, Err(Error::SourceRequest(_))),
            "want source request error, got {result:?}"
        );
    }
}
