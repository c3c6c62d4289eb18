//! The endpoint that loads the transaction dataset into the database.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{AppState, Error};

use super::source::{fetch_transactions, insert_transactions};

/// The message sent after the dataset has been loaded.
pub const INITIALIZED_MESSAGE: &str = "Initialized database with third party API";

/// The response body for a completed ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestMessage {
    /// A human readable status message.
    pub msg: String,
}

/// Download the dataset from the state's source URL and insert any new transactions.
///
/// The database lock is only taken once the download has finished.
///
/// # Errors
/// Returns an [Error::SourceRequest] if the dataset cannot be downloaded, or an
/// [Error::SqlError] or [Error::DatabaseLockError] if it cannot be stored.
pub async fn load_from_source(state: &AppState) -> Result<IngestMessage, Error> {
    let transactions = fetch_transactions(&state.http_client, &state.source_url).await?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let summary = insert_transactions(&transactions, &connection)?;

    tracing::info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Loaded transactions from {}",
        state.source_url
    );

    Ok(IngestMessage {
        msg: INITIALIZED_MESSAGE.to_owned(),
    })
}

/// Load the third party dataset into the database.
pub async fn get_initialize_database_endpoint(
    State(state): State<AppState>,
) -> Result<Json<IngestMessage>, Error> {
    load_from_source(&state).await.map(Json)
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{
            UNREACHABLE_SOURCE_URL, get_test_connection, get_test_state, sample_transaction,
            serve_transactions,
        },
        transaction::count_transactions,
    };

    use super::get_initialize_database_endpoint;

    #[tokio::test]
    async fn initialize_loads_source_once() {
        let url = serve_transactions(vec![
            sample_transaction(1, 10.0, "2021-03-01T10:00:00+05:30"),
            sample_transaction(2, 20.0, "2021-04-01T10:00:00+05:30"),
        ])
        .await;
        let state = get_test_state(get_test_connection(), &url);
        let app = Router::new()
            .route(
                endpoints::INITIALIZE_DATABASE,
                get(get_initialize_database_endpoint),
            )
            .with_state(state.clone());
        let server = TestServer::new(app).expect("Could not create test server.");

        for _ in 0..2 {
            let response = server.get(endpoints::INITIALIZE_DATABASE).await;

            response.assert_status_ok();
            assert_eq!(
                response.json::<Value>(),
                json!({ "msg": "Initialized database with third party API" })
            );
        }

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 2);
    }

    #[tokio::test]
    async fn initialize_fails_when_source_is_unreachable() {
        let app = Router::new()
            .route(
                endpoints::INITIALIZE_DATABASE,
                get(get_initialize_database_endpoint),
            )
            .with_state(get_test_state(get_test_connection(), UNREACHABLE_SOURCE_URL));
        let server = TestServer::new(app).expect("Could not create test server.");

        let response = server
            .get(endpoints::INITIALIZE_DATABASE)
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
    }
}
