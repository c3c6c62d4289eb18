//! Sales Stats is a small JSON web service for exploring an e-commerce transaction dataset.
//!
//! The dataset is loaded from a remote JSON source into a local SQLite database, and the
//! library provides a REST API for listing transactions and computing monthly statistics,
//! a price histogram and a category breakdown.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod combined;
mod db;
mod endpoints;
mod ingest;
mod logging;
mod month;
mod not_found;
mod query_params;
mod report;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use ingest::DEFAULT_SOURCE_URL;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{Transaction, count_transactions, insert_transaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction source could not be reached, answered with an error
    /// status, or sent a body that is not a list of transactions.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not load transactions from the source: {0}")]
    SourceRequest(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The HTTP client for the transaction source could not be created.
    #[error("could not build the HTTP client: {0}")]
    HttpClient(String),

    /// A request or response body could not be read.
    #[error("could not read the message body: {0}")]
    BodyRead(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::SourceRequest(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::SourceRequest(reason) => {
                tracing::error!("Could not load transactions from the source: {reason}");
                let message = format!("could not load transactions from the source: {reason}");
                (StatusCode::BAD_GATEWAY, Json(json!({ "error": message }))).into_response()
            }
            // Database errors are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
