//! Implements a struct that holds the state of the REST server.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// How long to wait for the transaction source before giving up.
const SOURCE_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The client used to download the transaction dataset.
    pub http_client: reqwest::Client,

    /// The URL of the JSON transaction dataset.
    pub source_url: String,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the transactions table if it
    /// does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the HTTP client cannot be
    /// built.
    pub fn new(db_connection: Connection, source_url: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let http_client = reqwest::Client::builder()
            .timeout(SOURCE_REQUEST_TIMEOUT)
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            http_client,
            source_url: source_url.to_owned(),
        })
    }
}
