//! Shared helpers for tests.

#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, db::initialize, transaction::Transaction};

/// A source URL that refuses connections.
pub(crate) const UNREACHABLE_SOURCE_URL: &str = "http://127.0.0.1:9/product_transaction.json";

pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

pub(crate) fn sample_transaction(id: i64, price: f64, date_of_sale: &str) -> Transaction {
    Transaction {
        id,
        title: format!("Product #{id}"),
        price,
        description: format!("Description of product #{id}"),
        category: "electronics".to_owned(),
        image: format!("https://example.com/{id}.jpg"),
        sold: false,
        date_of_sale: date_of_sale.to_owned(),
    }
}

pub(crate) fn get_test_state(connection: Connection, source_url: &str) -> AppState {
    AppState {
        db_connection: Arc::new(Mutex::new(connection)),
        http_client: reqwest::Client::new(),
        source_url: source_url.to_owned(),
    }
}

/// Serve `transactions` as a JSON array from a local server and return its URL.
///
/// The server runs until the test's runtime shuts down.
pub(crate) async fn serve_transactions(transactions: Vec<Transaction>) -> String {
    use axum::{Json, Router, routing::get};

    let app = Router::new().route(
        "/product_transaction.json",
        get(move || async move { Json(transactions) }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test source server");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/product_transaction.json")
}
