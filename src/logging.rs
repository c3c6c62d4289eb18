//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// Bodies longer than this many bytes are truncated in the `info` log.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Bodies are passed on byte for byte. If a body cannot be read, the client gets an internal
/// server error instead.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => return error.into_response(),
    };
    log_request(&parts, &String::from_utf8_lossy(&bytes));

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => return error.into_response(),
    };
    log_response(&parts, &String::from_utf8_lossy(&bytes));

    Response::from_parts(parts, Body::from(bytes))
}

async fn read_body(body: Body) -> Result<Bytes, Error> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|error| Error::BodyRead(error.to_string()))
}

/// The longest prefix of `text` that is at most [LOG_BODY_LENGTH_LIMIT] bytes and ends on a
/// character boundary.
fn truncate(text: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn log_request(parts: &request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {}\nbody: {:}...",
            parts.method,
            parts.uri,
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {:}...",
            parts.status,
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, middleware, response::IntoResponse, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::Error;

    use super::{LOG_BODY_LENGTH_LIMIT, logging_middleware, read_body, truncate};

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn truncate_respects_character_boundaries() {
        let text = "é".repeat(LOG_BODY_LENGTH_LIMIT);

        let got = truncate(&text);

        assert!(got.len() <= LOG_BODY_LENGTH_LIMIT);
        assert!(text.starts_with(got));
    }

    #[tokio::test]
    async fn middleware_passes_body_through() {
        let long_body = "x".repeat(LOG_BODY_LENGTH_LIMIT * 2);
        let want = long_body.clone();
        let app = Router::new()
            .route("/", get(move || async move { long_body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app).expect("Could not create test server.");

        let response = server.get("/").await;

        response.assert_status_ok();
        assert_eq!(response.text(), want);
    }

    #[tokio::test]
    async fn middleware_keeps_non_utf8_bytes() {
        let bytes: &'static [u8] = &[0xff, 0xfe, b'a', 0x80];
        let app = Router::new()
            .route("/", get(move || async move { bytes }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app).expect("Could not create test server.");

        let response = server.get("/").await;

        response.assert_status_ok();
        assert_eq!(response.as_bytes().as_ref(), bytes);
    }

    #[tokio::test]
    async fn unreadable_body_is_an_internal_server_error() {
        let response = Error::BodyRead("connection reset".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_body(response.into_body()).await.unwrap();
        assert_eq!(
            serde_json::from_slice::<Value>(&body).unwrap(),
            json!({ "error": "internal server error" })
        );
    }
}
