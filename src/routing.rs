//! Application router configuration.

use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    combined::get_combined_response_endpoint,
    endpoints,
    ingest::get_initialize_database_endpoint,
    logging::logging_middleware,
    not_found::get_404_not_found,
    report::{get_bar_chart_endpoint, get_pie_chart_endpoint, get_statistics_endpoint},
    transaction::get_transactions_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::INITIALIZE_DATABASE,
            get(get_initialize_database_endpoint),
        )
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(
            endpoints::COMBINED_RESPONSE,
            get(get_combined_response_endpoint),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
