//! The endpoint that loads the dataset and returns every report in one response.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    AppState, Error,
    ingest::{IngestMessage, load_from_source},
    report::{BarChart, PieChart, Statistics, get_bar_chart, get_pie_chart, get_statistics},
    transaction::{ListQuery, TransactionList, list_transactions},
};

/// The bodies of the individual endpoints, keyed by what produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResponse {
    /// The result of loading the dataset.
    pub initialize: IngestMessage,
    /// The page of transactions matching the query.
    pub list_transactions: TransactionList,
    /// The sales statistics for the month.
    pub statistics: Statistics,
    /// The price histogram for the month.
    pub bar_chart: BarChart,
    /// The category breakdown for the month.
    pub pie_chart: PieChart,
}

/// Load the dataset, then run the listing and every report with the same month.
///
/// The steps run one after another and the first failure is returned; there are no partial
/// results.
///
/// # Errors
/// Returns the error of the first step that fails.
pub async fn get_combined_response(
    query: &ListQuery,
    state: &AppState,
) -> Result<CombinedResponse, Error> {
    let initialize = load_from_source(state).await?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let month = query.month_filter();

    Ok(CombinedResponse {
        initialize,
        list_transactions: list_transactions(query, &connection)?,
        statistics: get_statistics(&month, &connection)?,
        bar_chart: get_bar_chart(&month, &connection)?,
        pie_chart: get_pie_chart(&month, &connection)?,
    })
}

/// Load the dataset and return the listing, statistics, bar chart and pie chart together.
pub async fn get_combined_response_endpoint(
    State(state): State<AppState>,
    query: ListQuery,
) -> Result<Json<CombinedResponse>, Error> {
    get_combined_response(&query, &state).await.map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        build_router, endpoints,
        test_utils::{
            UNREACHABLE_SOURCE_URL, get_test_connection, get_test_state, sample_transaction,
            serve_transactions,
        },
        transaction::Transaction,
    };

    #[tokio::test]
    async fn combines_every_endpoint() {
        let url = serve_transactions(vec![
            Transaction {
                sold: true,
                category: "jewelery".to_owned(),
                ..sample_transaction(1, 100.0, "2021-03-01T10:00:00+05:30")
            },
            sample_transaction(2, 950.0, "2021-03-15T10:00:00+05:30"),
            sample_transaction(3, 150.0, "2021-07-01T10:00:00+05:30"),
        ])
        .await;
        let server = TestServer::new(build_router(get_test_state(get_test_connection(), &url)))
            .expect("Could not create test server.");

        let combined = server
            .get(endpoints::COMBINED_RESPONSE)
            .add_query_param("month", "03")
            .await;
        combined.assert_status_ok();
        let combined = combined.json::<Value>();

        assert_eq!(
            combined["initialize"],
            json!({ "msg": "Initialized database with third party API" })
        );
        for (key, endpoint) in [
            ("listTransactions", endpoints::TRANSACTIONS),
            ("statistics", endpoints::STATISTICS),
            ("barChart", endpoints::BAR_CHART),
            ("pieChart", endpoints::PIE_CHART),
        ] {
            let individual = server
                .get(endpoint)
                .add_query_param("month", "03")
                .await
                .json::<Value>();

            assert_eq!(combined[key], individual, "{key} differs from {endpoint}");
        }
        assert_eq!(combined["listTransactions"]["total"]["total"], 2);
        assert_eq!(combined["statistics"]["soldItems"]["count"], 1);
    }

    #[tokio::test]
    async fn fails_without_partial_results_when_source_is_unreachable() {
        let server = TestServer::new(build_router(get_test_state(
            get_test_connection(),
            UNREACHABLE_SOURCE_URL,
        )))
        .expect("Could not create test server.");

        let response = server
            .get(endpoints::COMBINED_RESPONSE)
            .expect_failure()
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body = response.json::<Value>();
        assert!(body.get("listTransactions").is_none());
        assert!(body.get("error").is_some());
    }
}
