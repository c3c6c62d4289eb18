//! A histogram of transactions by price range.

use axum::{Json, extract::State};
use rusqlite::{Connection, named_params};
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    AppState, Error,
    month::{MONTH_CONDITION, MonthFilter, MonthQuery},
};

/// The prices covered by a histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PriceRange {
    /// `price <= upper`
    AtMost(u32),
    /// `lower < price <= upper`
    Between(u32, u32),
    /// `price > lower`
    Above(u32),
}

/// A labelled price range in the histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PriceBucket {
    label: &'static str,
    range: PriceRange,
}

const fn bucket(label: &'static str, range: PriceRange) -> PriceBucket {
    PriceBucket { label, range }
}

/// The histogram buckets in display order.
///
/// Whole number boundaries belong to the lower bucket, e.g. 100 is in "0-100" and 101 is in
/// "101-200". Fractional prices between the labels fall in the higher bucket.
const PRICE_BUCKETS: [PriceBucket; 10] = [
    bucket("0-100", PriceRange::AtMost(100)),
    bucket("101-200", PriceRange::Between(100, 200)),
    bucket("201-300", PriceRange::Between(200, 300)),
    bucket("301-400", PriceRange::Between(300, 400)),
    bucket("401-500", PriceRange::Between(400, 500)),
    bucket("501-600", PriceRange::Between(500, 600)),
    bucket("601-700", PriceRange::Between(600, 700)),
    bucket("701-800", PriceRange::Between(700, 800)),
    bucket("801-900", PriceRange::Between(800, 900)),
    bucket("901-above", PriceRange::Above(900)),
];

impl PriceBucket {
    /// The SQL expression that counts the rows in this bucket.
    fn count_expression(&self) -> String {
        let condition = match self.range {
            PriceRange::AtMost(upper) => format!("price <= {upper}"),
            PriceRange::Between(lower, upper) => format!("price > {lower} AND price <= {upper}"),
            PriceRange::Above(lower) => format!("price > {lower}"),
        };

        format!("COUNT(CASE WHEN {condition} THEN 1 END)")
    }
}

/// The number of transactions in each price range.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartData {
    /// One count per bucket, in the order of the buckets.
    counts: [u32; PRICE_BUCKETS.len()],
}

impl BarChartData {
    /// Iterate over the bucket labels and their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        PRICE_BUCKETS
            .iter()
            .zip(self.counts.iter())
            .map(|(bucket, count)| (bucket.label, *count))
    }

    /// The count for the bucket with `label`, or `None` if there is no such bucket.
    pub fn get(&self, label: &str) -> Option<u32> {
        self.iter()
            .find(|(bucket_label, _)| *bucket_label == label)
            .map(|(_, count)| count)
    }
}

impl Serialize for BarChartData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PRICE_BUCKETS.len()))?;
        for (label, count) in self.iter() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

/// The response body for the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    /// The histogram, keyed by price range label.
    pub bar_chart_data: BarChartData,
}

/// Count the transactions matching `month` in each price range.
///
/// # Errors
/// Returns an [Error::SqlError] if the query fails.
pub fn get_bar_chart(month: &MonthFilter, connection: &Connection) -> Result<BarChart, Error> {
    let columns = PRICE_BUCKETS
        .iter()
        .map(PriceBucket::count_expression)
        .collect::<Vec<_>>()
        .join(", ");
    let query = format!("SELECT {columns} FROM transactions WHERE {MONTH_CONDITION}");

    let counts = connection.query_row(
        &query,
        named_params! { ":month": month.as_param() },
        |row| {
            let mut counts = [0; PRICE_BUCKETS.len()];
            for (i, count) in counts.iter_mut().enumerate() {
                *count = row.get(i)?;
            }
            Ok(counts)
        },
    )?;

    Ok(BarChart {
        bar_chart_data: BarChartData { counts },
    })
}

/// Get the number of transactions in each price range for a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<AppState>,
    query: MonthQuery,
) -> Result<Json<BarChart>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_bar_chart(&query.filter(), &connection).map(Json)
}
