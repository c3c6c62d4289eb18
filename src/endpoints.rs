//! The API endpoint URIs.

/// The route for loading the third party dataset into the database.
pub const INITIALIZE_DATABASE: &str = "/initialize-database";
/// The route for listing and searching transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the monthly sales statistics.
pub const STATISTICS: &str = "/statistics";
/// The route for the price range histogram.
pub const BAR_CHART: &str = "/bar-chart";
/// The route for the category breakdown.
pub const PIE_CHART: &str = "/pie-chart";
/// The route that loads the dataset and returns every report at once.
pub const COMBINED_RESPONSE: &str = "/combined-response";
