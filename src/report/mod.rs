//! Monthly reports over the sales dataset.
//!
//! This module contains:
//! - Sales statistics (total sale amount, sold and unsold counts)
//! - A histogram of transactions by price range
//! - A breakdown of transactions by category

mod bar_chart;
mod pie_chart;
mod statistics;

pub use bar_chart::{BarChart, get_bar_chart, get_bar_chart_endpoint};
pub use pie_chart::{PieChart, get_pie_chart, get_pie_chart_endpoint};
pub use statistics::{Statistics, get_statistics, get_statistics_endpoint};
