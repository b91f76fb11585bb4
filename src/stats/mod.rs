//! Stats module - aggregations, percentiles and price estimation

mod aggregate;
mod calculator;
mod estimator;

pub use aggregate::{Aggregator, HostSummary, PreviewRow};
pub use calculator::{BoxSummary, PriceSummary, StatsCalculator};
pub use estimator::{format_currency, PriceEstimator, PriceRecommendation, SimulatorInput};
