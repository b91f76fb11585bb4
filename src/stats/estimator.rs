//! Price Estimator Module
//! Recommends a price range from comparable listings.

use crate::data::ListingTable;
use crate::stats::calculator::{EmptyResult, PriceQuantiles, StatsCalculator};
use serde::Serialize;

/// What the simulator asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulatorInput {
    pub area: String,
    pub room_type: String,
    /// Shown back to the user only. It does not influence the estimate.
    pub guests: u32,
}

/// Formatted three-point price range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecommendation {
    pub input: SimulatorInput,
    pub quantiles: PriceQuantiles,
    pub lower: String,
    pub median: String,
    pub higher: String,
}

impl PriceRecommendation {
    pub fn headline(&self) -> String {
        format!(
            "For a {} in {} for {} guests:",
            self.input.room_type, self.input.area, self.input.guests
        )
    }
}

pub struct PriceEstimator;

impl PriceEstimator {
    /// Price quartiles of listings whose neighbourhood and room type both match exactly.
    pub fn estimate(
        table: &ListingTable,
        area: &str,
        room_type: &str,
    ) -> Result<PriceQuantiles, EmptyResult> {
        let prices: Vec<f64> = table
            .iter()
            .filter(|l| l.neighbourhood == area && l.room_type == room_type)
            .map(|l| l.price)
            .collect();

        StatsCalculator::quantiles(&prices)
    }

    /// Estimate for the simulator input, formatted with `currency_symbol`.
    pub fn recommend(
        table: &ListingTable,
        input: &SimulatorInput,
        currency_symbol: &str,
    ) -> Result<PriceRecommendation, EmptyResult> {
        let quantiles = Self::estimate(table, &input.area, &input.room_type)?;

        Ok(PriceRecommendation {
            input: input.clone(),
            quantiles,
            lower: format_currency(quantiles.lower, currency_symbol),
            median: format_currency(quantiles.median, currency_symbol),
            higher: format_currency(quantiles.upper, currency_symbol),
        })
    }
}

pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, value)
}
