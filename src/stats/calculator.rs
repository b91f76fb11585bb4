//! Statistics Calculator Module
//! Percentiles, price quartiles and describe-style summaries.

use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;

/// A filter combination matched no priced listing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No data for this selection")]
pub struct EmptyResult;

/// 25th / 50th / 75th percentile of a price sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuantiles {
    pub lower: f64,
    pub median: f64,
    pub upper: f64,
}

/// Count, moments and extremes of a sample alongside its quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub quartiles: PriceQuantiles,
}

/// Box-and-whisker geometry with Tukey (1.5 IQR) whiskers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSummary {
    pub whisker_low: f64,
    pub quartiles: PriceQuantiles,
    pub whisker_high: f64,
    pub count: usize,
}

/// Handles statistical calculations over price samples.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Quartiles of `values`, ignoring NaN entries.
    pub fn quantiles(values: &[f64]) -> Result<PriceQuantiles, EmptyResult> {
        let sorted = Self::sorted_finite(values);
        if sorted.is_empty() {
            return Err(EmptyResult);
        }

        Ok(Self::quartiles_of_sorted(&sorted))
    }

    /// Describe-style summary of `values`, ignoring NaN entries.
    pub fn describe(values: &[f64]) -> Result<PriceSummary, EmptyResult> {
        let sorted = Self::sorted_finite(values);
        if sorted.is_empty() {
            return Err(EmptyResult);
        }

        Ok(PriceSummary {
            count: sorted.len(),
            mean: sorted.iter().mean(),
            std: sorted.iter().std_dev(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            quartiles: Self::quartiles_of_sorted(&sorted),
        })
    }

    /// Box geometry for one group of a distribution view.
    pub fn box_summary(values: &[f64]) -> Result<BoxSummary, EmptyResult> {
        let sorted = Self::sorted_finite(values);
        if sorted.is_empty() {
            return Err(EmptyResult);
        }

        let quartiles = Self::quartiles_of_sorted(&sorted);
        let iqr = quartiles.upper - quartiles.lower;
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= quartiles.lower - 1.5 * iqr)
            .unwrap_or(quartiles.lower);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= quartiles.upper + 1.5 * iqr)
            .unwrap_or(quartiles.upper);

        Ok(BoxSummary {
            whisker_low,
            quartiles,
            whisker_high,
            count: sorted.len(),
        })
    }

    /// Calculate percentile using linear interpolation between closest ranks.
    ///
    /// `sorted_values` must be ascending and non-empty.
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    fn quartiles_of_sorted(sorted: &[f64]) -> PriceQuantiles {
        PriceQuantiles {
            lower: Self::percentile(sorted, 25.0),
            median: Self::percentile(sorted, 50.0),
            upper: Self::percentile(sorted, 75.0),
        }
    }

    fn sorted_finite(values: &[f64]) -> Vec<f64> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn three_point_sample_interpolates_between_ranks() {
        let q = StatsCalculator::quantiles(&[300.0, 100.0, 200.0]).unwrap();
        assert_eq!(q.lower, 150.0);
        assert_eq!(q.median, 200.0);
        assert_eq!(q.upper, 250.0);
    }

    #[test]
    fn empty_sample_is_empty_result() {
        assert_eq!(StatsCalculator::quantiles(&[]), Err(EmptyResult));
        assert_eq!(StatsCalculator::quantiles(&[f64::NAN]), Err(EmptyResult));
        assert_eq!(StatsCalculator::describe(&[]), Err(EmptyResult));
        assert_eq!(StatsCalculator::box_summary(&[]), Err(EmptyResult));
    }

    #[rstest]
    #[case(vec![42.0])]
    #[case(vec![5.0, 5.0, 5.0, 5.0])]
    #[case(vec![1.0, 1000.0])]
    #[case(vec![90.0, 12.5, 600.0, 33.0, 33.0, 71.0, 250.0])]
    #[case(vec![f64::NAN, 80.0, 20.0, f64::NAN, 50.0])]
    fn quartiles_are_ordered(#[case] values: Vec<f64>) {
        let q = StatsCalculator::quantiles(&values).unwrap();
        assert!(q.lower <= q.median, "{:?}", q);
        assert!(q.median <= q.upper, "{:?}", q);
    }

    #[test]
    fn single_value_collapses_quartiles() {
        let q = StatsCalculator::quantiles(&[75.0]).unwrap();
        assert_eq!((q.lower, q.median, q.upper), (75.0, 75.0, 75.0));
    }

    #[test]
    fn describe_matches_sample_statistics() {
        let summary = StatsCalculator::describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(summary.count, 8);
        assert!((summary.mean - 5.0).abs() < 1e-12);
        assert!((summary.std - 2.138_089_935_299_395).abs() < 1e-9);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.quartiles.median, 4.5);
    }

    #[test]
    fn box_whiskers_stop_at_outliers() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0, 100.0];
        let b = StatsCalculator::box_summary(&values).unwrap();
        assert_eq!(b.whisker_low, 10.0);
        assert_eq!(b.whisker_high, 14.0);
        assert_eq!(b.count, 6);
    }
}
