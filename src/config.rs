//! Dashboard configuration, optionally read from a JSON file.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    /// Distribution views only show prices strictly below this.
    pub price_ceiling: f64,
    pub top_n_choices: Vec<usize>,
    pub insights_top: usize,
    pub insights_price_range: [f64; 2],
    pub insights_reviews_range: [f64; 2],
    pub guest_range: [u32; 2],
    pub default_guests: u32,
    pub preview_rows: usize,
    pub currency_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("airbnb.csv"),
            price_ceiling: 600.0,
            top_n_choices: vec![3, 5, 10, 20, 50],
            insights_top: 10,
            insights_price_range: [0.0, 1000.0],
            insights_reviews_range: [0.0, 30.0],
            guest_range: [1, 10],
            default_guests: 2,
            preview_rows: 5,
            currency_symbol: "€".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.price_ceiling > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "price_ceiling must be positive, got {}",
                self.price_ceiling
            )));
        }
        if self.top_n_choices.is_empty() || self.top_n_choices.contains(&0) {
            return Err(ConfigError::Invalid(
                "top_n_choices must be a non-empty list of positive integers".to_string(),
            ));
        }
        let [min_guests, max_guests] = self.guest_range;
        if min_guests == 0 || min_guests > max_guests {
            return Err(ConfigError::Invalid(format!(
                "guest_range {:?} is not a valid range",
                self.guest_range
            )));
        }
        if !(min_guests..=max_guests).contains(&self.default_guests) {
            return Err(ConfigError::Invalid(format!(
                "default_guests {} is outside guest_range {:?}",
                self.default_guests, self.guest_range
            )));
        }
        Ok(())
    }

    /// The first N choice offered by the top hosts view.
    pub fn default_top_n(&self) -> NonZeroUsize {
        self.top_n_choices
            .iter()
            .find_map(|&n| NonZeroUsize::new(n))
            .unwrap_or(NonZeroUsize::MIN)
    }
}
