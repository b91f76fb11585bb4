//! CSV Data Loader Module
//! Reads the listings CSV with Polars and materializes the listings table.

use crate::data::listing::{Listing, ListingTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Columns every listings file must provide.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "name",
    "host_id",
    "host_name",
    "neighbourhood_group",
    "neighbourhood",
    "room_type",
    "price",
    "latitude",
    "longitude",
    "reviews_per_month",
    "last_review",
];

/// Date layouts accepted for `last_review`, tried in order.
///
/// Ambiguous slash dates read month-first.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read listings file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Listings file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Loads listings CSV files into a [`ListingTable`].
pub struct ListingLoader;

impl ListingLoader {
    /// Load a listings CSV.
    ///
    /// Unparseable `last_review` cells become `None`; the row is kept.
    pub fn load(path: &Path) -> Result<ListingTable, LoadError> {
        let metadata = std::fs::metadata(path).map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(LoadError::Unreadable {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        info!("Loading listings from {}", path.display());
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let table = Self::from_dataframe(&df)?;
        info!("Loaded {} listings", table.len());
        Ok(table)
    }

    /// Build the table from an already collected DataFrame.
    pub fn from_dataframe(df: &DataFrame) -> Result<ListingTable, LoadError> {
        Self::check_columns(df)?;

        let names = Self::string_column(df, "name")?;
        let host_ids = Self::int_column(df, "host_id")?;
        let host_names = Self::string_column(df, "host_name")?;
        let groups = Self::string_column(df, "neighbourhood_group")?;
        let neighbourhoods = Self::string_column(df, "neighbourhood")?;
        let room_types = Self::string_column(df, "room_type")?;
        let prices = Self::float_column(df, "price")?;
        let latitudes = Self::float_column(df, "latitude")?;
        let longitudes = Self::float_column(df, "longitude")?;
        let reviews = Self::float_column(df, "reviews_per_month")?;
        let last_reviews = Self::string_column(df, "last_review")?;

        let mut coerced = 0usize;
        let mut rows = Vec::with_capacity(df.height());

        for i in 0..df.height() {
            let last_review = match last_reviews[i].as_deref() {
                Some(raw) => {
                    let parsed = normalize_date(raw);
                    if parsed.is_none() {
                        coerced += 1;
                        debug!("Row {}: unparseable last_review {:?}", i, raw);
                    }
                    parsed
                }
                None => None,
            };

            rows.push(Listing {
                name: names[i].clone().unwrap_or_default(),
                host_id: host_ids[i],
                host_name: host_names[i].clone(),
                neighbourhood_group: groups[i].clone().unwrap_or_default(),
                neighbourhood: neighbourhoods[i].clone().unwrap_or_default(),
                room_type: room_types[i].clone().unwrap_or_default(),
                price: prices[i],
                latitude: latitudes[i],
                longitude: longitudes[i],
                reviews_per_month: reviews[i],
                last_review,
            });
        }

        if coerced > 0 {
            warn!("{} last_review values could not be parsed and were marked missing", coerced);
        }

        Ok(ListingTable::new(rows))
    }

    fn check_columns(df: &DataFrame) -> Result<(), LoadError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| df.get_column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoadError::MissingColumns(missing))
        }
    }

    fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoadError> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let ca = column.as_materialized_series().str()?;
        Ok(ca
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()))
            .collect())
    }

    fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, LoadError> {
        let column = df.column(name)?.cast(&DataType::Float64)?;
        let ca = column.as_materialized_series().f64()?;
        Ok(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>, LoadError> {
        let column = df.column(name)?.cast(&DataType::Int64)?;
        let ca = column.as_materialized_series().i64()?;
        Ok(ca.into_iter().collect())
    }
}

/// Parse a date-like cell into a calendar date. `None` when no layout matches.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
