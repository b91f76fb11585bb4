//! Listing Model Module
//! Row type, the immutable listings table and the closed sets of column identifiers.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Label shown in place of a last-review date that could not be parsed.
pub const MISSING_DATE_LABEL: &str = "n/a";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Unknown category column: {0}")]
    UnknownCategory(String),
    #[error("Unknown metric column: {0}")]
    UnknownMetric(String),
}

/// One rental unit record.
///
/// Missing numeric cells are carried as `f64::NAN`; a listing without
/// both host fields takes no part in host rankings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub name: String,
    pub host_id: Option<i64>,
    pub host_name: Option<String>,
    pub neighbourhood_group: String,
    pub neighbourhood: String,
    pub room_type: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub reviews_per_month: f64,
    pub last_review: Option<NaiveDate>,
}

impl Listing {
    /// Canonical `YYYY-MM-DD` form of the last review, or the missing marker.
    pub fn last_review_label(&self) -> String {
        self.last_review
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| MISSING_DATE_LABEL.to_string())
    }

    /// Host label used by the ranking view: `"<id> - <name>"`.
    pub fn host_label(host_id: i64, host_name: &str) -> String {
        format!("{} - {}", host_id, host_name)
    }
}

/// All listings of a dashboard session. Built once at startup, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    rows: Vec<Listing>,
}

impl ListingTable {
    pub fn new(rows: Vec<Listing>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.rows.iter()
    }
}

impl FromIterator<Listing> for ListingTable {
    fn from_iter<I: IntoIterator<Item = Listing>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Categorical grouping attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    NeighbourhoodGroup,
    Neighbourhood,
    RoomType,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::NeighbourhoodGroup,
        Category::Neighbourhood,
        Category::RoomType,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Category::NeighbourhoodGroup => "neighbourhood_group",
            Category::Neighbourhood => "neighbourhood",
            Category::RoomType => "room_type",
        }
    }

    pub fn value_of(self, listing: &Listing) -> &str {
        match self {
            Category::NeighbourhoodGroup => &listing.neighbourhood_group,
            Category::Neighbourhood => &listing.neighbourhood,
            Category::RoomType => &listing.room_type,
        }
    }
}

impl FromStr for Category {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.column_name() == s)
            .ok_or_else(|| ColumnError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Numeric attributes that listings can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Price,
    Latitude,
    Longitude,
    ReviewsPerMonth,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Price,
        Metric::Latitude,
        Metric::Longitude,
        Metric::ReviewsPerMonth,
    ];

    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::Latitude => "latitude",
            Metric::Longitude => "longitude",
            Metric::ReviewsPerMonth => "reviews_per_month",
        }
    }

    pub fn value_of(self, listing: &Listing) -> f64 {
        match self {
            Metric::Price => listing.price,
            Metric::Latitude => listing.latitude,
            Metric::Longitude => listing.longitude,
            Metric::ReviewsPerMonth => listing.reviews_per_month,
        }
    }
}

impl FromStr for Metric {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column_name() == s)
            .ok_or_else(|| ColumnError::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
