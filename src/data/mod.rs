//! Data module - listings model and CSV loading

mod listing;
mod loader;

pub use listing::{Category, Listing, ListingTable, Metric};
pub use loader::ListingLoader;

#[cfg(test)]
pub(crate) use listing::{tests::listing as test_listing, MISSING_DATE_LABEL};
