//! Aggregation Module
//! Grouping, ranking and projections over the listings table.

use crate::data::{Category, Listing, ListingTable, Metric};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::num::NonZeroUsize;

/// Number of listings owned by one host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostSummary {
    pub host_id: i64,
    pub host_name: String,
    pub listings: usize,
}

impl HostSummary {
    pub fn label(&self) -> String {
        Listing::host_label(self.host_id, &self.host_name)
    }
}

/// Table preview row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    pub name: String,
    pub neighbourhood_group: String,
    pub neighbourhood: String,
    pub price: f64,
    pub reviews_per_month: f64,
    pub last_review: String,
}

/// Pure aggregation functions. None of them cache; every call walks the table.
pub struct Aggregator;

impl Aggregator {
    /// Count listings per (host id, host name), in ascending key order.
    ///
    /// Listings missing either host field are skipped.
    pub fn host_counts(table: &ListingTable) -> Vec<HostSummary> {
        let mut groups: BTreeMap<(i64, &str), usize> = BTreeMap::new();

        for listing in table.iter() {
            if let (Some(id), Some(name)) = (listing.host_id, listing.host_name.as_deref()) {
                *groups.entry((id, name)).or_default() += 1;
            }
        }

        groups
            .into_iter()
            .map(|((host_id, host_name), listings)| HostSummary {
                host_id,
                host_name: host_name.to_string(),
                listings,
            })
            .collect()
    }

    /// Sort summaries by listing count, largest first. Ties keep their input order.
    pub fn rank_hosts(mut summaries: Vec<HostSummary>) -> Vec<HostSummary> {
        summaries.sort_by(|a, b| b.listings.cmp(&a.listings));
        summaries
    }

    /// First `min(n, len)` summaries.
    pub fn top_n(summaries: &[HostSummary], n: NonZeroUsize) -> &[HostSummary] {
        &summaries[..n.get().min(summaries.len())]
    }

    /// Prices grouped by a category value, keeping only prices strictly below `max_price`.
    ///
    /// Prices inside each group keep table order.
    pub fn price_by_category(
        table: &ListingTable,
        category: Category,
        max_price: f64,
    ) -> BTreeMap<String, Vec<f64>> {
        let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for listing in table.iter().filter(|l| l.price < max_price) {
            groups
                .entry(category.value_of(listing).to_string())
                .or_default()
                .push(listing.price);
        }

        groups
    }

    /// Listings sorted by `metric`, largest first, truncated to `n`.
    ///
    /// The sort is stable; missing values go last.
    pub fn top_by_metric(table: &ListingTable, metric: Metric, n: usize) -> Vec<&Listing> {
        let mut ranked: Vec<&Listing> = table.iter().collect();
        ranked.sort_by(|a, b| descending_nan_last(metric.value_of(a), metric.value_of(b)));
        ranked.truncate(n);
        ranked
    }

    /// Distinct values of a category in order of first appearance. Blank values are skipped.
    pub fn distinct_values(table: &ListingTable, category: Category) -> Vec<String> {
        let mut seen = HashSet::new();
        table
            .iter()
            .map(|l| category.value_of(l))
            .filter(|v| !v.is_empty() && seen.insert(*v))
            .map(str::to_string)
            .collect()
    }

    /// `[latitude, longitude]` of every listing in one neighbourhood group.
    pub fn map_points(table: &ListingTable, neighbourhood_group: &str) -> Vec<[f64; 2]> {
        table
            .iter()
            .filter(|l| l.neighbourhood_group == neighbourhood_group)
            .filter(|l| !l.latitude.is_nan() && !l.longitude.is_nan())
            .map(|l| [l.latitude, l.longitude])
            .collect()
    }

    /// `[x, y]` pairs of two metrics, grouped by a category value.
    pub fn scatter_by_category(
        table: &ListingTable,
        category: Category,
        x: Metric,
        y: Metric,
    ) -> BTreeMap<String, Vec<[f64; 2]>> {
        let mut groups: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();

        for listing in table.iter() {
            let (xv, yv) = (x.value_of(listing), y.value_of(listing));
            if xv.is_nan() || yv.is_nan() {
                continue;
            }
            groups
                .entry(category.value_of(listing).to_string())
                .or_default()
                .push([xv, yv]);
        }

        groups
    }

    /// First `rows` listings projected for the overview table.
    pub fn preview(table: &ListingTable, rows: usize) -> Vec<PreviewRow> {
        table
            .iter()
            .take(rows)
            .map(|l| PreviewRow {
                name: l.name.clone(),
                neighbourhood_group: l.neighbourhood_group.clone(),
                neighbourhood: l.neighbourhood.clone(),
                price: l.price,
                reviews_per_month: l.reviews_per_month,
                last_review: l.last_review_label(),
            })
            .collect()
    }
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_listing;
    use rstest::rstest;

    fn hosted(host_id: i64, host_name: &str) -> Listing {
        let mut l = test_listing("Sol", "Private room", 50.0);
        l.host_id = Some(host_id);
        l.host_name = Some(host_name.to_string());
        l
    }

    fn sample_hosts() -> ListingTable {
        ListingTable::from_iter([
            hosted(2, "Luis"),
            hosted(1, "Ana"),
            hosted(3, "Marta"),
            hosted(1, "Ana"),
            hosted(3, "Marta"),
            hosted(4, "Pablo"),
        ])
    }

    #[test]
    fn host_counts_groups_by_id_and_name() {
        let table = ListingTable::from_iter([hosted(1, "Ana"), hosted(1, "Ana"), hosted(2, "Luis")]);
        let counts = Aggregator::host_counts(&table);

        assert_eq!(
            counts,
            vec![
                HostSummary { host_id: 1, host_name: "Ana".into(), listings: 2 },
                HostSummary { host_id: 2, host_name: "Luis".into(), listings: 1 },
            ]
        );
        assert_eq!(counts[0].label(), "1 - Ana");
    }

    #[test]
    fn host_counts_skips_rows_without_host() {
        let mut anonymous = hosted(5, "x");
        anonymous.host_name = None;
        let mut no_id = hosted(6, "y");
        no_id.host_id = None;

        let table = ListingTable::from_iter([anonymous, no_id, hosted(1, "Ana")]);
        assert_eq!(Aggregator::host_counts(&table).len(), 1);
    }

    #[test]
    fn ranking_is_descending_and_stable_on_ties() {
        let ranked = Aggregator::rank_hosts(Aggregator::host_counts(&sample_hosts()));
        let ids: Vec<i64> = ranked.iter().map(|h| h.host_id).collect();
        // 1 and 3 tie at two listings, 2 and 4 at one; key order breaks ties.
        assert_eq!(ids, vec![1, 3, 2, 4]);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(3, 3)]
    #[case(4, 4)]
    #[case(50, 4)]
    fn top_n_length_is_bounded_by_distinct_hosts(#[case] n: usize, #[case] expected: usize) {
        let ranked = Aggregator::rank_hosts(Aggregator::host_counts(&sample_hosts()));
        let top = Aggregator::top_n(&ranked, NonZeroUsize::new(n).unwrap());
        assert_eq!(top.len(), expected);
    }

    #[test]
    fn price_by_category_excludes_prices_at_or_above_ceiling() {
        let table = ListingTable::from_iter([
            test_listing("Sol", "Private room", 40.0),
            test_listing("Sol", "Private room", 600.0),
            test_listing("Sol", "Entire home/apt", 599.99),
            test_listing("Sol", "Entire home/apt", 1200.0),
            test_listing("Sol", "Shared room", f64::NAN),
            test_listing("Sol", "Entire home/apt", 120.0),
        ]);

        let groups = Aggregator::price_by_category(&table, Category::RoomType, 600.0);
        assert!(groups.values().flatten().all(|&p| p < 600.0));
        assert_eq!(groups["Entire home/apt"], vec![599.99, 120.0]);
        assert_eq!(groups["Private room"], vec![40.0]);
        assert!(!groups.contains_key("Shared room"));
    }

    #[test]
    fn top_by_metric_is_stable_and_puts_missing_last() {
        let mut rows = Vec::new();
        for (name, reviews) in [("a", 1.0), ("b", f64::NAN), ("c", 3.0), ("d", 3.0), ("e", 2.0)] {
            let mut l = test_listing("Sol", "Private room", 10.0);
            l.name = name.to_string();
            l.reviews_per_month = reviews;
            rows.push(l);
        }
        let table = ListingTable::new(rows);

        let names: Vec<&str> = Aggregator::top_by_metric(&table, Metric::ReviewsPerMonth, 10)
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "d", "e", "a", "b"]);

        assert_eq!(Aggregator::top_by_metric(&table, Metric::ReviewsPerMonth, 2).len(), 2);
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let table = ListingTable::from_iter([
            test_listing("Sol", "Private room", 10.0),
            test_listing("Cortes", "Entire home/apt", 10.0),
            test_listing("Sol", "Entire home/apt", 10.0),
            test_listing("", "Private room", 10.0),
        ]);

        assert_eq!(
            Aggregator::distinct_values(&table, Category::Neighbourhood),
            vec!["Sol", "Cortes"]
        );
        assert_eq!(
            Aggregator::distinct_values(&table, Category::RoomType),
            vec!["Private room", "Entire home/apt"]
        );
    }

    #[test]
    fn map_points_filter_by_group_and_skip_missing_coordinates() {
        let mut other = test_listing("Sol", "Private room", 10.0);
        other.neighbourhood_group = "Retiro".to_string();
        let mut unplaced = test_listing("Sol", "Private room", 10.0);
        unplaced.latitude = f64::NAN;

        let table = ListingTable::from_iter([test_listing("Sol", "Private room", 10.0), other, unplaced]);
        assert_eq!(Aggregator::map_points(&table, "Centro"), vec![[40.4, -3.7]]);
        assert_eq!(Aggregator::map_points(&table, "Retiro").len(), 1);
        assert!(Aggregator::map_points(&table, "Nowhere").is_empty());
    }

    #[test]
    fn scatter_skips_pairs_with_missing_values() {
        let mut reviewed = test_listing("Sol", "Private room", 80.0);
        reviewed.reviews_per_month = 4.0;
        let table = ListingTable::from_iter([reviewed, test_listing("Sol", "Private room", 90.0)]);

        let groups =
            Aggregator::scatter_by_category(&table, Category::RoomType, Metric::Price, Metric::ReviewsPerMonth);
        assert_eq!(groups["Private room"], vec![[80.0, 4.0]]);
    }

    #[test]
    fn preview_takes_leading_rows() {
        let table = ListingTable::from_iter((0..8).map(|i| test_listing("Sol", "Private room", i as f64)));
        let rows = Aggregator::preview(&table, 5);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].price, 4.0);
        assert_eq!(rows[0].last_review, crate::data::MISSING_DATE_LABEL);
    }
}
