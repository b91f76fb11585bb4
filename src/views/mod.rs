//! Views module - page selection and the data each page hands to the renderer.
//!
//! Dispatch is a plain function table keyed by [`Page`]. Handlers are
//! stateless: every call recomputes from the shared table.

use crate::config::DashboardConfig;
use crate::data::{Category, ListingTable, Metric};
use crate::stats::{
    Aggregator, BoxSummary, HostSummary, PreviewRow, PriceEstimator, PriceRecommendation,
    PriceSummary, SimulatorInput, StatsCalculator,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;
use tracing::debug;

/// Dashboard pages, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Page {
    Overview,
    TopHosts,
    PriceAnalysis,
    Maps,
    Insights,
    PriceSimulator,
}

pub type ViewHandler = fn(&ListingTable, &ViewParams, &DashboardConfig) -> ViewModel;

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Overview,
        Page::TopHosts,
        Page::PriceAnalysis,
        Page::Maps,
        Page::Insights,
        Page::PriceSimulator,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::TopHosts => "Top Hosts",
            Page::PriceAnalysis => "Price Analysis",
            Page::Maps => "Maps",
            Page::Insights => "Insights",
            Page::PriceSimulator => "Price Simulator",
        }
    }

    pub fn handler(self) -> ViewHandler {
        match self {
            Page::Overview => overview,
            Page::TopHosts => top_hosts,
            Page::PriceAnalysis => price_analysis,
            Page::Maps => maps,
            Page::Insights => insights,
            Page::PriceSimulator => price_simulator,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// User selections that parameterize the views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    pub top_n: NonZeroUsize,
    /// Neighbourhood group shown on the map; the first group in the data when unset.
    pub neighbourhood_group: Option<String>,
    /// Simulator selection; blank area or room type fall back to the first value in the data.
    pub simulator: SimulatorInput,
}

impl ViewParams {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            top_n: config.default_top_n(),
            neighbourhood_group: None,
            simulator: SimulatorInput {
                area: String::new(),
                room_type: String::new(),
                guests: config.default_guests,
            },
        }
    }
}

/// Prices of one category value plus its box geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDistribution {
    pub value: String,
    pub prices: Vec<f64>,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewedListing {
    pub name: String,
    pub neighbourhood: String,
    pub room_type: String,
    pub reviews_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state")]
pub enum SimulatorOutcome {
    Recommended(PriceRecommendation),
    NoData { input: SimulatorInput },
}

/// Precomputed content of one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page")]
pub enum ViewModel {
    Overview {
        total_listings: usize,
        rows: Vec<PreviewRow>,
        price: Option<PriceSummary>,
    },
    TopHosts {
        choices: Vec<usize>,
        hosts: Vec<HostSummary>,
    },
    PriceAnalysis {
        price_ceiling: f64,
        by_neighbourhood_group: Vec<CategoryDistribution>,
        by_room_type: Vec<CategoryDistribution>,
    },
    Maps {
        groups: Vec<String>,
        selected: Option<String>,
        points: Vec<[f64; 2]>,
    },
    Insights {
        top_reviewed: Vec<ReviewedListing>,
        price_vs_reviews: BTreeMap<String, Vec<[f64; 2]>>,
        price_range: [f64; 2],
        reviews_range: [f64; 2],
    },
    PriceSimulator {
        areas: Vec<String>,
        room_types: Vec<String>,
        guest_range: [u32; 2],
        outcome: SimulatorOutcome,
    },
}

/// Compute the view model for `page`.
pub fn dispatch(
    page: Page,
    table: &ListingTable,
    params: &ViewParams,
    config: &DashboardConfig,
) -> ViewModel {
    debug!("Building view {}", page);
    (page.handler())(table, params, config)
}

fn overview(table: &ListingTable, _params: &ViewParams, config: &DashboardConfig) -> ViewModel {
    let prices: Vec<f64> = table.iter().map(|l| l.price).collect();

    ViewModel::Overview {
        total_listings: table.len(),
        rows: Aggregator::preview(table, config.preview_rows),
        price: StatsCalculator::describe(&prices).ok(),
    }
}

fn top_hosts(table: &ListingTable, params: &ViewParams, config: &DashboardConfig) -> ViewModel {
    let ranked = Aggregator::rank_hosts(Aggregator::host_counts(table));

    ViewModel::TopHosts {
        choices: config.top_n_choices.clone(),
        hosts: Aggregator::top_n(&ranked, params.top_n).to_vec(),
    }
}

fn price_analysis(table: &ListingTable, _params: &ViewParams, config: &DashboardConfig) -> ViewModel {
    let distributions = |category: Category| -> Vec<CategoryDistribution> {
        Aggregator::price_by_category(table, category, config.price_ceiling)
            .into_iter()
            .filter_map(|(value, prices)| {
                let summary = StatsCalculator::box_summary(&prices).ok()?;
                Some(CategoryDistribution { value, prices, summary })
            })
            .collect()
    };

    ViewModel::PriceAnalysis {
        price_ceiling: config.price_ceiling,
        by_neighbourhood_group: distributions(Category::NeighbourhoodGroup),
        by_room_type: distributions(Category::RoomType),
    }
}

fn maps(table: &ListingTable, params: &ViewParams, _config: &DashboardConfig) -> ViewModel {
    let groups = Aggregator::distinct_values(table, Category::NeighbourhoodGroup);
    let selected = params
        .neighbourhood_group
        .clone()
        .or_else(|| groups.first().cloned());
    let points = selected
        .as_deref()
        .map(|group| Aggregator::map_points(table, group))
        .unwrap_or_default();

    ViewModel::Maps {
        groups,
        selected,
        points,
    }
}

fn insights(table: &ListingTable, _params: &ViewParams, config: &DashboardConfig) -> ViewModel {
    let top_reviewed = Aggregator::top_by_metric(table, Metric::ReviewsPerMonth, config.insights_top)
        .into_iter()
        .map(|l| ReviewedListing {
            name: l.name.clone(),
            neighbourhood: l.neighbourhood.clone(),
            room_type: l.room_type.clone(),
            reviews_per_month: l.reviews_per_month,
        })
        .collect();

    ViewModel::Insights {
        top_reviewed,
        price_vs_reviews: Aggregator::scatter_by_category(
            table,
            Category::RoomType,
            Metric::Price,
            Metric::ReviewsPerMonth,
        ),
        price_range: config.insights_price_range,
        reviews_range: config.insights_reviews_range,
    }
}

fn price_simulator(table: &ListingTable, params: &ViewParams, config: &DashboardConfig) -> ViewModel {
    let areas = Aggregator::distinct_values(table, Category::Neighbourhood);
    let room_types = Aggregator::distinct_values(table, Category::RoomType);

    let mut input = params.simulator.clone();
    if input.area.is_empty() {
        input.area = areas.first().cloned().unwrap_or_default();
    }
    if input.room_type.is_empty() {
        input.room_type = room_types.first().cloned().unwrap_or_default();
    }

    let outcome = match PriceEstimator::recommend(table, &input, &config.currency_symbol) {
        Ok(recommendation) => SimulatorOutcome::Recommended(recommendation),
        Err(_) => SimulatorOutcome::NoData { input },
    };

    ViewModel::PriceSimulator {
        areas,
        room_types,
        guest_range: config.guest_range,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{test_listing, Listing};
    use rstest::rstest;

    fn table() -> ListingTable {
        let mut rows: Vec<Listing> = vec![
            test_listing("Centro", "Entire home", 100.0),
            test_listing("Centro", "Entire home", 200.0),
            test_listing("Centro", "Entire home", 300.0),
            test_listing("Retiro", "Private room", 700.0),
        ];
        rows[3].neighbourhood_group = "Retiro".to_string();
        rows[3].host_id = Some(2);
        rows[3].host_name = Some("Luis".to_string());
        rows[1].reviews_per_month = 5.0;
        ListingTable::new(rows)
    }

    fn params() -> ViewParams {
        ViewParams::from_config(&DashboardConfig::default())
    }

    #[rstest]
    #[case(Page::Overview)]
    #[case(Page::TopHosts)]
    #[case(Page::PriceAnalysis)]
    #[case(Page::Maps)]
    #[case(Page::Insights)]
    #[case(Page::PriceSimulator)]
    fn each_page_builds_its_own_view(#[case] page: Page) {
        let view = dispatch(page, &table(), &params(), &DashboardConfig::default());
        let matches = matches!(
            (page, &view),
            (Page::Overview, ViewModel::Overview { .. })
                | (Page::TopHosts, ViewModel::TopHosts { .. })
                | (Page::PriceAnalysis, ViewModel::PriceAnalysis { .. })
                | (Page::Maps, ViewModel::Maps { .. })
                | (Page::Insights, ViewModel::Insights { .. })
                | (Page::PriceSimulator, ViewModel::PriceSimulator { .. })
        );
        assert!(matches, "{} produced {:?}", page, view);
    }

    #[test]
    fn top_hosts_respects_selected_n() {
        let mut p = params();
        p.top_n = NonZeroUsize::new(1).unwrap();
        match dispatch(Page::TopHosts, &table(), &p, &DashboardConfig::default()) {
            ViewModel::TopHosts { hosts, .. } => {
                assert_eq!(hosts.len(), 1);
                assert_eq!(hosts[0].label(), "1 - Ana");
                assert_eq!(hosts[0].listings, 3);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn price_analysis_drops_prices_over_ceiling() {
        match dispatch(Page::PriceAnalysis, &table(), &params(), &DashboardConfig::default()) {
            ViewModel::PriceAnalysis { by_room_type, by_neighbourhood_group, .. } => {
                let values: Vec<&str> = by_room_type.iter().map(|d| d.value.as_str()).collect();
                assert_eq!(values, vec!["Entire home"]);
                assert_eq!(by_neighbourhood_group.len(), 1);
                assert_eq!(by_room_type[0].summary.quartiles.median, 200.0);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn maps_defaults_to_first_group() {
        match dispatch(Page::Maps, &table(), &params(), &DashboardConfig::default()) {
            ViewModel::Maps { groups, selected, points } => {
                assert_eq!(groups, vec!["Centro", "Retiro"]);
                assert_eq!(selected.as_deref(), Some("Centro"));
                assert_eq!(points.len(), 3);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn insights_ranks_by_reviews() {
        match dispatch(Page::Insights, &table(), &params(), &DashboardConfig::default()) {
            ViewModel::Insights { top_reviewed, price_vs_reviews, .. } => {
                assert_eq!(top_reviewed.len(), 4);
                assert_eq!(top_reviewed[0].reviews_per_month, 5.0);
                assert_eq!(price_vs_reviews["Entire home"], vec![[200.0, 5.0]]);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn simulator_reports_no_data_for_empty_selection() {
        let mut p = params();
        p.simulator.area = "Retiro".to_string();
        p.simulator.room_type = "Entire home".to_string();

        match dispatch(Page::PriceSimulator, &table(), &p, &DashboardConfig::default()) {
            ViewModel::PriceSimulator { outcome, areas, .. } => {
                assert_eq!(areas, vec!["Centro", "Retiro"]);
                assert!(matches!(outcome, SimulatorOutcome::NoData { .. }));
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn simulator_defaults_to_first_area_and_room_type() {
        match dispatch(Page::PriceSimulator, &table(), &params(), &DashboardConfig::default()) {
            ViewModel::PriceSimulator { outcome: SimulatorOutcome::Recommended(rec), .. } => {
                assert_eq!(rec.input.area, "Centro");
                assert_eq!(rec.input.guests, 2);
                assert_eq!(rec.median, "€200.00");
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn view_models_serialize_with_page_tag() {
        let view = dispatch(Page::Overview, &table(), &params(), &DashboardConfig::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["page"], "Overview");
        assert_eq!(json["total_listings"], 4);
    }
}
