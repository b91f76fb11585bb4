//! Page View Widget
//! Central panel: draws one page's view model and its selection widgets.

use crate::charts::ChartPlotter;
use crate::stats::{format_currency, PreviewRow, PriceSummary, SimulatorInput};
use crate::views::{SimulatorOutcome, ViewModel, ViewParams};
use egui::{Color32, ComboBox, RichText};
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PriceTab {
    #[default]
    ByNeighbourhoodGroup,
    ByRoomType,
}

/// Renders view models. Selection widgets write straight into [`ViewParams`].
#[derive(Default)]
pub struct PageView {
    price_tab: PriceTab,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, view: &ViewModel, params: &mut ViewParams, currency: &str) {
        match view {
            ViewModel::Overview {
                total_listings,
                rows,
                price,
            } => Self::show_overview(ui, *total_listings, rows, price.as_ref(), currency),
            ViewModel::TopHosts { choices, hosts } => {
                Self::heading(ui, "Top Hosts");
                ui.horizontal(|ui| {
                    ui.label("Show top:");
                    let mut selected = params.top_n.get();
                    for &choice in choices {
                        ui.radio_value(&mut selected, choice, choice.to_string());
                    }
                    if let Some(n) = NonZeroUsize::new(selected) {
                        params.top_n = n;
                    }
                });
                ui.add_space(8.0);
                ChartPlotter::draw_host_bars(ui, hosts);
            }
            ViewModel::PriceAnalysis {
                price_ceiling,
                by_neighbourhood_group,
                by_room_type,
            } => {
                ui.horizontal(|ui| {
                    ui.selectable_value(
                        &mut self.price_tab,
                        PriceTab::ByNeighbourhoodGroup,
                        "By Neighbourhood Group",
                    );
                    ui.selectable_value(&mut self.price_tab, PriceTab::ByRoomType, "By Listing Type");
                });
                ui.separator();

                match self.price_tab {
                    PriceTab::ByNeighbourhoodGroup => {
                        Self::heading(ui, "Prices by Neighbourhood Group");
                        ChartPlotter::draw_price_boxes(
                            ui,
                            "price_by_group",
                            "Group",
                            by_neighbourhood_group,
                            *price_ceiling,
                        );
                    }
                    PriceTab::ByRoomType => {
                        Self::heading(ui, "Prices by Listing Type");
                        ChartPlotter::draw_price_boxes(
                            ui,
                            "price_by_room_type",
                            "Type",
                            by_room_type,
                            *price_ceiling,
                        );
                    }
                }
            }
            ViewModel::Maps {
                groups,
                selected,
                points,
            } => {
                Self::heading(ui, "Listings Map");
                let mut choice = selected.clone().unwrap_or_default();
                ComboBox::from_id_salt("map_group")
                    .selected_text(&choice)
                    .show_ui(ui, |ui| {
                        for group in groups {
                            ui.selectable_value(&mut choice, group.clone(), group);
                        }
                    });
                if !choice.is_empty() && selected.as_ref() != Some(&choice) {
                    params.neighbourhood_group = Some(choice);
                }
                ui.add_space(8.0);
                ChartPlotter::draw_map(ui, points);
            }
            ViewModel::Insights {
                top_reviewed,
                price_vs_reviews,
                price_range,
                reviews_range,
            } => {
                Self::heading(ui, "Most Reviewed Apartments");
                ChartPlotter::draw_review_bars(ui, top_reviewed);
                ui.add_space(12.0);
                Self::heading(ui, "Price vs Reviews");
                ChartPlotter::draw_grouped_scatter(
                    ui,
                    "price_vs_reviews",
                    ("Price", "Reviews/Month"),
                    price_vs_reviews,
                    *price_range,
                    *reviews_range,
                );
            }
            ViewModel::PriceSimulator {
                areas,
                room_types,
                guest_range,
                outcome,
            } => Self::show_simulator(ui, areas, room_types, *guest_range, outcome, params),
        }
    }

    fn heading(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(18.0).strong());
        ui.add_space(6.0);
    }

    fn show_overview(
        ui: &mut egui::Ui,
        total: usize,
        rows: &[PreviewRow],
        price: Option<&PriceSummary>,
        currency: &str,
    ) {
        Self::heading(ui, "Dataset Overview");

        egui::Grid::new("overview_table")
            .striped(true)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                for header in [
                    "name",
                    "neighbourhood_group",
                    "neighbourhood",
                    "price",
                    "reviews_per_month",
                    "last_review",
                ] {
                    ui.label(RichText::new(header).strong());
                }
                ui.end_row();

                for row in rows {
                    ui.label(&row.name);
                    ui.label(&row.neighbourhood_group);
                    ui.label(&row.neighbourhood);
                    ui.label(Self::number(row.price));
                    ui.label(Self::number(row.reviews_per_month));
                    ui.label(&row.last_review);
                    ui.end_row();
                }
            });

        ui.add_space(10.0);
        ui.label(RichText::new(format!("{} listings in total", total)).color(Color32::GRAY));

        if let Some(p) = price {
            ui.label(format!(
                "Price: mean {}, median {}, IQR {} to {}",
                format_currency(p.mean, currency),
                format_currency(p.quartiles.median, currency),
                format_currency(p.quartiles.lower, currency),
                format_currency(p.quartiles.upper, currency),
            ));
        }
    }

    fn show_simulator(
        ui: &mut egui::Ui,
        areas: &[String],
        room_types: &[String],
        guest_range: [u32; 2],
        outcome: &SimulatorOutcome,
        params: &mut ViewParams,
    ) {
        Self::heading(ui, "Price Simulator");

        let shown: &SimulatorInput = match outcome {
            SimulatorOutcome::Recommended(rec) => &rec.input,
            SimulatorOutcome::NoData { input } => input,
        };
        let mut selection = shown.clone();

        egui::Grid::new("simulator_inputs").show(ui, |ui| {
            ui.label("Select Area");
            ComboBox::from_id_salt("sim_area")
                .selected_text(&selection.area)
                .show_ui(ui, |ui| {
                    for area in areas {
                        ui.selectable_value(&mut selection.area, area.clone(), area);
                    }
                });
            ui.end_row();

            ui.label("Select Type");
            ComboBox::from_id_salt("sim_room_type")
                .selected_text(&selection.room_type)
                .show_ui(ui, |ui| {
                    for room_type in room_types {
                        ui.selectable_value(&mut selection.room_type, room_type.clone(), room_type);
                    }
                });
            ui.end_row();

            ui.label("Guests");
            ui.add(egui::Slider::new(
                &mut selection.guests,
                guest_range[0]..=guest_range[1],
            ));
            ui.end_row();
        });

        if &selection != shown {
            params.simulator = selection;
        }

        ui.add_space(10.0);
        match outcome {
            SimulatorOutcome::Recommended(rec) => {
                ui.label(RichText::new(rec.headline()).strong());
                ui.label("Recommended Price Range:");
                ui.label(format!("- Lower: {}", rec.lower));
                ui.label(format!("- Median: {}", rec.median));
                ui.label(format!("- Higher: {}", rec.higher));
            }
            SimulatorOutcome::NoData { .. } => {
                ui.label(
                    RichText::new("No data for this selection")
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            }
        }
    }

    fn number(value: f64) -> String {
        if value.is_nan() {
            "-".to_string()
        } else {
            format!("{:.2}", value)
        }
    }
}
