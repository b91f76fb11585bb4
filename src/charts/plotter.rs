//! Chart Plotter Module
//! Draws the dashboard's bar, box, scatter and map charts with egui_plot.

use crate::stats::HostSummary;
use crate::views::{CategoryDistribution, ReviewedListing};
use egui::Color32;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};
use std::collections::BTreeMap;

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const CHART_HEIGHT: f32 = 420.0;

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn palette_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Label for an integer axis position, blank between categories.
    fn category_label(labels: &[String], value: f64) -> String {
        if (value - value.round()).abs() > 1e-6 || value < 0.0 {
            return String::new();
        }
        labels.get(value.round() as usize).cloned().unwrap_or_default()
    }

    /// Horizontal bars of listing counts, largest host at the top.
    pub fn draw_host_bars(ui: &mut egui::Ui, hosts: &[HostSummary]) {
        let n = hosts.len();
        // Bars are laid out bottom-up, so the ranking is reversed onto the axis.
        let labels: Vec<String> = hosts.iter().rev().map(HostSummary::label).collect();

        let bars: Vec<Bar> = hosts
            .iter()
            .enumerate()
            .map(|(rank, host)| {
                Bar::new((n - 1 - rank) as f64, host.listings as f64)
                    .name(host.label())
                    .fill(Self::palette_color(0))
            })
            .collect();

        Plot::new("top_hosts")
            .height(CHART_HEIGHT.max(24.0 * n as f32))
            .x_axis_label("Listings")
            .allow_scroll(false)
            .include_x(0.0)
            .y_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Listings"));
            });
    }

    /// Box per category value; y axis hinted to `[0, ceiling]`.
    pub fn draw_price_boxes(
        ui: &mut egui::Ui,
        id: &str,
        axis_label: &str,
        distributions: &[CategoryDistribution],
        ceiling: f64,
    ) {
        let labels: Vec<String> = distributions.iter().map(|d| d.value.clone()).collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .x_axis_label(axis_label.to_string())
            .y_axis_label("Price")
            .allow_scroll(false)
            .include_y(0.0)
            .include_y(ceiling)
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, dist) in distributions.iter().enumerate() {
                    let color = Self::palette_color(i);
                    let s = &dist.summary;
                    let elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(
                            s.whisker_low,
                            s.quartiles.lower,
                            s.quartiles.median,
                            s.quartiles.upper,
                            s.whisker_high,
                        ),
                    )
                    .name(&dist.value)
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.3))
                    .stroke(egui::Stroke::new(1.5, color));

                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&dist.value));
                }
            });
    }

    /// Vertical bars of reviews per month, coloured by room type.
    pub fn draw_review_bars(ui: &mut egui::Ui, listings: &[ReviewedListing]) {
        let labels: Vec<String> = listings.iter().map(|l| l.neighbourhood.clone()).collect();
        let room_types = Self::distinct(listings.iter().map(|l| l.room_type.as_str()));

        Plot::new("top_reviewed")
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label("Area")
            .y_axis_label("Reviews/Month")
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (color_idx, room_type) in room_types.iter().enumerate() {
                    let bars: Vec<Bar> = listings
                        .iter()
                        .enumerate()
                        .filter(|(_, l)| &l.room_type == room_type && !l.reviews_per_month.is_nan())
                        .map(|(i, l)| Bar::new(i as f64, l.reviews_per_month).name(&l.name))
                        .collect();

                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .color(Self::palette_color(color_idx))
                            .name(room_type),
                    );
                }
            });
    }

    /// One point series per group, inside the given axis hints.
    pub fn draw_grouped_scatter(
        ui: &mut egui::Ui,
        id: &str,
        labels: (&str, &str),
        groups: &BTreeMap<String, Vec<[f64; 2]>>,
        x_range: [f64; 2],
        y_range: [f64; 2],
    ) {
        Plot::new(id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label(labels.0.to_string())
            .y_axis_label(labels.1.to_string())
            .allow_scroll(false)
            .include_x(x_range[0])
            .include_x(x_range[1])
            .include_y(y_range[0])
            .include_y(y_range[1])
            .show(ui, |plot_ui| {
                for (i, (group, points)) in groups.iter().enumerate() {
                    plot_ui.points(
                        Points::new(PlotPoints::new(points.clone()))
                            .radius(2.0)
                            .color(Self::palette_color(i))
                            .name(group),
                    );
                }
            });
    }

    /// Listing locations; `points` are `[latitude, longitude]`.
    pub fn draw_map(ui: &mut egui::Ui, points: &[[f64; 2]]) {
        let lon_lat: Vec<[f64; 2]> = points.iter().map(|&[lat, lon]| [lon, lat]).collect();

        Plot::new("listings_map")
            .height(CHART_HEIGHT * 1.3)
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::new(lon_lat))
                        .radius(2.0)
                        .color(Self::palette_color(1)),
                );
            });
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for v in values {
            if !out.iter().any(|o| o == v) {
                out.push(v.to_string());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_marks() {
        let labels = vec!["Centro".to_string(), "Retiro".to_string()];
        assert_eq!(ChartPlotter::category_label(&labels, 0.0), "Centro");
        assert_eq!(ChartPlotter::category_label(&labels, 1.0), "Retiro");
        assert_eq!(ChartPlotter::category_label(&labels, 0.5), "");
        assert_eq!(ChartPlotter::category_label(&labels, 2.0), "");
        assert_eq!(ChartPlotter::category_label(&labels, -1.0), "");
    }

    #[test]
    fn palette_wraps_around() {
        assert_eq!(ChartPlotter::palette_color(0), ChartPlotter::palette_color(PALETTE.len()));
    }
}
