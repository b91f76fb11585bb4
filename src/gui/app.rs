//! Rental Insights Main Application
//! Main window with the navigation panel and the page view.

use crate::config::DashboardConfig;
use crate::data::ListingTable;
use crate::gui::{ControlPanel, ControlPanelAction, PageView};
use crate::views::{self, Page, ViewModel, ViewParams};
use egui::SidePanel;
use std::path::PathBuf;
use tracing::info;

/// Main application window. Owns the listings table for the whole session.
pub struct DashboardApp {
    table: ListingTable,
    config: DashboardConfig,
    params: ViewParams,
    control_panel: ControlPanel,
    page_view: PageView,

    // Last computed view and the selection it was computed for
    current: Option<(Page, ViewParams, ViewModel)>,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        table: ListingTable,
        config: DashboardConfig,
        source: PathBuf,
    ) -> Self {
        let control_panel = ControlPanel::new(source, table.len());
        Self {
            params: ViewParams::from_config(&config),
            table,
            config,
            control_panel,
            page_view: PageView::new(),
            current: None,
        }
    }

    /// Recompute the view when the page or any selection changed.
    fn refresh_view(&mut self) {
        let page = self.control_panel.page;
        let stale = match &self.current {
            Some((p, params, _)) => *p != page || *params != self.params,
            None => true,
        };

        if stale {
            let view = views::dispatch(page, &self.table, &self.params, &self.config);
            self.current = Some((page, self.params.clone(), view));
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Navigation
        SidePanel::left("control_panel")
            .min_width(220.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                if let ControlPanelAction::PageChanged(page) = self.control_panel.show(ui) {
                    info!("Page selected: {}", page);
                }
            });

        self.refresh_view();

        // Central panel - Page View
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some((_, _, view)) = &self.current {
                    self.page_view
                        .show(ui, view, &mut self.params, &self.config.currency_symbol);
                }
            });
        });
    }
}
