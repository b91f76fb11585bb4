//! Control Panel Widget
//! Left side navigation: page selection and dataset status.

use crate::views::Page;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side panel holding the page selector.
pub struct ControlPanel {
    pub page: Page,
    pub source: PathBuf,
    pub row_count: usize,
}

impl ControlPanel {
    pub fn new(source: PathBuf, row_count: usize) -> Self {
        Self {
            page: Page::Overview,
            source,
            row_count,
        }
    }

    /// Draw the panel. Returns the page selected this frame, if it changed.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏡 Rental Insights")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("Navigation").size(14.0).strong());
        ui.add_space(5.0);

        for page in Page::ALL {
            if ui.radio_value(&mut self.page, page, page.title()).changed() {
                action = ControlPanelAction::PageChanged(page);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        let file_name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.source.display().to_string());
        ui.label(RichText::new(file_name).size(12.0));
        ui.label(
            RichText::new(format!("{} listings", self.row_count))
                .size(11.0)
                .color(Color32::GRAY),
        );

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    PageChanged(Page),
}
