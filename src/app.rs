use std::sync::Arc;

use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::model::Catalog;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExoDashApp {
    pub state: AppState,
}

impl ExoDashApp {
    pub fn new(catalog: Arc<Catalog>, config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(catalog, config),
        }
    }
}

impl eframe::App for ExoDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: logo, title, summary ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            panels::header(ui, &self.state);
            ui.add_space(8.0);
        });

        // ---- Filter controls ----
        egui::TopBottomPanel::top("filters").show(ctx, |ui| {
            ui.add_space(8.0);
            panels::filter_bar(ui, &mut self.state);
            ui.add_space(8.0);
        });

        // ---- Central panel: tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tab_bar(ui, &mut self.state);
            panels::tab_content(ui, &mut self.state);
        });
    }
}
