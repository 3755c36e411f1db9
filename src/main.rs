mod app;
mod chart;
mod color;
mod config;
mod data;
mod events;
mod state;
mod ui;

use std::sync::Arc;

use app::ExoDashApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // Fetched once; every window reads the same shared catalogue.
    let catalog = match data::loader::fetch_catalog(&config) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            let err = anyhow::Error::new(e).context("loading the planet catalogue");
            log::error!("{err:#}");
            return Err(err);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Exoplanets – Data Visualisation",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ExoDashApp::new(catalog, config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
