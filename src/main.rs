mod app;
mod color;
mod config;
mod data;
mod geo;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::CovidDashboardApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let loader = app::bootstrap(&config)?;
    let dashboard = CovidDashboardApp::new(config, loader).context("starting dashboard")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("COVID-19 Dashboard")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "COVID-19 Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(dashboard))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
