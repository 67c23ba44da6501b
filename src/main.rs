mod app;
mod color;
mod config;
mod data;
mod render;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::DashboardApp;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    log::info!("Using {config:?}");

    // Fatal on failure.
    let dataset = load_dataset(&config.data_path)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    let state = AppState::new(dataset);
    eframe::run_native(
        "Country Temperature & GDP Growth",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Load the table, logging the outcome either way.
fn load_dataset(path: &Path) -> anyhow::Result<data::model::Dataset> {
    let dataset = data::loader::load_file(path)
        .with_context(|| format!("loading {}", path.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;
    log::info!(
        "Loaded {} countries, {} columns, regions {:?}",
        dataset.len(),
        dataset.columns.len(),
        dataset.regions
    );
    Ok(dataset)
}
