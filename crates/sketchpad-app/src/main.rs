//! Main application entry point.

mod app;
mod config;

use app::{SketchpadApp, APP_NAME};
use config::Config;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting {APP_NAME}");

    let config = Config::load("sketchpad.toml")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 680.0])
            .with_min_inner_size([400.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |_cc| Box::new(SketchpadApp::new(config))),
    )
    .map_err(|err| anyhow::anyhow!("failed to start UI: {err}"))?;

    Ok(())
}
