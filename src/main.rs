//! Video Game Sales Dashboard
//!
//! Loads a video-game sales CSV and shows an overview, a top-N ranking,
//! sales by genre and platform, and the yearly trend.

mod charts;
mod config;
mod data;
mod gui;
mod i18n;
mod stats;

use anyhow::Context;
use config::AppConfig;
use data::SalesLoader;
use eframe::egui;
use gui::DashboardApp;
use i18n::{ResourceBundle, TextKey};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = AppConfig::locate();
    let config = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("reading settings from {}", config_path.display()))?;

    // The dataset is static: a failed first load is fatal.
    let loader = SalesLoader::new(&config.data_path);
    match loader.load() {
        Ok(table) => {
            if table.is_empty() {
                warn!(path = %loader.path().display(), "no complete rows left after cleaning");
            }
            info!(
                rows = table.height(),
                global_sales = table.total_global_sales(),
                source_reads = loader.source_reads(),
                "dataset ready"
            );
        }
        Err(e) => {
            error!(error = %e, "cannot start without the sales dataset");
            return Err(e).with_context(|| format!("loading {}", loader.path().display()));
        }
    }

    let bundle = ResourceBundle::builtin();
    let title = bundle.text(config.language, TextKey::PageTitle);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title(title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc,
                loader,
                bundle,
                config.language,
                config.default_top_n,
                config.export_dir,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {}", e))
}
