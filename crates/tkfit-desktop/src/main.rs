//! TKFIT Desktop Application - basketball telemetry dashboard

mod app;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::DashboardApp;
use clap::Parser;
use tkfit_simulation::SessionConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tkfit-desktop", about = "Simulated basketball telemetry dashboard")]
struct Cli {
    /// Session configuration (JSON); defaults to the Post vs Guard preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the session seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write every player's CSV into this directory and exit without opening a window
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut session = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load session config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = cli.seed {
        session.seed = seed;
    }

    info!(session = %session.name, seed = session.seed, "starting TKFIT dashboard");
    let app = DashboardApp::new(session)?;

    if let Some(dir) = &cli.export_dir {
        let written = app.export_all(dir)?;
        for path in &written {
            info!(path = %path.display(), "exported");
        }
        return Ok(());
    }

    // Configure egui
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TKFIT Basketball Analytics",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run native app: {}", e))?;

    Ok(())
}
