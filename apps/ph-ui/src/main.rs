#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod input;
mod palette;
mod views;

use app::PhSimulatorApp;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ph-ui")]
#[command(about = "Interactive P-h diagram refrigeration cycle simulator", long_about = None)]
struct Args {
    /// Simulator configuration YAML (defaults are built in)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match ph_config::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let title = format!("Interactive P-h Diagram Simulator - {}", config.refrigerant);
    let window = &config.window;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_min_inner_size([window.min_width, window.min_height])
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        "ph-simulator",
        options,
        Box::new(|cc| Ok(Box::new(PhSimulatorApp::new(cc, config)))),
    )
}
