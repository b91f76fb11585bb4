//! Rental Insights - short-term rental listings dashboard
//!
//! Loads a listings CSV once at startup and serves six read-only views:
//! overview, top hosts, price distributions, map, insights and a price simulator.

mod charts;
mod config;
mod data;
mod gui;
mod stats;
mod views;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config::DashboardConfig;
use data::ListingLoader;
use eframe::egui;
use gui::DashboardApp;
use std::path::PathBuf;
use tracing::info;
use views::{Page, ViewParams};

/// CLI-compatible page enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPage {
    Overview,
    TopHosts,
    PriceAnalysis,
    Maps,
    Insights,
    PriceSimulator,
}

impl From<CliPage> for Page {
    fn from(cli: CliPage) -> Self {
        match cli {
            CliPage::Overview => Page::Overview,
            CliPage::TopHosts => Page::TopHosts,
            CliPage::PriceAnalysis => Page::PriceAnalysis,
            CliPage::Maps => Page::Maps,
            CliPage::Insights => Page::Insights,
            CliPage::PriceSimulator => Page::PriceSimulator,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Short-term rental listings dashboard")]
struct Args {
    /// Listings CSV (overrides the config file)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print one page's view as JSON instead of opening the window
    #[arg(long, value_enum)]
    dump: Option<CliPage>,
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("Loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = args.data {
        config.dataset_path = data;
    }

    // The table is loaded once; a failure here aborts before any view is built.
    let source = config.dataset_path.clone();
    let table = ListingLoader::load(&source)
        .with_context(|| format!("Loading listings from {}", source.display()))?;

    if let Some(page) = args.dump {
        let params = ViewParams::from_config(&config);
        let view = views::dispatch(page.into(), &table, &params, &config);
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    info!("Opening dashboard with {} listings", table.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Rental Insights"),
        ..Default::default()
    };

    eframe::run_native(
        "Rental Insights",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, table, config, source)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {}", e))
}
