mod app;
mod color;
mod data;
mod state;
mod ui;
mod view;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::UrbanDashApp;
use clap::Parser;
use eframe::egui;

use data::model::CountryData;
use state::AppState;

#[derive(Parser)]
#[command(name = "urban-dash")]
#[command(about = "Urban development indicator dashboard")]
#[command(version)]
struct Cli {
    /// Indicator table (.csv, .json or .parquet)
    #[arg(short, long, default_value = "cleaned_urban_data.csv")]
    data: PathBuf,

    /// Country whose indicators are shown
    #[arg(short, long, default_value = "Sri Lanka")]
    country: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let dataset = data::loader::load_file(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;
    let country = CountryData::new(&dataset, &cli.country)
        .with_context(|| format!("selecting {} in {}", cli.country, cli.data.display()))?;

    let bounds = country.bounds();
    log::info!(
        "{}: {} rows, {} indicators, years {}-{}",
        country.country(),
        country.records().len(),
        country.indicators().len(),
        bounds.start,
        bounds.end
    );

    let title = format!("Urban Development Dashboard: {}", country.country());
    let state = AppState::new(dataset, country);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(UrbanDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
