//! Logidash - Olist Logistics Analytics & Delay Dashboard
//!
//! A sequential pipeline: fetch the Olist CSV files, load them into SQLite,
//! rebuild the logistics master view, print the standard delay reports and
//! show a four-panel dashboard.

mod charts;
mod config;
mod dataset;
mod db;
mod gui;
mod reports;

use anyhow::Context;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::Config::load();
    info!(
        "database: {}, data dir: {}",
        config.db_path.display(),
        config.data_dir.display()
    );

    // Stage 1: make sure the CSVs are on disk; failures are logged and skipped
    dataset::ensure_dataset(&config);

    // Stage 2: replace the base tables with the CSV contents
    let conn = db::connect(&config.db_path).context("failed to open database")?;
    db::CsvLoader::new(&config.data_dir).load_all(&conn)?;

    // Stage 3: rebuild the master view, then run the reports against it
    db::rebuild_master_view(&conn)?;
    for table in reports::run_all(&conn)? {
        println!("{table}");
    }

    // Stage 4: dashboard - static export first, then the interactive window
    let data = charts::DashboardData::query(&conn)?;
    drop(conn);

    charts::export_dashboard(&data, &config.dashboard_path)
        .with_context(|| format!("failed to export {}", config.dashboard_path.display()))?;
    info!("static dashboard written to {}", config.dashboard_path.display());

    gui::run_dashboard(data).map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))?;

    Ok(())
}
