use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use amadeus_hotels::adapters::amadeus::client::AmadeusHotelsClient;
use amadeus_hotels::adapters::clock::TokioSleeper;
use amadeus_hotels::adapters::http::client::ResilientHttpClient;
use amadeus_hotels::config::load_config;
use amadeus_hotels::domain::credentials::Credentials;
use amadeus_hotels::pipeline::fetch_offer_rows;

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [
        PathBuf::from("config.yaml"),
        exe_dir().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the flattened rows
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let config = load_config(&find_config_path())?;
    let credentials = Credentials::from_env()?;

    let http = Arc::new(ResilientHttpClient::from_config(
        &config,
        credentials,
        Arc::new(TokioSleeper),
    )?);
    let api = AmadeusHotelsClient::new(http, &config.api.base_url);

    let today = chrono::Local::now().date_naive();
    let run = fetch_offer_rows(&api, &config.search, today).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for row in &run.rows {
        serde_json::to_writer(&mut out, row).context("failed to serialize offer row")?;
        writeln!(out)?;
    }

    tracing::info!(
        hotels = run.hotel_ids.len(),
        batches = run.batches.len(),
        rows = run.rows.len(),
        "Done"
    );
    Ok(())
}
