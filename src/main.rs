use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use weatherstation::api::start_server;
use weatherstation::cli::{Cli, Commands};
use weatherstation::config::{self, WeatherStationConfig};
use weatherstation::station::{build_fetcher, fetch_snapshot};
use weatherstation::WeatherStation;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    info!("Using configuration file: {:?}", config_path);

    let config = match config::load_config(&config_path) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(anyhow::anyhow!("Configuration error: {}", e));
        }
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(config).await,
        Commands::Fetch => fetch_once(&config).await,
    }
}

async fn run(config: WeatherStationConfig) -> Result<()> {
    let station = WeatherStation::from_config(&config)
        .await
        .context("Failed to initialize weather station")?;

    let monitor = station.start();
    let state = station.api_state(config.metrics.enabled);

    info!("Weather station starting up...");

    let served = start_server(&config.api, state).await;

    monitor.abort();
    served.context("Weather station API failed")?;

    info!("Weather station shut down");
    Ok(())
}

async fn fetch_once(config: &WeatherStationConfig) -> Result<()> {
    let fetcher = build_fetcher(config).context("Failed to create fetcher")?;

    let snapshot = fetch_snapshot(&fetcher)
        .await
        .context("Could not fetch weather information")?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
