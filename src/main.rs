//! Spectrum calculator entry point.
//!
//! Loads configuration from TOML, initializes tracing, reads the optional
//! wavelength table, sets up the Axum router and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spectrum_calculator::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use spectrum_calculator::grid::WavelengthTable;
use spectrum_calculator::http::start_server;
use spectrum_calculator::{create_router, AppState};

/// Spectrum calculator: DWDM flex-grid channel planning service
#[derive(Parser, Debug)]
#[command(name = "spectrum-calculator", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "spectrum_calculator=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Config first: it decides the log format
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        config = %args.config,
        static_dir = %config.paths.static_dir.display(),
        data_dir = %config.paths.data_dir.display(),
        "Loaded configuration"
    );

    // The data mount is optional; a broken table must not keep the service down
    let table = match WavelengthTable::load(&config.paths.data_dir) {
        Ok(table) if table.is_empty() => {
            tracing::info!("No wavelength table found, converting with c/λ");
            table
        }
        Ok(table) => {
            tracing::info!(pairs = table.len(), "Loaded wavelength table");
            table
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load wavelength table, converting with c/λ");
            WavelengthTable::default()
        }
    };

    let state = AppState::new(config, table);
    let app = create_router(state.clone());

    start_server(app, &state).await?;

    Ok(())
}
