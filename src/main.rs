//! Marine Dashboard Service - HTTP API server
//!
//! Serves marine science data aggregated from:
//! 1. A fish species catalog (FishBase)
//! 2. A biodiversity occurrence archive (OBIS)
//! 3. A marine weather service (Open-Meteo)
//!
//! Every upstream failure is absorbed into a static fallback, so the API
//! always answers with well-formed data.
//!
//! Usage:
//!   cargo run --release                          # Serve on the configured port (default 3000)
//!   cargo run --release -- --port 8080           # Override the port
//!   cargo run --release -- --config ./prod.toml  # Use another config file
//!
//! Environment:
//!   RUST_LOG  - log filter (default: info)
//!   SEAMON_*  - configuration overrides (see config.rs)

use clap::Parser;
use std::path::PathBuf;

use seamon_service::config::ServiceConfig;
use seamon_service::endpoint::{self, Router};

#[derive(Parser)]
#[command(name = "seamon_service", version, about = "Marine science data aggregation API")]
struct Cli {
    /// Path to the TOML configuration file (default: ./seamon.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    println!("🌊 Marine Dashboard Service");
    println!("============================\n");

    let mut config = match ServiceConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Configuration error: {}\n", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    println!("📋 Upstream sources:");
    println!("   Species catalog:  {}", config.species.base_url);
    println!("   Observations:     {}", config.observations.base_url);
    println!("   Marine weather:   {}", config.weather.base_url);
    println!("   Locations:        {}\n", config.locations.len());

    let router = match Router::from_config(&config) {
        Ok(router) => router,
        Err(e) => {
            eprintln!("\n❌ Failed to initialise HTTP clients: {}\n", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = endpoint::start_endpoint_server(&config.server, router) {
        eprintln!("\n❌ Endpoint server error: {}\n", e);
        std::process::exit(1);
    }
}
