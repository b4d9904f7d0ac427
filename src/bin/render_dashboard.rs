//! Dashboard renderer
//!
//! Client side of the dashboard: requests /api/dashboard from a running
//! service and writes the rendered HTML page. When the API cannot be
//! reached the page shows an error banner over demo content.
//!
//! Usage:
//!   cargo run --bin render_dashboard -- --out dashboard.html --once
//!   cargo run --bin render_dashboard -- --interval 300   # re-render every 5 minutes
//!
//! While watching, pressing Enter triggers an immediate manual refresh.

use clap::Parser;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use seamon_service::presentation::client::DEFAULT_API_URL;
use seamon_service::presentation::{render_page, DashboardClient, DashboardView, RetryPolicy};

#[derive(Parser)]
#[command(name = "render_dashboard", version, about = "Render the marine dashboard page")]
struct Cli {
    /// Base URL of the dashboard API
    #[arg(long, default_value = DEFAULT_API_URL)]
    server: String,

    /// Output HTML file
    #[arg(long, default_value = "dashboard.html")]
    out: PathBuf,

    /// Seconds between automatic refreshes
    #[arg(long, default_value_t = 300)]
    interval: u64,

    /// Seconds to wait before the first load
    #[arg(long, default_value_t = 0)]
    startup_delay: u64,

    /// Render once and exit
    #[arg(long)]
    once: bool,

    /// Attempts per load before falling back to demo data
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,

    /// Initial retry delay in milliseconds (doubles per attempt)
    #[arg(long, default_value_t = 1000)]
    base_delay_ms: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let retry = RetryPolicy {
        max_attempts: cli.max_attempts,
        base_delay: Duration::from_millis(cli.base_delay_ms),
    };
    let client = DashboardClient::new(&cli.server, Duration::from_secs(cli.timeout), retry)?;

    if cli.startup_delay > 0 {
        thread::sleep(Duration::from_secs(cli.startup_delay));
    }

    write_view(&cli.out, &client.load())?;
    if cli.once {
        return Ok(());
    }

    println!("🔄 Refreshing every {}s from {} (Enter = refresh now, Ctrl+C = stop)", cli.interval, client.dashboard_url());

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if line.is_err() || tx.send(()).is_err() {
                break;
            }
        }
    });

    let interval = Duration::from_secs(cli.interval.max(1));
    let mut stdin_open = true;
    loop {
        let view = if stdin_open {
            match rx.recv_timeout(interval) {
                Ok(()) => client.refresh(),
                Err(RecvTimeoutError::Timeout) => client.load(),
                Err(RecvTimeoutError::Disconnected) => {
                    stdin_open = false;
                    continue;
                }
            }
        } else {
            thread::sleep(interval);
            client.load()
        };
        write_view(&cli.out, &view)?;
    }
}

fn write_view(path: &Path, view: &DashboardView) -> io::Result<()> {
    fs::write(path, render_page(view))?;
    match &view.error {
        Some(e) => println!("⚠️  Wrote {} with demo data: {}", path.display(), e),
        None => println!(
            "✓ Wrote {} ({} species, {} observations, {} locations)",
            path.display(),
            view.payload.fish_species.len(),
            view.payload.biodiversity.observations.len(),
            view.payload.ocean_weather.len()
        ),
    }
    Ok(())
}
