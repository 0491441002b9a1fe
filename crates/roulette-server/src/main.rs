//! roulette-server - weighted food roulette HTTP server.
//!
//! Serves the item list and weighted-selection endpoints backed by a
//! `SQLite` store. Configuration comes from a TOML file with CLI flags
//! taking precedence; a fresh database is seeded with a default menu so
//! the wheel is usable immediately.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use roulette_core::{Item, ServiceConfig, SqliteItemStore};
use roulette_server::router;
use roulette_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// roulette server - weighted food selection over HTTP
#[derive(Parser, Debug)]
#[command(name = "roulette-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to service configuration file
    #[arg(short, long, default_value = "roulette.toml")]
    config: PathBuf,

    /// Address to bind the HTTP server to (overrides config)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Path to the SQLite database file (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Skip seeding the default menu into an empty database
    #[arg(long)]
    no_seed: bool,
}

/// Server settings derived from args and config file.
struct ServerSettings {
    bind_addr: SocketAddr,
    db_path: PathBuf,
}

impl ServerSettings {
    fn new(args: &Args) -> Result<Self> {
        let config = if args.config.exists() {
            ServiceConfig::from_file(&args.config).context("failed to load configuration")?
        } else {
            ServiceConfig::default()
        };

        // CLI args override config file
        let bind_addr = args.bind.unwrap_or(config.server.bind_addr);
        let db_path = args.db.clone().unwrap_or(config.storage.db_path);

        Ok(Self { bind_addr, db_path })
    }
}

/// The default menu inserted into an empty database at first start.
fn default_menu() -> Vec<Item> {
    vec![
        Item::new("spicy hotpot", 30),
        Item::new("salad", 15),
        Item::new("noodles", 20),
        Item::new("burger", 10),
        Item::new("instant hotpot", 25),
    ]
}

/// Waits for SIGINT or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

    tokio::select! {
        _ = sigint.recv() => info!("Received SIGINT, shutting down"),
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ServerSettings::new(&args)?;

    let store = SqliteItemStore::open(&settings.db_path)
        .with_context(|| format!("failed to open item store at {}", settings.db_path.display()))?;
    info!(db = %settings.db_path.display(), "Item store opened");

    if !args.no_seed {
        let seeded = store
            .seed_if_empty(&default_menu())
            .context("failed to seed default menu")?;
        if seeded {
            info!("Seeded default menu into empty store");
        }
    }

    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .context("failed to bind HTTP server")?;
    info!(addr = %settings.bind_addr, "Roulette HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
