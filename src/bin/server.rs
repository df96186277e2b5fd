//! taskstore Server Binary
//!
//! Serves the task HTTP API.

use clap::Parser;
use taskstore::config::SyncStrategy;
use taskstore::{Config, Database, TaskService};
use tracing_subscriber::{fmt, EnvFilter};

/// taskstore Server
#[derive(Parser, Debug)]
#[command(name = "taskstore-server")]
#[command(about = "HTTP task service backed by a file-persisted store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./taskstore_data")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:3333")]
    listen: String,

    /// Skip fsync on snapshot writes
    #[arg(long)]
    no_fsync: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,taskstore=debug,tower_http=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("taskstore Server v{}", taskstore::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Listen address: {}", args.listen);

    let sync_strategy = if args.no_fsync {
        SyncStrategy::OsBuffered
    } else {
        SyncStrategy::EveryWrite
    };

    // Build config from args
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .sync_strategy(sync_strategy)
        .build();

    // Open database
    let db = match Database::open(config.clone()) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Database opened successfully");

    let tasks = TaskService::new(db);

    if let Err(e) = taskstore::http::serve(&config.listen_addr, tasks, shutdown_signal()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
