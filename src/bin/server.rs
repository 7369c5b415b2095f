//! shelfkv Server Binary
//!
//! Starts the TCP server for shelfkv.

use std::sync::Arc;

use clap::Parser;
use shelfkv::network::Server;
use shelfkv::{Config, FileStore};
use tracing_subscriber::{fmt, EnvFilter};

/// shelfkv Server
#[derive(Parser, Debug)]
#[command(name = "shelfkv-server")]
#[command(about = "Minimal durable key-value store over TCP")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./shelfkv_data")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    listen: String,

    /// Maximum request size in bytes (excluding the trailing newline)
    #[arg(short = 'r', long, default_value = "256")]
    max_request_bytes: usize,

    /// Connection read timeout in milliseconds (0 disables)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Connection write timeout in milliseconds (0 disables)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shelfkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("shelfkv server v{}", shelfkv::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .max_request_len(args.max_request_bytes)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    // Open the store
    let store = match FileStore::open(&config.data_dir) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    // Bind and serve
    let server = match Server::bind(config, store) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind listener: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
