//! shelfkv CLI Client
//!
//! One-shot client for the text protocol: opens a connection, sends a single
//! command, prints the response, exits. Exit code 1 on ERROR, 2 on NOTFOUND.

use std::io::{Read, Write};
use std::net::TcpStream;

use clap::{Parser, Subcommand};

/// shelfkv CLI
#[derive(Parser, Debug)]
#[command(name = "shelfkv-cli")]
#[command(about = "CLI for the shelfkv key-value store")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set (may contain spaces)
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },
}

fn main() {
    let args = Args::parse();

    let request = match &args.command {
        Commands::Get { key } => format!("GET {}\n", key),
        Commands::Set { key, value } => format!("SET {} {}\n", key, value),
        Commands::Del { key } => format!("DEL {}\n", key),
    };

    let response = match send_request(&args.server, request.as_bytes()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // The server closes after one response; print whatever it said
    print!("{}", String::from_utf8_lossy(&response));

    if response.starts_with(b"ERROR") {
        std::process::exit(1);
    }
    if response.starts_with(b"NOTFOUND") {
        std::process::exit(2);
    }
}

/// Send one request and read the response until the server closes
fn send_request(server: &str, request: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut stream = TcpStream::connect(server)?;
    stream.write_all(request)?;
    stream.flush()?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response)?;
    Ok(response)
}
