//! memtap CLI
//!
//! Command-line interface for talking to a memcached server.

use std::io::Write;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use memtap::client::DEFAULT_EXPIRATION_SECS;
use memtap::protocol::QUEUED;
use memtap::{Client, Config};

/// memtap CLI
#[derive(Parser, Debug)]
#[command(name = "memtap")]
#[command(about = "CLI for the memtap memcached client")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "11211")]
    port: u16,

    /// Connect timeout in seconds
    #[arg(short, long, default_value = "30")]
    timeout: u64,

    /// Fire-and-forget writes (skip reading acknowledgments)
    #[arg(long)]
    async_mode: bool,

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

        /// The value to set
        value: String,

        /// Expiration in seconds
        #[arg(short, long, default_value_t = DEFAULT_EXPIRATION_SECS)]
        exptime: u32,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,

        /// Treat a missing key as success
        #[arg(long)]
        if_exists: bool,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .connect_timeout(Duration::from_secs(args.timeout))
        .build();

    let mut client = Client::new(config);
    client.set_async_mode(args.async_mode);

    if let Err(e) = run(&mut client, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(client: &mut Client, command: Commands) -> memtap::Result<()> {
    match command {
        Commands::Get { key } => {
            let value = client.get(&key)?;
            std::io::stdout().write_all(&value)?;
            println!();
        }
        Commands::Set {
            key,
            value,
            exptime,
        } => {
            client.set(&key, value.as_bytes(), exptime)?;
            println!("{}", if client.is_async_mode() { QUEUED } else { "OK" });
        }
        Commands::Del { key, if_exists } => {
            if if_exists {
                client.delete_if_exists(&key)?;
            } else {
                client.delete(&key)?;
            }
            println!("{}", if client.is_async_mode() { QUEUED } else { "OK" });
        }
    }

    Ok(())
}
