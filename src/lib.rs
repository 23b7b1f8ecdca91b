//! # memtap
//!
//! A blocking client for the memcached text protocol with:
//! - A single lazily-established TCP connection per client
//! - CR-LF command framing for `set`, `get`, and `delete`
//! - Terminal-status response accumulation
//! - Fire-and-forget "async mode" for writes
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! │         set / get / delete / delete_if_exists                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Protocol                                │
//! │        Command framing / Status interpretation               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Connection                               │
//! │          (Buffered TCP, opened on first use)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!                memcached server
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use memtap::{Client, Config};
//!
//! # fn main() -> memtap::Result<()> {
//! let mut client = Client::new(Config::default());
//! client.set("session:42", b"deadbeef", 60)?;
//! let value = client.get("session:42")?;
//! assert_eq!(value, b"deadbeef");
//! client.delete("session:42")?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod connection;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MemtapError, Result};
pub use config::Config;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of memtap
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
