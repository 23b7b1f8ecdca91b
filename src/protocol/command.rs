//! Command definitions
//!
//! Represents outgoing requests to the server.

/// A command to send to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a value under a key, expiring after `exptime` seconds
    Set {
        key: String,
        value: Vec<u8>,
        exptime: u32,
    },

    /// Retrieve the value stored under a key
    Get { key: String },

    /// Remove a key
    Delete { key: String },
}

impl Command {
    /// The protocol verb for this command
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Set { .. } => "set",
            Command::Get { .. } => "get",
            Command::Delete { .. } => "delete",
        }
    }

    /// The key this command operates on
    pub fn key(&self) -> &str {
        match self {
            Command::Set { key, .. } => key,
            Command::Get { key } => key,
            Command::Delete { key } => key,
        }
    }
}
