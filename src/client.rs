//! Client
//!
//! The protocol engine: owns the lazily-established connection, frames
//! outgoing commands, accumulates responses, and translates status tokens
//! into typed results.

use crate::config::Config;
use crate::connection::Connection;
use crate::error::{MemtapError, Result};
use crate::protocol::{encode_command, parse_value, Command, Reply, Status};

/// Default expiration for stored values (seconds)
pub const DEFAULT_EXPIRATION_SECS: u32 = 3600;

/// A blocking memcached client over one persistent TCP connection
///
/// ## Connection Model
///
/// The connection is opened on the first operation that needs it and reused
/// for every subsequent operation. There is no reconnection: once the
/// connection drops, later operations fail and the client should be
/// discarded. Dropping the client closes the connection.
///
/// ## Concurrency Model
///
/// Every operation takes `&mut self` and blocks on socket I/O; the borrow
/// checker therefore serializes all access. For concurrent callers, use one
/// client per caller or synchronize externally.
pub struct Client {
    /// Client configuration
    config: Config,

    /// Cached connection, populated on first use
    connection: Option<Connection>,

    /// Fire-and-forget mode flag
    async_mode: bool,
}

impl Client {
    /// Create a client. Does not connect; the connection is established by
    /// the first operation.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            connection: None,
            async_mode: false,
        }
    }

    /// Switch fire-and-forget mode on or off.
    ///
    /// While enabled, `set` and `delete` return as soon as the command is
    /// written, without reading the server's acknowledgment. The
    /// acknowledgment bytes stay unread on the stream and will be consumed
    /// by the next synchronous command on this connection, which can
    /// misattribute them as that command's response. This mirrors the wire
    /// behavior of `noreply`-less fire-and-forget and is a known foot-gun:
    /// mix modes on one connection with care.
    pub fn set_async_mode(&mut self, enabled: bool) {
        self.async_mode = enabled;
    }

    /// Check if fire-and-forget mode is switched on
    pub fn is_async_mode(&self) -> bool {
        self.async_mode
    }

    /// Whether the connection has been established yet
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Store `value` under `key`, expiring after `expiration_secs` seconds
    /// ([`DEFAULT_EXPIRATION_SECS`] is the conventional default).
    ///
    /// Succeeds only if the server acknowledges with `STORED`. In
    /// fire-and-forget mode the write is reported successful without an
    /// acknowledgment.
    pub fn set(&mut self, key: &str, value: &[u8], expiration_secs: u32) -> Result<bool> {
        let command = Command::Set {
            key: key.to_string(),
            value: value.to_vec(),
            exptime: expiration_secs,
        };

        match self.execute(&command, false)? {
            Reply::Queued => Ok(true),
            Reply::Complete(reply) => match Status::parse(&reply) {
                Some(Status::Stored) => Ok(true),
                _ => Err(MemtapError::Set {
                    key: key.to_string(),
                    value: String::from_utf8_lossy(value).into_owned(),
                }),
            },
        }
    }

    /// Retrieve the value stored under `key`.
    ///
    /// Always reads a response, regardless of fire-and-forget mode. Blocks
    /// without a deadline until the server answers. Fails with
    /// [`MemtapError::Get`] when the server does not return a value, which
    /// covers both a plain miss (`END`) and protocol-level errors.
    pub fn get(&mut self, key: &str) -> Result<Vec<u8>> {
        let command = Command::Get {
            key: key.to_string(),
        };

        // retrieval always forces a synchronous read
        let Reply::Complete(reply) = self.execute(&command, true)? else {
            return Err(MemtapError::Get {
                key: key.to_string(),
            });
        };

        match parse_value(&reply) {
            Some(value) => Ok(value),
            None => Err(MemtapError::Get {
                key: key.to_string(),
            }),
        }
    }

    /// Remove `key` from the server.
    ///
    /// Fails with [`MemtapError::KeyNotFound`] when the server reports
    /// `NOT_FOUND`, and with [`MemtapError::Delete`] on any reply other than
    /// `DELETED`.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        let command = Command::Delete {
            key: key.to_string(),
        };

        match self.execute(&command, false)? {
            Reply::Queued => Ok(true),
            Reply::Complete(reply) => match Status::parse(&reply) {
                Some(Status::NotFound) => Err(MemtapError::KeyNotFound {
                    key: key.to_string(),
                }),
                Some(Status::Deleted) => Ok(true),
                _ => Err(MemtapError::Delete {
                    key: key.to_string(),
                }),
            },
        }
    }

    /// Remove `key` if it exists.
    ///
    /// The not-found outcome is a success here; every other failure
    /// propagates unchanged.
    pub fn delete_if_exists(&mut self, key: &str) -> Result<bool> {
        match self.delete(key) {
            Err(MemtapError::KeyNotFound { .. }) => Ok(true),
            other => other,
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Write a framed command and, unless fire-and-forget applies, read its
    /// response.
    fn execute(&mut self, command: &Command, force_sync: bool) -> Result<Reply> {
        let frame = encode_command(command);
        let fire_and_forget = self.async_mode && !force_sync;

        let connection = self.connection()?;
        tracing::trace!(
            verb = command.verb(),
            key = command.key(),
            fire_and_forget,
            "sending command to {}",
            connection.peer_addr()
        );

        connection.send(&frame)?;

        if fire_and_forget {
            return Ok(Reply::Queued);
        }

        let reply = connection.read_reply()?;
        Ok(Reply::Complete(reply))
    }

    /// Get the connection, opening it on first use
    fn connection(&mut self) -> Result<&mut Connection> {
        let connection = match self.connection.take() {
            Some(connection) => connection,
            None => Connection::open(
                &self.config.host,
                self.config.port,
                self.config.connect_timeout,
            )?,
        };
        Ok(self.connection.insert(connection))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
