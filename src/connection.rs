//! Connection handling
//!
//! Buffered TCP connection to the server, opened with a connect timeout and
//! held for the owning client's lifetime. Dropping the connection closes the
//! stream.

use std::io::{BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{MemtapError, Result};
use crate::protocol;

/// A single bidirectional byte stream to one server
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Server address for logging
    peer_addr: String,
}

impl Connection {
    /// Open a connection to `host:port`, waiting at most `timeout` for the
    /// connect to complete.
    ///
    /// Resolution and connect failures are reported as
    /// [`MemtapError::Connect`] carrying the target host and port.
    pub fn open(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let stream =
            connect_with_timeout(host, port, timeout).map_err(|source| MemtapError::Connect {
                host: host.to_string(),
                port,
                source,
            })?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| format!("{}:{}", host, port));

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connection established to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Write a framed command and flush it to the socket
    pub fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.writer.write_all(frame)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read one complete response (blocking, no deadline)
    pub fn read_reply(&mut self) -> Result<Vec<u8>> {
        protocol::read_reply(&mut self.reader)
    }

    /// Get the server address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Resolve `host:port` and attempt a timed connect to each address in turn,
/// returning the first stream that connects.
fn connect_with_timeout(host: &str, port: u16, timeout: Duration) -> std::io::Result<TcpStream> {
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("no addresses resolved for {}:{}", host, port),
        )
    }))
}
