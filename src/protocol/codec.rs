//! Protocol codec
//!
//! Command framing and response accumulation.
//!
//! ## Framing
//!
//! Every command is a single CR-LF terminated line; `set` appends the raw
//! value bytes and a second CR-LF. Responses are accumulated from bounded
//! reads until a line carrying a terminal [`Status`] token appears or the
//! stream ends.
//!
//! A `VALUE` header declares the byte length of the data block that follows
//! it. The accumulator skips that many bytes before scanning for status
//! lines again, so stored values may contain CR-LF or even lines that look
//! like status tokens without breaking the framing.

use std::io::{BufRead, Read};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::Result;

use super::{Command, Status};

/// Line terminator for every command and response line
pub const CRLF: &[u8] = b"\r\n";

/// Upper bound on a single read from the connection.
///
/// Each read stops at the next newline or after this many bytes, whichever
/// comes first.
pub const MAX_LINE_READ: u64 = 256;

/// Sentinel displayed for a command that was written but never awaited
pub const QUEUED: &str = "QUEUED";

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Fire-and-forget: the command was written and nothing was read
    Queued,

    /// The accumulated response bytes for a synchronous command
    Complete(Vec<u8>),
}

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command for the wire
///
/// Format: `<verb> <args>\r\n`, with the value block and its trailing CR-LF
/// appended for `set`. Flags are always written as 0.
pub fn encode_command(command: &Command) -> Bytes {
    let mut buf = BytesMut::new();

    match command {
        Command::Set {
            key,
            value,
            exptime,
        } => {
            buf.put_slice(format!("set {} 0 {} {}", key, exptime, value.len()).as_bytes());
            buf.put_slice(CRLF);
            buf.put_slice(value);
        }
        Command::Get { key } => {
            buf.put_slice(b"get ");
            buf.put_slice(key.as_bytes());
        }
        Command::Delete { key } => {
            buf.put_slice(b"delete ");
            buf.put_slice(key.as_bytes());
        }
    }

    buf.put_slice(CRLF);
    buf.freeze()
}

// =============================================================================
// Response Accumulation
// =============================================================================

/// Read one complete response from a stream
///
/// Appends bounded chunks to an accumulation buffer until the buffer holds a
/// complete response (see [`reply_complete`]) or the stream reaches EOF.
/// Returns whatever was accumulated in both cases.
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut reply = Vec::new();

    loop {
        let n = read_chunk(reader, &mut reply)?;
        if n == 0 || reply_complete(&reply) {
            return Ok(reply);
        }
    }
}

/// Read a single bounded chunk: up to the next newline or [`MAX_LINE_READ`]
/// bytes, whichever comes first. Returns the number of bytes read (0 at EOF).
fn read_chunk<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<usize> {
    let n = reader.by_ref().take(MAX_LINE_READ).read_until(b'\n', buf)?;
    Ok(n)
}

/// Whether an accumulation buffer holds a complete response.
///
/// Scans complete lines from the start of the buffer. A line starting with a
/// terminal status token completes the response. A `VALUE` header causes its
/// declared data block (plus trailing CR-LF) to be skipped rather than
/// scanned. Incomplete trailing lines or data blocks leave the response
/// incomplete.
pub fn reply_complete(reply: &[u8]) -> bool {
    let mut pos = 0;

    while pos < reply.len() {
        let Some(offset) = reply[pos..].iter().position(|&b| b == b'\n') else {
            // trailing partial line
            return false;
        };
        let line_end = pos + offset;
        let line = trim_cr(&reply[pos..line_end]);

        match Status::parse(line) {
            Some(Status::Value) => match value_block_len(line) {
                // skip the data block and its trailing CR-LF
                Some(len) => {
                    pos = (line_end + 1).saturating_add(len).saturating_add(CRLF.len());
                }
                // malformed header; treat as an ordinary line
                None => pos = line_end + 1,
            },
            Some(status) if status.is_terminal() => return true,
            _ => pos = line_end + 1,
        }
    }

    false
}

/// Extract the value bytes from a retrieval response.
///
/// Expects `VALUE <key> <flags> <bytes>\r\n<data>\r\n...` and returns the
/// `<bytes>`-long data block. Returns `None` if the response does not start
/// with a well-formed `VALUE` header or the data block is truncated.
pub fn parse_value(reply: &[u8]) -> Option<Vec<u8>> {
    let header_end = reply.iter().position(|&b| b == b'\n')?;
    let header = trim_cr(&reply[..header_end]);

    if Status::parse(header) != Some(Status::Value) {
        return None;
    }
    let len = value_block_len(header)?;

    let start = header_end + 1;
    let end = start.checked_add(len)?;
    if reply.len() < end {
        return None;
    }

    Some(reply[start..end].to_vec())
}

/// Declared data length of a `VALUE <key> <flags> <bytes>[ <cas>]` header
fn value_block_len(header: &[u8]) -> Option<usize> {
    let header = std::str::from_utf8(header).ok()?;
    let bytes_field = header.split_ascii_whitespace().nth(3)?;
    bytes_field.parse().ok()
}

/// Strip a trailing carriage return from a newline-delimited line
fn trim_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
