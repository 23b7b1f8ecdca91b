//! Client Tests
//!
//! End-to-end tests driving a `Client` against an in-process scripted TCP
//! server: the server accepts one connection, then answers each incoming
//! command with the next canned response.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use memtap::{Client, Config, MemtapError};

// =============================================================================
// Helper Functions
// =============================================================================

/// Start a scripted server and a client configured to reach it.
///
/// The returned handle yields the number of connections accepted, so tests
/// can assert the client connected exactly once.
fn scripted_server(responses: Vec<&'static [u8]>) -> (Client, JoinHandle<usize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        serve(stream, &responses);
        1
    });

    let config = Config::builder()
        .host("127.0.0.1")
        .port(port)
        .connect_timeout(Duration::from_secs(5))
        .build();

    (Client::new(config), handle)
}

/// Answer each incoming command with the next canned response
fn serve(stream: TcpStream, responses: &[&[u8]]) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut writer = stream;

    for response in responses {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            return;
        }

        // a set command carries a data block (plus CR-LF) after its line
        if let Some(len) = set_data_len(&line) {
            let mut data = vec![0u8; len + 2];
            reader.read_exact(&mut data).unwrap();
        }

        writer.write_all(response).unwrap();
        writer.flush().unwrap();
    }
}

/// Declared data length of a `set <key> <flags> <exptime> <bytes>` line
fn set_data_len(line: &str) -> Option<usize> {
    let mut parts = line.split_ascii_whitespace();
    if parts.next()? != "set" {
        return None;
    }
    parts.nth(3)?.parse().ok()
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 11211);
    assert_eq!(config.connect_timeout, Duration::from_secs(30));
}

#[test]
fn test_config_builder() {
    let config = Config::builder()
        .host("cache.internal")
        .port(11212)
        .connect_timeout(Duration::from_secs(2))
        .build();

    assert_eq!(config.host, "cache.internal");
    assert_eq!(config.port, 11212);
    assert_eq!(config.connect_timeout, Duration::from_secs(2));
    assert_eq!(config.addr(), "cache.internal:11212");
}

// =============================================================================
// Set Tests
// =============================================================================

#[test]
fn test_set_stored() {
    let (mut client, server) = scripted_server(vec![b"STORED\r\n"]);

    assert!(client.set("abc123", b"deadbeef", 60).unwrap());

    drop(client);
    assert_eq!(server.join().unwrap(), 1);
}

#[test]
fn test_set_not_stored_fails() {
    let (mut client, _server) = scripted_server(vec![b"NOT_STORED\r\n"]);

    let err = client.set("abc123", b"deadbeef", 60).unwrap_err();

    assert!(matches!(err, MemtapError::Set { .. }));
}

// =============================================================================
// Get Tests
// =============================================================================

#[test]
fn test_get_returns_value() {
    let (mut client, _server) =
        scripted_server(vec![b"VALUE abc123 0 8\r\ndeadbeef\r\nEND\r\n"]);

    assert_eq!(client.get("abc123").unwrap(), b"deadbeef");
}

#[test]
fn test_get_roundtrips_value_with_embedded_crlf() {
    let (mut client, _server) = scripted_server(vec![b"VALUE k 0 10\r\ndead\r\nbeef\r\nEND\r\n"]);

    assert_eq!(client.get("k").unwrap(), b"dead\r\nbeef");
}

#[test]
fn test_get_roundtrips_empty_value() {
    let (mut client, _server) = scripted_server(vec![b"VALUE k 0 0\r\n\r\nEND\r\n"]);

    assert_eq!(client.get("k").unwrap(), b"");
}

#[test]
fn test_get_miss_fails() {
    let (mut client, _server) = scripted_server(vec![b"END\r\n"]);

    let err = client.get("missing").unwrap_err();

    assert!(matches!(err, MemtapError::Get { .. }));
}

#[test]
fn test_get_server_error_fails() {
    let (mut client, _server) = scripted_server(vec![b"ERROR\r\n"]);

    let err = client.get("abc123").unwrap_err();

    assert!(matches!(err, MemtapError::Get { .. }));
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_deleted() {
    let (mut client, _server) = scripted_server(vec![b"DELETED\r\n"]);

    assert!(client.delete("abc123").unwrap());
}

#[test]
fn test_delete_not_found_fails() {
    let (mut client, _server) = scripted_server(vec![b"NOT_FOUND\r\n"]);

    let err = client.delete("missing").unwrap_err();

    assert!(matches!(err, MemtapError::KeyNotFound { .. }));
}

#[test]
fn test_delete_unexpected_reply_fails() {
    let (mut client, _server) = scripted_server(vec![b"ERROR\r\n"]);

    let err = client.delete("abc123").unwrap_err();

    assert!(matches!(err, MemtapError::Delete { .. }));
}

#[test]
fn test_delete_if_exists_treats_not_found_as_success() {
    let (mut client, _server) = scripted_server(vec![b"NOT_FOUND\r\n"]);

    assert!(client.delete_if_exists("missing").unwrap());
}

#[test]
fn test_delete_if_exists_propagates_other_failures() {
    let (mut client, _server) = scripted_server(vec![b"ERROR\r\n"]);

    let err = client.delete_if_exists("abc123").unwrap_err();

    assert!(matches!(err, MemtapError::Delete { .. }));
}

// =============================================================================
// Connection Lifecycle Tests
// =============================================================================

#[test]
fn test_connection_is_lazy() {
    let (mut client, _server) = scripted_server(vec![b"STORED\r\n"]);

    assert!(!client.is_connected());
    client.set("abc123", b"deadbeef", 60).unwrap();
    assert!(client.is_connected());
}

#[test]
fn test_connection_is_established_once_across_operations() {
    let (mut client, server) = scripted_server(vec![
        b"STORED\r\n",
        b"VALUE abc123 0 8\r\ndeadbeef\r\nEND\r\n",
        b"DELETED\r\n",
    ]);

    client.set("abc123", b"deadbeef", 60).unwrap();
    client.get("abc123").unwrap();
    client.delete("abc123").unwrap();

    drop(client);
    assert_eq!(server.join().unwrap(), 1);
}

#[test]
fn test_connect_failure_carries_target() {
    // grab a free port, then close the listener so the connect is refused
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = Config::builder()
        .host("127.0.0.1")
        .port(port)
        .connect_timeout(Duration::from_secs(5))
        .build();
    let mut client = Client::new(config);

    let err = client.set("abc123", b"deadbeef", 60).unwrap_err();

    match err {
        MemtapError::Connect {
            host, port: seen, ..
        } => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(seen, port);
        }
        other => panic!("expected Connect error, got: {other}"),
    }
}

// =============================================================================
// Fire-and-Forget Mode Tests
// =============================================================================

#[test]
fn test_async_mode_flag() {
    let mut client = Client::default();

    assert!(!client.is_async_mode());
    client.set_async_mode(true);
    assert!(client.is_async_mode());
    client.set_async_mode(false);
    assert!(!client.is_async_mode());
}

#[test]
fn test_async_set_returns_without_reading() {
    // the server never writes a response, so a synchronous set would block
    let (mut client, _server) = scripted_server(vec![b""]);
    client.set_async_mode(true);

    let start = Instant::now();
    assert!(client.set("abc123", b"deadbeef", 60).unwrap());
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_get_forces_synchronous_read_in_async_mode() {
    let (mut client, _server) =
        scripted_server(vec![b"VALUE abc123 0 8\r\ndeadbeef\r\nEND\r\n"]);
    client.set_async_mode(true);

    assert_eq!(client.get("abc123").unwrap(), b"deadbeef");
}

#[test]
fn test_fire_and_forget_leaves_ack_on_stream() {
    // the skipped STORED acknowledgment is consumed by the next synchronous
    // command, which misreads it as its own response
    let (mut client, _server) = scripted_server(vec![
        b"STORED\r\n",
        b"VALUE abc123 0 8\r\ndeadbeef\r\nEND\r\n",
    ]);

    client.set_async_mode(true);
    client.set("abc123", b"deadbeef", 60).unwrap();

    client.set_async_mode(false);
    let err = client.get("abc123").unwrap_err();

    assert!(matches!(err, MemtapError::Get { .. }));
}

// =============================================================================
// Round-Trip Scenario
// =============================================================================

#[test]
fn test_round_trip_scenario() {
    let (mut client, server) = scripted_server(vec![
        b"STORED\r\n",
        b"VALUE abc123 0 8\r\ndeadbeef\r\nEND\r\n",
        b"DELETED\r\n",
        b"END\r\n",
        b"NOT_FOUND\r\n",
        b"NOT_FOUND\r\n",
    ]);

    assert!(client.set("abc123", b"deadbeef", 60).unwrap());
    assert_eq!(client.get("abc123").unwrap(), b"deadbeef");
    assert!(client.delete("abc123").unwrap());

    let err = client.get("abc123").unwrap_err();
    assert!(matches!(err, MemtapError::Get { .. }));

    let err = client.delete("abc123").unwrap_err();
    assert!(matches!(err, MemtapError::KeyNotFound { .. }));

    assert!(client.delete_if_exists("abc123").unwrap());

    drop(client);
    assert_eq!(server.join().unwrap(), 1);
}
