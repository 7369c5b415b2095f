//! End-to-end tests over TCP
//!
//! Each test speaks the real wire protocol against a server on an ephemeral
//! port, one connection per command, exactly as a client would.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;

use shelfkv::network::Server;
use shelfkv::{Config, FileStore, ShelfError, Store};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

/// Start a server on an ephemeral port, serving in a background thread.
///
/// Returns the bound address, a handle to the same store for state checks,
/// and the TempDir guard keeping the data directory alive.
fn start_test_server() -> (SocketAddr, Arc<FileStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();

    let config = Config::builder()
        .data_dir(temp_dir.path())
        .listen_addr("127.0.0.1:0")
        .max_request_len(256)
        .build();

    let store = Arc::new(FileStore::open(temp_dir.path()).unwrap());
    let server = Server::bind(config, Arc::clone(&store)).unwrap();
    let addr = server.local_addr().unwrap();

    thread::spawn(move || {
        let _ = server.run();
    });

    (addr, store, temp_dir)
}

/// Send one request and collect the full response (server closes after it)
fn request(addr: SocketAddr, bytes: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(bytes).unwrap();
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

// =============================================================================
// Command Round-Trips
// =============================================================================

#[test]
fn test_set_then_get() {
    let (addr, store, _guard) = start_test_server();

    assert_eq!(request(addr, b"SET foo bar\n"), b"OK\n");
    assert_eq!(store.get("foo").unwrap(), b"bar");

    assert_eq!(request(addr, b"GET foo\n"), b"OK\nbar\n");
}

#[test]
fn test_get_missing_key() {
    let (addr, _store, _guard) = start_test_server();

    assert_eq!(request(addr, b"GET missing\n"), b"NOTFOUND\n");
}

#[test]
fn test_del_then_get() {
    let (addr, _store, _guard) = start_test_server();

    assert_eq!(request(addr, b"SET foo bar\n"), b"OK\n");
    assert_eq!(request(addr, b"DEL foo\n"), b"OK\n");
    assert_eq!(request(addr, b"GET foo\n"), b"NOTFOUND\n");
}

#[test]
fn test_del_never_set_key_is_ok() {
    let (addr, _store, _guard) = start_test_server();

    assert_eq!(request(addr, b"DEL ghost\n"), b"OK\n");
}

#[test]
fn test_set_without_value_is_error() {
    let (addr, store, _guard) = start_test_server();

    assert_eq!(request(addr, b"SET foo\n"), b"ERROR\n");
    assert!(matches!(store.get("foo"), Err(ShelfError::KeyNotFound)));
}

#[test]
fn test_unknown_verb_is_error() {
    let (addr, _store, _guard) = start_test_server();

    assert_eq!(request(addr, b"BOGUS foo bar\n"), b"ERROR\n");
}

#[test]
fn test_overwrite_returns_latest_value() {
    let (addr, _store, _guard) = start_test_server();

    assert_eq!(request(addr, b"SET k v1\n"), b"OK\n");
    assert_eq!(request(addr, b"SET k v2\n"), b"OK\n");
    assert_eq!(request(addr, b"GET k\n"), b"OK\nv2\n");
}

#[test]
fn test_value_with_spaces_round_trips() {
    let (addr, _store, _guard) = start_test_server();

    assert_eq!(request(addr, b"SET msg hello wide world\n"), b"OK\n");
    assert_eq!(request(addr, b"GET msg\n"), b"OK\nhello wide world\n");
}

// =============================================================================
// Connection Lifecycle
// =============================================================================

#[test]
fn test_silent_close_gets_no_response() {
    let (addr, store, _guard) = start_test_server();

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    assert!(response.is_empty());

    // Store untouched, and the server still serves the next client
    assert!(matches!(store.get("foo"), Err(ShelfError::KeyNotFound)));
    assert_eq!(request(addr, b"GET foo\n"), b"NOTFOUND\n");
}

#[test]
fn test_request_without_newline_is_served_on_eof() {
    let (addr, _store, _guard) = start_test_server();

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(b"SET foo bar").unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    assert_eq!(response, b"OK\n");
}

#[test]
fn test_second_command_on_same_connection_is_not_read() {
    let (addr, store, _guard) = start_test_server();

    // Both lines arrive in one write; the server must only honor the first.
    // The second line goes unread, so the close may carry a reset: read
    // exactly the response bytes instead of draining to EOF.
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(b"SET a 1\nSET b 2\n").unwrap();

    let mut response = [0u8; 3];
    stream.read_exact(&mut response).unwrap();
    assert_eq!(&response, b"OK\n");

    assert_eq!(store.get("a").unwrap(), b"1");
    assert!(matches!(store.get("b"), Err(ShelfError::KeyNotFound)));
}

// =============================================================================
// Limits and Key Safety
// =============================================================================

#[test]
fn test_oversized_request_is_rejected() {
    let (addr, store, _guard) = start_test_server();

    // 256-byte limit; this request body is far past it
    let mut message = b"SET big ".to_vec();
    message.extend(std::iter::repeat(b'x').take(512));
    message.push(b'\n');

    assert_eq!(request(addr, &message), b"ERROR\n");
    assert!(matches!(store.get("big"), Err(ShelfError::KeyNotFound)));
}

#[test]
fn test_request_at_size_limit_is_served() {
    let (addr, _store, _guard) = start_test_server();

    // Pad the value so the payload is exactly 256 bytes before the newline
    let prefix = b"SET fit ".len();
    let value = vec![b'v'; 256 - prefix];

    let mut message = b"SET fit ".to_vec();
    message.extend_from_slice(&value);
    message.push(b'\n');

    assert_eq!(request(addr, &message), b"OK\n");

    let mut expected = b"OK\n".to_vec();
    expected.extend_from_slice(&value);
    expected.push(b'\n');
    assert_eq!(request(addr, b"GET fit\n"), expected);
}

#[test]
fn test_traversal_key_is_rejected_over_the_wire() {
    let (addr, _store, guard) = start_test_server();

    assert_eq!(request(addr, b"SET ../escape gotcha\n"), b"ERROR\n");
    assert_eq!(request(addr, b"GET ..\n"), b"ERROR\n");

    assert!(!guard.path().join("..").join("escape").exists());
}

#[test]
fn test_server_survives_bad_clients() {
    let (addr, _store, _guard) = start_test_server();

    // A parade of abuse, then a well-formed request
    assert_eq!(request(addr, b"\n"), b"ERROR\n");
    assert_eq!(request(addr, b"SET\n"), b"ERROR\n");
    assert_eq!(request(addr, &[0xff, 0xfe, b'\n']), b"ERROR\n");

    assert_eq!(request(addr, b"SET alive yes\n"), b"OK\n");
    assert_eq!(request(addr, b"GET alive\n"), b"OK\nyes\n");
}
