//! Connection Handler
//!
//! Handles one client connection: read exactly one bounded request, run it
//! through parse → dispatch, write the response, done. The connection is
//! never reused for a second request.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::dispatch::dispatch;
use crate::error::{Result, ShelfError};
use crate::protocol::{
    discard_request_tail, parse_command, read_request, write_response, Response,
};
use crate::store::Store;

/// Handles a single client connection
pub struct Connection<S: Store> {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Reference to the storage backend
    store: Arc<S>,

    /// Request size limit (payload bytes, excluding the newline)
    max_request_len: usize,

    /// Peer address for logging
    peer_addr: String,
}

impl<S: Store> Connection<S> {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O and applies the configured timeouts.
    pub fn new(stream: TcpStream, store: Arc<S>, config: &Config) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            store,
            max_request_len: config.max_request_len,
            peer_addr,
        })
    }

    /// Handle the connection (blocking)
    ///
    /// Reads one request and sends one response. A peer that closes without
    /// sending anything gets no response. Disconnect-shaped I/O failures are
    /// absorbed here; anything else propagates to the accept loop.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        let request = match read_request(&mut self.reader, self.max_request_len) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                // Peer closed without sending data: no response at all
                tracing::debug!("Client {} closed before sending data", self.peer_addr);
                return Ok(());
            }
            Err(ShelfError::RequestTooLarge { limit }) => {
                tracing::warn!(
                    "Client {} sent a request over the {} byte limit",
                    self.peer_addr,
                    limit
                );
                // Consume the rest of the line so the close carries a FIN,
                // not a reset that could eat the ERROR response
                let _ = discard_request_tail(&mut self.reader);
                return self.send_response(&Response::Error);
            }
            Err(ShelfError::Io(ref e)) if is_disconnect(e.kind()) => {
                tracing::debug!("Client {} disconnected mid-read: {}", self.peer_addr, e);
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                return Err(e);
            }
        };

        let response = match parse_command(&request) {
            Ok(command) => {
                tracing::trace!("Received {} from {}", command.verb(), self.peer_addr);
                dispatch(command, self.store.as_ref())
            }
            Err(e) => {
                tracing::debug!("Malformed request from {}: {}", self.peer_addr, e);
                Response::Error
            }
        };

        if let Err(e) = self.send_response(&response) {
            // Client may disconnect before the response lands; not a
            // server error.
            if let ShelfError::Io(ref io_err) = e {
                if is_disconnect(io_err.kind()) {
                    tracing::debug!(
                        "Client {} disconnected before response could be sent: {}",
                        self.peer_addr,
                        e
                    );
                    return Ok(());
                }
            }
            tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
            return Err(e);
        }

        Ok(())
    }

    /// Send a response to the client
    fn send_response(&mut self, response: &Response) -> Result<()> {
        write_response(&mut self.writer, response)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// I/O error kinds that mean "the peer went away", not "the server broke"
fn is_disconnect(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::UnexpectedEof
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::WouldBlock
            | ErrorKind::TimedOut
    )
}
