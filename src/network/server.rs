//! TCP Server
//!
//! Binds the listener and runs the blocking accept loop. Connections are
//! served strictly one at a time: read, respond, close, accept the next.
//! Per-connection failures are logged and never stop the loop.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::store::Store;

/// TCP server for shelfkv
pub struct Server<S: Store> {
    config: Config,
    store: Arc<S>,
    listener: TcpListener,
}

impl<S: Store> Server<S> {
    /// Bind the listen address and prepare to serve
    pub fn bind(config: Config, store: Arc<S>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;
        tracing::info!("Listening on {}", config.listen_addr);

        Ok(Self {
            config,
            store,
            listener,
        })
    }

    /// Address the listener actually bound (useful with port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the accept loop (blocking, does not return under normal operation)
    ///
    /// Each accepted connection is served to completion before the next
    /// accept; the transport's backlog is the only queueing.
    pub fn run(&self) -> Result<()> {
        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!("Failed to accept connection: {}", e);
                    continue;
                }
            };

            let mut connection = match Connection::new(stream, Arc::clone(&self.store), &self.config)
            {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("Failed to set up connection: {}", e);
                    continue;
                }
            };

            if let Err(e) = connection.handle() {
                tracing::warn!(
                    "Connection from {} ended with error: {}",
                    connection.peer_addr(),
                    e
                );
            }
        }

        Ok(())
    }
}
