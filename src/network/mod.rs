//! Network Module
//!
//! TCP listener and connection handling.
//!
//! ## Architecture
//! - Single blocking accept loop, no worker threads
//! - Each connection carries exactly one request and one response
//! - Transport failures abort the affected connection only; the loop
//!   keeps accepting

mod server;
mod connection;

pub use server::Server;
pub use connection::Connection;
