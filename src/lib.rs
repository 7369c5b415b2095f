//! # shelfkv
//!
//! A minimal durable key-value store with:
//! - One file per key; every operation is a fresh round-trip to disk
//! - Atomic overwrites (temp file + fsync + rename)
//! - A one-shot TCP text protocol: one command, one response, close
//! - Single-threaded, blocking connection handling
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Listener                            │
//! │               (one connection at a time)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Connection Handler                           │
//! │        (read one request → respond → close)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Parser    │─────────>│  Dispatcher │
//!   │ (text line) │ Command  │             │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  FileStore  │
//!                           │ (file/key)  │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod protocol;
pub mod dispatch;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, ShelfError};
pub use config::Config;
pub use dispatch::dispatch;
pub use store::{FileStore, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of shelfkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
