//! Command definitions
//!
//! Represents commands from clients. Constructed fresh per request and
//! discarded after dispatch.

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a value under a key, overwriting any existing value
    Set { key: String, value: Vec<u8> },

    /// Fetch the value stored under a key
    Get { key: String },

    /// Remove a key (absent keys succeed silently)
    Delete { key: String },
}

impl Command {
    /// Verb name for logging
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get { .. } => "GET",
            Command::Delete { .. } => "DEL",
        }
    }
}
