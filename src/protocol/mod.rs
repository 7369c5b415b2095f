//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (one request line, one response, connection closes)
//!
//! ### Requests
//! ```text
//! SET <key> <value...>\n
//! GET <key>\n
//! DEL <key>\n
//! ```
//! Fields are separated by spaces; the value runs to the end of the line and
//! may contain embedded spaces. Verbs are case-sensitive.
//!
//! ### Responses
//! ```text
//! OK\n              SET/DEL success
//! OK\n<value>\n     GET success
//! NOTFOUND\n        GET on an absent key
//! ERROR\n           malformed request, oversized request, or store failure
//! ```
//!
//! Requests longer than the configured maximum are rejected with `ERROR`,
//! never truncated.

mod command;
mod response;
mod codec;

pub use command::Command;
pub use response::Response;
pub use codec::{discard_request_tail, parse_command, read_request, write_response};
