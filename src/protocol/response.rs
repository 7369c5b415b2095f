//! Response definitions
//!
//! Represents responses to clients and owns the wire framing rule. Stored
//! values carry no terminator; the newline after a GET payload is added
//! here, and only here.

/// A response to send to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Success with no payload (SET, DEL)
    Ok,

    /// Success with a value payload (GET)
    Value(Vec<u8>),

    /// GET on an absent key — a distinct non-error outcome
    NotFound,

    /// Malformed request or store failure
    Error,
}

impl Response {
    /// Encode to the exact bytes written on the wire
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Response::Ok => b"OK\n".to_vec(),
            Response::Value(value) => {
                let mut out = Vec::with_capacity(3 + value.len() + 1);
                out.extend_from_slice(b"OK\n");
                out.extend_from_slice(value);
                out.push(b'\n');
                out
            }
            Response::NotFound => b"NOTFOUND\n".to_vec(),
            Response::Error => b"ERROR\n".to_vec(),
        }
    }
}
