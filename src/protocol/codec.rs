//! Protocol codec
//!
//! Parsing for the text wire protocol, plus stream helpers for reading one
//! bounded request and writing one response.
//!
//! ## Tokenization
//!
//! A request line is split on spaces: verb, key, then rest-of-line as the
//! value. Runs of spaces between fields collapse, matching the original
//! tokenizer; the value may contain embedded spaces but cannot start with
//! one. A single trailing `\n` (optionally preceded by `\r`) is stripped.

use std::io::{BufRead, Read, Write};

use crate::error::{Result, ShelfError};

use super::{Command, Response};

// =============================================================================
// Command Parsing
// =============================================================================

/// Parse one request message into a command.
///
/// The message is the raw bytes of one request, terminator included or not.
/// Returns `ShelfError::Protocol` for anything malformed: unknown verb,
/// missing key, `SET` without a value, non-UTF-8 key.
pub fn parse_command(message: &[u8]) -> Result<Command> {
    let line = strip_line_terminator(message);

    let (verb, rest) = next_token(line)
        .ok_or_else(|| ShelfError::Protocol("empty request line".to_string()))?;

    match verb {
        b"SET" => {
            let (key, rest) = next_token(rest)
                .ok_or_else(|| ShelfError::Protocol("SET requires a key".to_string()))?;
            let key = key_to_string(key)?;

            let value = skip_spaces(rest);
            if value.is_empty() {
                return Err(ShelfError::Protocol("SET requires a value".to_string()));
            }

            Ok(Command::Set {
                key,
                value: value.to_vec(),
            })
        }
        b"GET" => {
            let (key, _rest) = next_token(rest)
                .ok_or_else(|| ShelfError::Protocol("GET requires a key".to_string()))?;
            // Content after the key is ignored
            Ok(Command::Get {
                key: key_to_string(key)?,
            })
        }
        b"DEL" => {
            let (key, _rest) = next_token(rest)
                .ok_or_else(|| ShelfError::Protocol("DEL requires a key".to_string()))?;
            Ok(Command::Delete {
                key: key_to_string(key)?,
            })
        }
        other => Err(ShelfError::Protocol(format!(
            "unknown command: {:?}",
            String::from_utf8_lossy(other)
        ))),
    }
}

/// Strip one trailing `\n` and, if present before it, one `\r`
fn strip_line_terminator(message: &[u8]) -> &[u8] {
    let message = message.strip_suffix(b"\n").unwrap_or(message);
    message.strip_suffix(b"\r").unwrap_or(message)
}

/// Split off the next space-delimited token, skipping leading spaces.
/// Returns `None` if only spaces (or nothing) remain.
fn next_token(input: &[u8]) -> Option<(&[u8], &[u8])> {
    let start = input.iter().position(|&b| b != b' ')?;
    let input = &input[start..];

    match input.iter().position(|&b| b == b' ') {
        Some(end) => Some((&input[..end], &input[end + 1..])),
        None => Some((input, &input[input.len()..])),
    }
}

fn skip_spaces(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|&b| b != b' ').unwrap_or(input.len());
    &input[start..]
}

/// Keys travel as UTF-8 text; the store applies its own allow-list on top
fn key_to_string(key: &[u8]) -> Result<String> {
    std::str::from_utf8(key)
        .map(str::to_string)
        .map_err(|_| ShelfError::Protocol("key is not valid UTF-8".to_string()))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one request from a stream, bounded by `max_len` payload bytes
/// (the trailing newline does not count against the limit).
///
/// Returns:
/// - `Ok(None)` — peer closed without sending any data
/// - `Ok(Some(bytes))` — one complete request, terminator included if the
///   peer sent one (EOF also ends a request)
/// - `Err(RequestTooLarge)` — no terminator within the limit
pub fn read_request<R: BufRead>(reader: &mut R, max_len: usize) -> Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();

    // Reading one byte past the limit distinguishes "exactly at the limit"
    // from "over it" without ever buffering an unbounded line.
    let n = Read::by_ref(reader)
        .take(max_len as u64 + 1)
        .read_until(b'\n', &mut buf)?;

    if n == 0 {
        return Ok(None);
    }

    if buf.last() != Some(&b'\n') && buf.len() > max_len {
        return Err(ShelfError::RequestTooLarge { limit: max_len });
    }

    Ok(Some(buf))
}

/// Discard input up to and including the next `\n`, or to EOF.
///
/// Used after rejecting an oversized request: consuming the rest of the line
/// lets the connection close with a FIN instead of a reset, so the peer
/// reliably sees the `ERROR` response.
pub fn discard_request_tail<R: BufRead>(reader: &mut R) -> Result<()> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }

        match buf.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

/// Write a response's wire encoding to a stream and flush it
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&response.encode())?;
    writer.flush()?;
    Ok(())
}
