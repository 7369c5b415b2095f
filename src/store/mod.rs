//! Storage Module
//!
//! Durable key→value mapping behind a small trait.
//!
//! ## Contract
//! - `put` overwrites unconditionally and is visible to subsequent `get`,
//!   including across process restarts
//! - `get` distinguishes "absent" (`KeyNotFound`) from medium failure (`Io`)
//! - `delete` of an absent key succeeds silently (idempotent)
//!
//! Keys are validated against an allow-list before any medium access; keys
//! are used as storage identifiers, so anything traversal-shaped is rejected.

mod file;
mod key;

pub use file::FileStore;
pub use key::{validate_key, MAX_KEY_LEN};

use crate::error::Result;

/// Durable key→value storage backend.
///
/// Implementations own the persisted copy of every value; callers only hold
/// transient copies during a single operation.
pub trait Store {
    /// Store `value` under `key`, overwriting any existing value.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Fetch the value stored under `key`.
    ///
    /// Returns `ShelfError::KeyNotFound` if no value is stored.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Remove any value stored under `key`. Absent keys are not an error.
    fn delete(&self, key: &str) -> Result<()>;
}
