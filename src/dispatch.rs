//! Command Dispatcher
//!
//! Maps a parsed command to exactly one storage operation and folds the
//! outcome into a response. Stateless: a pure function of the command and
//! the store's reply.

use crate::error::ShelfError;
use crate::protocol::{Command, Response};
use crate::store::Store;

/// Execute one command against the store and produce its response.
///
/// - `SET` → `put` → `Ok`, or `Error` on any store failure
/// - `GET` → `get` → `Value`, `NotFound` for an absent key, else `Error`
/// - `DEL` → `delete` → `Ok` (absent keys included), else `Error`
///
/// Store failures are logged here; the client only ever sees `ERROR`.
pub fn dispatch<S: Store>(command: Command, store: &S) -> Response {
    match command {
        Command::Set { key, value } => match store.put(&key, &value) {
            Ok(()) => Response::Ok,
            Err(e) => {
                tracing::warn!("SET {} failed: {}", key, e);
                Response::Error
            }
        },
        Command::Get { key } => match store.get(&key) {
            Ok(value) => Response::Value(value),
            Err(ShelfError::KeyNotFound) => Response::NotFound,
            Err(e) => {
                tracing::warn!("GET {} failed: {}", key, e);
                Response::Error
            }
        },
        Command::Delete { key } => match store.delete(&key) {
            Ok(()) => Response::Ok,
            Err(e) => {
                tracing::warn!("DEL {} failed: {}", key, e);
                Response::Error
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// In-memory stand-in for the file store
    #[derive(Default)]
    struct MemStore {
        data: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl Store for MemStore {
        fn put(&self, key: &str, value: &[u8]) -> Result<()> {
            self.data.lock().insert(key.to_string(), value.to_vec());
            Ok(())
        }

        fn get(&self, key: &str) -> Result<Vec<u8>> {
            self.data
                .lock()
                .get(key)
                .cloned()
                .ok_or(ShelfError::KeyNotFound)
        }

        fn delete(&self, key: &str) -> Result<()> {
            self.data.lock().remove(key);
            Ok(())
        }
    }

    /// Store whose medium always fails
    struct BrokenStore;

    impl Store for BrokenStore {
        fn put(&self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into())
        }

        fn get(&self, _key: &str) -> Result<Vec<u8>> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into())
        }

        fn delete(&self, _key: &str) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone").into())
        }
    }

    fn set(key: &str, value: &[u8]) -> Command {
        Command::Set {
            key: key.to_string(),
            value: value.to_vec(),
        }
    }

    fn get(key: &str) -> Command {
        Command::Get {
            key: key.to_string(),
        }
    }

    fn del(key: &str) -> Command {
        Command::Delete {
            key: key.to_string(),
        }
    }

    #[test]
    fn set_then_get_returns_exact_bytes() {
        let store = MemStore::default();

        assert_eq!(dispatch(set("foo", b"bar"), &store), Response::Ok);
        assert_eq!(
            dispatch(get("foo"), &store),
            Response::Value(b"bar".to_vec())
        );
    }

    #[test]
    fn get_absent_key_is_not_found() {
        let store = MemStore::default();
        assert_eq!(dispatch(get("missing"), &store), Response::NotFound);
    }

    #[test]
    fn set_overwrites_without_versioning() {
        let store = MemStore::default();

        dispatch(set("k", b"v1"), &store);
        dispatch(set("k", b"v2"), &store);

        assert_eq!(dispatch(get("k"), &store), Response::Value(b"v2".to_vec()));
    }

    #[test]
    fn delete_is_idempotent() {
        let store = MemStore::default();

        // Never set
        assert_eq!(dispatch(del("ghost"), &store), Response::Ok);

        dispatch(set("k", b"v"), &store);
        assert_eq!(dispatch(del("k"), &store), Response::Ok);
        assert_eq!(dispatch(get("k"), &store), Response::NotFound);

        // Already deleted
        assert_eq!(dispatch(del("k"), &store), Response::Ok);
    }

    #[test]
    fn store_failures_become_error_responses() {
        let store = BrokenStore;

        assert_eq!(dispatch(set("k", b"v"), &store), Response::Error);
        assert_eq!(dispatch(get("k"), &store), Response::Error);
        assert_eq!(dispatch(del("k"), &store), Response::Error);
    }
}
