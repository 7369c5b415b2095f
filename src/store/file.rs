//! File-backed store
//!
//! One file per key under a data directory. No in-memory cache: every
//! operation is a fresh round-trip to disk, so whatever is on disk is the
//! whole truth (and survives restarts for free).

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{Result, ShelfError};

use super::key::validate_key;
use super::Store;

/// Temp file used during `put`. Keys cannot begin with `.`, so this name can
/// never collide with a stored value.
const PUT_TMP_FILENAME: &str = ".put.tmp";

/// Durable file-per-key storage backend
///
/// ## Concurrency
/// - `put`/`delete` are serialized by `write_lock`; the rename-based
///   overwrite means readers always observe either the old or the new value,
///   never a partial write
/// - `get` takes no lock
pub struct FileStore {
    /// Directory holding one file per key
    data_dir: PathBuf,

    /// Serializes mutations (the filesystem gives no atomicity across
    /// the write/rename pair)
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open or create a store rooted at the given directory
    pub fn open(path: &Path) -> Result<Self> {
        fs::create_dir_all(path)?;

        Ok(Self {
            data_dir: path.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    /// Directory this store persists into
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Validate the key and resolve it to its backing file path
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.data_dir.join(key))
    }
}

impl Store for FileStore {
    /// Store a value durably: write to a temp file, fsync, rename over the
    /// final path. Overwrite is unconditional and all-or-nothing.
    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_path(key)?;
        let tmp_path = self.data_dir.join(PUT_TMP_FILENAME);

        let _guard = self.write_lock.lock();

        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(value)?;
        tmp.sync_all()?;
        drop(tmp);

        fs::rename(&tmp_path, &path)?;

        tracing::debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.key_path(key)?;

        match fs::read(&path) {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ShelfError::KeyNotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a key's file. Deleting an absent key succeeds silently.
    fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;

        let _guard = self.write_lock.lock();

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Deleted {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
