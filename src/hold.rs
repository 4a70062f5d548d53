//! File-backed key-value store
//!
//! `Hold` owns the in-memory entries and decides when the codec runs:
//! after each mutation when auto-sync is on, and once at construction when
//! auto-reload is on and the storage file exists.

use crate::codec;
use crate::config::{HoldConfig, Mode};
use crate::error::{StoreError, StoreResult};
use crate::store::{Entry, MemoryStore, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// Typed key-value store persisted to an XML file
#[derive(Debug)]
pub struct Hold {
    config: HoldConfig,
    store: MemoryStore,
}

/// Iterator over the entries of a [`Hold`], in insertion order
///
/// Cloning the iterator restarts it from its current position.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    inner: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl Hold {
    /// Create a store from a configuration
    ///
    /// With auto-reload on, an existing storage file is loaded; a missing
    /// file leaves the store empty. Unsupported modes never reload.
    pub fn open(config: HoldConfig) -> StoreResult<Self> {
        let mut hold = Hold {
            config,
            store: MemoryStore::new(),
        };

        if !hold.config.mode.is_supported() {
            warn!(
                "Mode '{}' is not implemented, data operations on {:?} will fail",
                hold.config.mode, hold.config.path
            );
            return Ok(hold);
        }

        if hold.config.auto_reload {
            hold.load()?;
        }

        Ok(hold)
    }

    /// Create a store at `path` with the default configuration
    pub fn open_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open(HoldConfig::new(path.as_ref()))
    }

    fn ensure_supported(&self) -> StoreResult<()> {
        match &self.config.mode {
            Mode::KeyValue => Ok(()),
            Mode::Unsupported(name) => Err(StoreError::NotImplemented { mode: name.clone() }),
        }
    }

    /// Persist after a mutation when auto-sync is on
    fn sync(&self) -> StoreResult<()> {
        if self.config.auto_sync {
            self.save()?;
        }
        Ok(())
    }

    /// Insert or update a key
    ///
    /// An existing key keeps its position and gets the new value and tag.
    /// Fails with `InvalidArgument` when no key is given. If the auto-sync
    /// save fails, the in-memory change stays and the error is returned.
    pub fn write(&mut self, key: Option<&str>, value: impl Into<Value>) -> StoreResult<()> {
        self.ensure_supported()?;

        let key = key.ok_or_else(|| {
            StoreError::InvalidArgument("key must be provided in keyvalue mode".to_string())
        })?;
        let value = value.into();
        value
            .check_persistable()
            .map_err(|reason| StoreError::InvalidArgument(format!("key '{}': {}", key, reason)))?;

        let dtype = value.dtype();
        let is_new = self.store.set(key, value);
        debug!(
            "{} '{}' ({})",
            if is_new { "Inserted" } else { "Updated" },
            key,
            dtype
        );

        self.sync()
    }

    /// Assign a value to a key, same as [`Hold::write`] with a key
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> StoreResult<()> {
        self.write(Some(key), value)
    }

    /// Get the current value of a key
    pub fn get(&self, key: &str) -> StoreResult<&Value> {
        self.ensure_supported()?;
        self.store.get(key).ok_or_else(|| StoreError::not_found(key))
    }

    /// Get the entry (value and tag) of a key
    pub fn get_entry(&self, key: &str) -> StoreResult<&Entry> {
        self.ensure_supported()?;
        self.store.get_entry(key).ok_or_else(|| StoreError::not_found(key))
    }

    /// Remove a key, see [`Hold::pop`] for save failures
    pub fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.pop(key).map(|_| ())
    }

    /// Remove a key and return its value
    ///
    /// If the auto-sync save fails, the key stays removed from memory and
    /// the value is dropped with the error.
    pub fn pop(&mut self, key: &str) -> StoreResult<Value> {
        self.ensure_supported()?;

        let entry = self.store.remove(key).ok_or_else(|| StoreError::not_found(key))?;
        debug!("Removed '{}'", key);

        self.sync()?;
        Ok(entry.into_value())
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> StoreResult<bool> {
        self.ensure_supported()?;
        Ok(self.store.exists(key))
    }

    /// Number of entries
    pub fn len(&self) -> StoreResult<usize> {
        self.ensure_supported()?;
        Ok(self.store.len())
    }

    /// Whether the store has no entries
    pub fn is_empty(&self) -> StoreResult<bool> {
        self.ensure_supported()?;
        Ok(self.store.is_empty())
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> StoreResult<Entries<'_>> {
        self.ensure_supported()?;
        Ok(Entries {
            inner: self.store.iter(),
        })
    }

    /// Owned copy of all entries, for read-only consumers
    pub fn snapshot(&self) -> StoreResult<Vec<Entry>> {
        self.ensure_supported()?;
        Ok(self.store.entries().to_vec())
    }

    /// Write the whole store to the storage file, replacing it
    pub fn save(&self) -> StoreResult<()> {
        self.ensure_supported()?;
        codec::write_file(&self.config.path, self.store.iter())?;
        info!("Saved {} entries to {:?}", self.store.len(), self.config.path);
        Ok(())
    }

    /// Replace the in-memory entries with the storage file's content
    ///
    /// A missing file leaves the store empty. On a decode error the
    /// in-memory entries are left untouched.
    pub fn load(&mut self) -> StoreResult<()> {
        self.ensure_supported()?;

        match codec::read_file(&self.config.path)? {
            Some(entries) => {
                self.store = MemoryStore::from_entries(entries);
                info!("Loaded {} entries from {:?}", self.store.len(), self.config.path);
            }
            None => {
                self.store.clear();
                debug!("Nothing to load from {:?}", self.config.path);
            }
        }

        Ok(())
    }

    /// Path of the storage file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Persistence mode
    pub fn mode(&self) -> &Mode {
        &self.config.mode
    }

    /// Whether mutations are saved immediately
    pub fn auto_sync(&self) -> bool {
        self.config.auto_sync
    }

    /// Whether construction loads existing storage
    pub fn auto_reload(&self) -> bool {
        self.config.auto_reload
    }

    /// The configuration this store was opened with
    pub fn config(&self) -> &HoldConfig {
        &self.config
    }
}
