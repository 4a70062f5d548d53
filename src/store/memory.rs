//! In-memory storage implementation

use super::entry::Entry;
use super::value::Value;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

/// Type alias for the key index with SipHasher
type KeyIndex = HashMap<String, usize, BuildHasherDefault<SipHasher13>>;

/// Ordered in-memory key-value table
///
/// Entries live in a vector in insertion order; a key index maps each key
/// to its position so lookups do not scan.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Entries in insertion order
    entries: Vec<Entry>,

    /// Key -> position in `entries`
    index: KeyIndex,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    /// Create a new memory store with specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity_and_hasher(
                capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            ),
        }
    }

    /// Build a store from decoded entries, later duplicates overwrite earlier ones
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.insert_entry(entry);
        }
        store
    }

    /// Set a key-value pair, returns true if the key is new
    ///
    /// An existing key keeps its position; only its value and tag change.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        match self.index.get(key) {
            Some(&pos) => {
                self.entries[pos].replace(value);
                false
            }
            None => {
                self.push(Entry::new(key, value));
                true
            }
        }
    }

    fn insert_entry(&mut self, entry: Entry) {
        match self.index.get(entry.key()) {
            Some(&pos) => self.entries[pos] = entry,
            None => self.push(entry),
        }
    }

    fn push(&mut self, entry: Entry) {
        self.index.insert(entry.key().to_string(), self.entries.len());
        self.entries.push(entry);
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.get_entry(key).map(Entry::value)
    }

    /// Get the entry for a key (value and tag)
    pub fn get_entry(&self, key: &str) -> Option<&Entry> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }

    /// Remove a key, returning its entry if it existed
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let pos = self.index.remove(key)?;
        let entry = self.entries.remove(pos);

        // Everything after the removed slot moved down by one
        for later in &self.entries[pos..] {
            if let Some(slot) = self.index.get_mut(later.key()) {
                *slot -= 1;
            }
        }

        Some(entry)
    }

    /// Check if a key exists
    pub fn exists(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Remove all keys
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Get the number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Keys in insertion order
    #[cfg(test)]
    fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(Entry::key).collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
