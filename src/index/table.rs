//! Index implementation
//!
//! Slot-mapped entry table with last-write-wins upsert.

use std::collections::HashMap;

use super::Entry;

/// In-memory index of current values
#[derive(Debug, Default, Clone)]
pub struct Index {
    /// Entries in first-insertion order
    entries: Vec<Entry>,

    /// Key → position in `entries`
    slots: HashMap<String, usize>,

    /// Approximate size in bytes (sum of key and value lengths)
    size: usize,
}

impl Index {
    /// Create a new empty Index
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the current value for a key
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.slots
            .get(key)
            .map(|&slot| self.entries[slot].value.as_str())
    }

    /// Insert a new entry or overwrite the value of an existing one
    ///
    /// Returns `true` if the key was not present before.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();

        if let Some(&slot) = self.slots.get(&key) {
            let entry = &mut self.entries[slot];
            self.size = self.size - entry.value.len() + value.len();
            entry.value = value;
            return false;
        }

        self.size += key.len() + value.len();
        self.slots.insert(key.clone(), self.entries.len());
        self.entries.push(Entry { key, value });
        true
    }

    /// Whether the key has a value
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get approximate size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterate over entries in first-insertion order
    pub fn iter(&self) -> IndexIter<'_> {
        IndexIter {
            inner: self.entries.iter(),
        }
    }
}

impl PartialEq for Index {
    /// Two indexes are equal when they map the same keys to the same values,
    /// regardless of insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|entry| other.lookup(&entry.key) == Some(entry.value.as_str()))
    }
}

impl Eq for Index {}

/// Iterator over index entries
pub struct IndexIter<'a> {
    inner: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for IndexIter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a Entry;
    type IntoIter = IndexIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
