use std::collections::HashMap;
use std::collections::hash_map::Entry;
use super::KeyId;

/// Maps a Subject Key Identifier to the position of the first record that
/// carried it. Append-only; later records with the same identifier never
/// replace the original entry.
#[derive(Debug, Clone, Default)]
pub struct KeyIdentifierIndex {
    entries: HashMap<KeyId, usize>,
}

impl KeyIdentifierIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the key was not yet registered and has now been.
    pub fn insert_if_absent(&mut self, key: &KeyId, record: usize) -> bool {
        match self.entries.entry(key.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn lookup(&self, key: &KeyId) -> Option<usize> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
