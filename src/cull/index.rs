use std::collections::HashMap;
use std::path::PathBuf;

use crate::cull::descriptor::{TrackDescriptor, TrackKey};

/// One logical track and everything decided about it so far. Entries are
/// created on first sighting and never deleted; the final placement sweep
/// reads them once at the end of the run.
#[derive(Debug, Clone)]
pub struct LibraryEntry {
    pub key: TrackKey,
    pub current_best: TrackDescriptor,
    pub superseded_paths: Vec<PathBuf>,
}

/// Key → best-known-copy map, mutated one descriptor at a time by the
/// resolution engine. Keeps first-seen key order so the placement sweep is
/// deterministic.
#[derive(Debug, Default)]
pub struct LibraryIndex {
    entries: HashMap<TrackKey, LibraryEntry>,
    order: Vec<TrackKey>,
}

impl LibraryIndex {
    pub fn lookup(&self, key: &TrackKey) -> Option<&LibraryEntry> {
        self.entries.get(key)
    }

    /// Record the first sighting of a key. The caller checks absence first;
    /// inserting an existing key would drop its history.
    pub fn insert(&mut self, key: TrackKey, descriptor: TrackDescriptor) {
        debug_assert!(
            !self.entries.contains_key(&key),
            "insert requires an absent key"
        );
        self.order.push(key.clone());
        self.entries.insert(
            key.clone(),
            LibraryEntry {
                key,
                current_best: descriptor,
                superseded_paths: Vec::new(),
            },
        );
    }

    /// Replace the current best with a better copy, remembering the retired
    /// path. Returns the retired path, or `None` when the key was never
    /// inserted.
    pub fn supersede(&mut self, key: &TrackKey, descriptor: TrackDescriptor) -> Option<PathBuf> {
        let entry = self.entries.get_mut(key)?;
        let retired = std::mem::replace(&mut entry.current_best, descriptor);
        entry.superseded_paths.push(retired.path.clone());
        Some(retired.path)
    }

    /// Entries in first-seen key order.
    pub fn entries(&self) -> impl Iterator<Item = &LibraryEntry> {
        self.order.iter().filter_map(|key| self.entries.get(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
