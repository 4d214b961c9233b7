use core::fmt;

use crate::AnchorKey;
use crate::key::AnchorTable;

/// The rendered position of one section, captured at render time.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionAnchor<K> {
    pub key: K,
    /// Document-relative top of the section.
    pub top: u64,
}

impl<K: fmt::Debug> fmt::Debug for SectionAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionAnchor")
            .field("key", &self.key)
            .field("top", &self.top)
            .finish()
    }
}

/// Section positions by key.
///
/// Entries describe one layout. When layout changes, call [`AnchorMap::invalidate`] and register
/// the fresh positions.
#[derive(Clone, Debug)]
pub struct AnchorMap<K> {
    tops: AnchorTable<K>,
}

impl<K: AnchorKey> Default for AnchorMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AnchorKey> AnchorMap<K> {
    pub fn new() -> Self {
        Self {
            tops: AnchorTable::new(),
        }
    }

    /// Records (or moves) the section for `key`.
    pub fn register(&mut self, key: K, top: u64) {
        self.tops.insert(key, top);
    }

    pub fn register_anchor(&mut self, anchor: SectionAnchor<K>) {
        self.register(anchor.key, anchor.top);
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.tops.get(key).copied()
    }

    pub fn anchor(&self, key: &K) -> Option<SectionAnchor<K>> {
        let top = self.get(key)?;
        Some(SectionAnchor {
            key: key.clone(),
            top,
        })
    }

    pub fn remove(&mut self, key: &K) -> Option<u64> {
        self.tops.remove(key)
    }

    /// Drops every entry; positions from a previous layout are never reused.
    pub fn invalidate(&mut self) {
        self.tops.clear();
    }

    pub fn len(&self) -> usize {
        self.tops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }
}
