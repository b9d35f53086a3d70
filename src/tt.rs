//! Transposition table.
//!
//! The memory strategies cache, per position hash, the bound window proved
//! at some depth plus the move that proved it. Entries below
//! [`MIN_STORE_DEPTH`] are not worth their lookup cost and are skipped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Shallowest subtree depth worth caching.
pub const MIN_STORE_DEPTH: u32 = 1;

/// Bounds proved for a position, valid when probed at `depth` or shallower.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub depth: u32,
    pub lower: i32,
    pub upper: i32,
    pub best_move_id: String,
}

impl TtEntry {
    /// True when the bounds pin the value exactly.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.lower == self.upper
    }
}

/// Concurrent position cache shared between search threads.
///
/// A plain `RwLock<HashMap>` rather than a fixed-slot lockless table:
/// entries carry an owned move id, and the tables here stay small enough
/// that eviction pressure never materializes.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    map: RwLock<HashMap<u64, TtEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TranspositionTable {
    #[must_use]
    pub fn new() -> Self {
        TranspositionTable::default()
    }

    /// Look up the entry for `key`, counting the outcome.
    pub fn probe(&self, key: u64) -> Option<TtEntry> {
        let found = self.map.read().get(&key).cloned();
        match found {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Record `entry` for `key`. A shallower entry never displaces a deeper
    /// one for the same key; entries below [`MIN_STORE_DEPTH`] are dropped.
    pub fn store(&self, key: u64, entry: TtEntry) {
        if entry.depth < MIN_STORE_DEPTH {
            return;
        }
        let mut map = self.map.write();
        match map.get(&key) {
            Some(existing) if existing.depth > entry.depth => {}
            _ => {
                map.insert(key, entry);
            }
        }
    }

    pub fn clear(&self) {
        self.map.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

static PATH_KEYS: Lazy<[u64; 256]> = Lazy::new(|| {
    let mut keys = [0u64; 256];
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    for key in &mut keys {
        // splitmix64 step
        state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        *key = z ^ (z >> 31);
    }
    keys
});

/// Extend `parent`'s hash with the move identified by `move_id`.
///
/// Gives games without a native position hash a cheap incremental one:
/// fold each id byte through a fixed random table, rotating so that
/// sibling moves and transposed prefixes land on distinct keys.
#[must_use]
pub fn path_hash(parent: u64, move_id: &str) -> u64 {
    let mut hash = parent.rotate_left(13);
    for &byte in move_id.as_bytes() {
        hash = hash.rotate_left(7) ^ PATH_KEYS[byte as usize];
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(depth: u32, lower: i32, upper: i32) -> TtEntry {
        TtEntry {
            depth,
            lower,
            upper,
            best_move_id: "m".to_string(),
        }
    }

    #[test]
    fn probe_after_store_round_trips() {
        let tt = TranspositionTable::new();
        tt.store(42, entry(3, -5, 7));
        assert_eq!(tt.probe(42), Some(entry(3, -5, 7)));
        assert_eq!(tt.hits(), 1);
        assert_eq!(tt.misses(), 0);
    }

    #[test]
    fn probe_miss_is_counted() {
        let tt = TranspositionTable::new();
        assert_eq!(tt.probe(1), None);
        assert_eq!(tt.misses(), 1);
    }

    #[test]
    fn shallow_entry_never_displaces_deeper() {
        let tt = TranspositionTable::new();
        tt.store(7, entry(4, 0, 0));
        tt.store(7, entry(2, 9, 9));
        assert_eq!(tt.probe(7).map(|e| e.depth), Some(4));
    }

    #[test]
    fn below_min_depth_is_not_stored() {
        let tt = TranspositionTable::new();
        tt.store(9, entry(0, 1, 1));
        assert!(tt.is_empty());
    }

    #[test]
    fn exactness_is_bound_equality() {
        assert!(entry(1, 5, 5).is_exact());
        assert!(!entry(1, 4, 5).is_exact());
    }

    #[test]
    fn path_hash_separates_siblings_and_orders() {
        let root = 0;
        let a = path_hash(root, "a");
        let b = path_hash(root, "b");
        assert_ne!(a, b);
        // "a" then "b" must differ from "b" then "a".
        assert_ne!(path_hash(a, "b"), path_hash(b, "a"));
    }

    #[test]
    fn path_hash_is_deterministic() {
        assert_eq!(path_hash(123, "xyz"), path_hash(123, "xyz"));
    }
}
