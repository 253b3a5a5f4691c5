//! Transposition cache for the brute-force search
//!
//! Maps an additive board hash to the bounds a search produced for that
//! position. Entries are only meaningful inside the search that wrote them:
//! the key carries no depth or window, so the cache is cleared after every
//! real move.
//!
//! # Example
//!
//! ```
//! use gomoku::search::{Bounds, TranspositionCache};
//!
//! let mut tt = TranspositionCache::new();
//! tt.store(0x1234, Bounds::new(-0.5, 0.5));
//! assert_eq!(tt.probe(0x1234), Some(Bounds::new(-0.5, 0.5)));
//! assert_eq!(tt.probe(0x4321), None);
//!
//! tt.clear();
//! assert_eq!(tt.probe(0x1234), None);
//! ```

use std::collections::HashMap;

use super::node::Bounds;

/// Hash-to-bounds memo table.
///
/// Lookups are not validated against the board, so a hash collision returns
/// the other position's bounds.
#[derive(Debug, Default)]
pub struct TranspositionCache {
    entries: HashMap<i64, Bounds>,
    probes: u64,
    hits: u64,
}

impl TranspositionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds stored for `hash`, if any.
    pub fn probe(&mut self, hash: i64) -> Option<Bounds> {
        self.probes += 1;
        let found = self.entries.get(&hash).copied();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    /// Store (or overwrite) the bounds for `hash`.
    pub fn store(&mut self, hash: i64, bounds: Bounds) {
        self.entries.insert(hash, bounds);
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.probes = 0;
        self.hits = 0;
    }

    #[must_use]
    pub fn stats(&self) -> TTStats {
        TTStats {
            entries: self.entries.len(),
            probes: self.probes,
            hits: self.hits,
        }
    }
}

/// Statistics about transposition cache usage since the last clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    /// Positions currently stored
    pub entries: usize,
    /// Lookups made
    pub probes: u64,
    /// Lookups that found an entry
    pub hits: u64,
}

impl TTStats {
    /// Hit rate in percent
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Pos, Stone};
    use crate::search::BoardHasher;

    #[test]
    fn test_store_overwrites() {
        let mut tt = TranspositionCache::new();
        tt.store(1, Bounds::exact(0.1));
        tt.store(1, Bounds::exact(0.2));
        assert_eq!(tt.probe(1), Some(Bounds::exact(0.2)));
        assert_eq!(tt.stats().entries, 1);
    }

    #[test]
    fn test_stats() {
        let mut tt = TranspositionCache::new();
        assert_eq!(tt.stats(), TTStats::default());
        assert_eq!(tt.stats().hit_rate(), 0.0);

        tt.store(10, Bounds::FULL);
        let _ = tt.probe(10);
        let _ = tt.probe(11);
        let stats = tt.stats();
        assert_eq!(stats.probes, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.hit_rate(), 50.0);

        tt.clear();
        assert_eq!(tt.stats(), TTStats::default());
    }

    #[test]
    fn test_transpositions_share_entry() {
        let hasher = BoardHasher::new();
        let mut tt = TranspositionCache::new();

        let mut first = Board::new();
        for (pos, stone) in [
            (Pos::new(9, 9), Stone::Black),
            (Pos::new(9, 10), Stone::White),
            (Pos::new(8, 8), Stone::Black),
        ] {
            first.place_stone(pos, stone);
        }
        tt.store(hasher.hash(&first), Bounds::new(-0.25, 0.75));

        let mut second = Board::new();
        for (pos, stone) in [
            (Pos::new(8, 8), Stone::Black),
            (Pos::new(9, 10), Stone::White),
            (Pos::new(9, 9), Stone::Black),
        ] {
            second.place_stone(pos, stone);
        }
        assert_eq!(tt.probe(hasher.hash(&second)), Some(Bounds::new(-0.25, 0.75)));
    }
}
