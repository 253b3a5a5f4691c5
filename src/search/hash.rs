//! Additive board hashing for the transposition cache
//!
//! Each cell has a fixed pseudo-random base value. A position hashes to the
//! sum of `sign(stone) * base[cell]` over all occupied cells, in wrapping
//! `i64` arithmetic. Placing or removing a stone adjusts the sum by one term.
//!
//! The hash covers raw cell contents only: side to move, search depth and
//! bounds are not part of it. Different boards can collide, and a collision
//! silently returns the other position's bounds.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::BoardHasher;
//!
//! let hasher = BoardHasher::new();
//! let mut board = Board::new();
//! let empty = hasher.hash(&board);
//! assert_eq!(empty, 0);
//!
//! let pos = Pos::new(9, 9);
//! board.place_stone(pos, Stone::Black);
//! assert_eq!(hasher.update_place(empty, pos, Stone::Black), hasher.hash(&board));
//! ```

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};

/// Per-cell base values for the additive hash.
pub struct BoardHasher {
    base: [i64; TOTAL_CELLS],
}

impl BoardHasher {
    /// Build the base table from a fixed-seed LCG so hashes are reproducible.
    #[must_use]
    pub fn new() -> Self {
        // Knuth's MMIX LCG
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            seed
        };

        let mut base = [0i64; TOTAL_CELLS];
        for value in &mut base {
            *value = next_rand() as i64;
        }
        Self { base }
    }

    /// Full hash of a board.
    #[must_use]
    pub fn hash(&self, board: &Board) -> i64 {
        board
            .stones()
            .fold(0i64, |h, (pos, stone)| self.update_place(h, pos, stone))
    }

    /// Hash after placing `stone` at `pos`.
    #[inline]
    #[must_use]
    pub fn update_place(&self, hash: i64, pos: Pos, stone: Stone) -> i64 {
        hash.wrapping_add(self.term(pos, stone))
    }

    /// Hash after removing `stone` from `pos`.
    #[inline]
    #[must_use]
    pub fn update_remove(&self, hash: i64, pos: Pos, stone: Stone) -> i64 {
        hash.wrapping_sub(self.term(pos, stone))
    }

    #[inline]
    fn term(&self, pos: Pos, stone: Stone) -> i64 {
        let base = self.base[pos.to_index()];
        match stone {
            Stone::Black => base,
            Stone::White => base.wrapping_neg(),
            Stone::Empty => 0,
        }
    }
}

impl Default for BoardHasher {
    fn default() -> Self {
        Self::new()
    }
}
