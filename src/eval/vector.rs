//! Vectors: maximal straight runs of one player's stones

use crate::board::{Axis, Pos, Stone};

/// A maximal run of same-colored stones along one axis.
///
/// `start` lies behind `end` on the axis: `end == start + (len - 1) * axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Run {
    pub player: Stone,
    pub axis: Axis,
    pub start: Pos,
    pub end: Pos,
}

impl Run {
    /// Run of a single stone
    #[inline]
    pub fn single(pos: Pos, axis: Axis, player: Stone) -> Self {
        Self {
            player,
            axis,
            start: pos,
            end: pos,
        }
    }

    /// Run covering two collinear runs, `behind` being the one further back
    #[inline]
    pub fn join(behind: &Run, ahead: &Run) -> Self {
        debug_assert_eq!(behind.axis, ahead.axis);
        debug_assert_eq!(behind.player, ahead.player);
        Self {
            player: behind.player,
            axis: behind.axis,
            start: behind.start,
            end: ahead.end,
        }
    }

    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.start.distance(self.end) as usize + 1
    }

    /// Cell just behind `start`, if on the board
    #[inline]
    pub fn before(&self) -> Option<Pos> {
        self.start.step(self.axis, -1)
    }

    /// Cell just past `end`, if on the board
    #[inline]
    pub fn after(&self) -> Option<Pos> {
        self.end.step(self.axis, 1)
    }

    /// Every cell of the run from `start` to `end`
    pub fn cells(&self) -> impl Iterator<Item = Pos> {
        let (start, axis) = (self.start, self.axis);
        (0..self.len() as i32).filter_map(move |i| start.step(axis, i))
    }
}

impl std::fmt::Display for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {} to {}", self.player, self.start, self.end)
    }
}
