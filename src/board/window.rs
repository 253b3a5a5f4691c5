//! Bounding rectangle of occupied cells
//!
//! The window only ever grows. Brute-force move generation scans the window
//! expanded by a small margin instead of the whole board.

use super::{Pos, BOARD_SIZE};

/// Rectangle `[min_x, max_x] x [min_y, max_y]` containing every stone played.
///
/// A fresh window is empty (`min > max`) until the first `stretch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    min_x: i8,
    min_y: i8,
    max_x: i8,
    max_y: i8,
}

impl Window {
    /// Empty window containing no cells
    pub const EMPTY: Window = Window {
        min_x: BOARD_SIZE as i8,
        min_y: BOARD_SIZE as i8,
        max_x: -1,
        max_y: -1,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Grow the window so that it contains `pos`.
    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    pub fn stretch(&mut self, pos: Pos) {
        let (x, y) = (pos.x as i8, pos.y as i8);
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Copy of this window stretched by `pos`.
    #[inline]
    #[must_use]
    pub fn stretched(mut self, pos: Pos) -> Window {
        self.stretch(pos);
        self
    }

    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    pub fn contains(&self, pos: Pos) -> bool {
        let (x, y) = (pos.x as i8, pos.y as i8);
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Lower-left and upper-right corners, `None` while empty.
    pub fn corners(&self) -> Option<(Pos, Pos)> {
        if self.is_empty() {
            return None;
        }
        let lo = Pos::try_new(i32::from(self.min_x), i32::from(self.min_y))?;
        let hi = Pos::try_new(i32::from(self.max_x), i32::from(self.max_y))?;
        Some((lo, hi))
    }

    /// In-board cells of the window expanded by `margin`, in row-major order (x, then y).
    pub fn cells(&self, margin: usize) -> impl Iterator<Item = Pos> {
        let m = margin as i32;
        let last = BOARD_SIZE as i32 - 1;
        let (x0, x1, y0, y1) = if self.is_empty() {
            (1, 0, 1, 0)
        } else {
            (
                (i32::from(self.min_x) - m).max(0),
                (i32::from(self.max_x) + m).min(last),
                (i32::from(self.min_y) - m).max(0),
                (i32::from(self.max_y) + m).min(last),
            )
        };
        (x0..=x1).flat_map(move |x| (y0..=y1).filter_map(move |y| Pos::try_new(x, y)))
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_has_no_cells() {
        let w = Window::EMPTY;
        assert!(w.is_empty());
        assert_eq!(w.cells(1).count(), 0);
        assert!(w.corners().is_none());
    }

    #[test]
    fn test_stretch_grows_only() {
        let mut w = Window::EMPTY;
        w.stretch(Pos::new(9, 9));
        assert_eq!(w.corners(), Some((Pos::new(9, 9), Pos::new(9, 9))));

        w.stretch(Pos::new(7, 12));
        assert_eq!(w.corners(), Some((Pos::new(7, 9), Pos::new(9, 12))));

        // A point already inside changes nothing
        w.stretch(Pos::new(8, 10));
        assert_eq!(w.corners(), Some((Pos::new(7, 9), Pos::new(9, 12))));
        assert!(w.contains(Pos::new(8, 11)));
        assert!(!w.contains(Pos::new(6, 11)));
    }

    #[test]
    fn test_cells_with_margin_clipped_to_board() {
        let w = Window::EMPTY.stretched(Pos::new(0, 0));
        let cells: Vec<Pos> = w.cells(1).collect();
        assert_eq!(
            cells,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );

        let w = Window::EMPTY.stretched(Pos::new(9, 9));
        assert_eq!(w.cells(1).count(), 9);
        assert_eq!(w.cells(0).count(), 1);
    }
}
