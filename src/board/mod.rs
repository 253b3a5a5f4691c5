//! Board representation for Gomoku

pub mod board;
pub mod window;

#[cfg(test)]
mod tests;

// Re-exports
pub use board::Board;
pub use window::Window;

/// Board size (19x19)
pub const BOARD_SIZE: usize = 19;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 361

/// Center coordinate on both axes
pub const CENTER: u8 = (BOARD_SIZE / 2) as u8;

/// Stone colors. Black moves first and counts as the positive player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Sign used by evaluations: +1 for Black, -1 for White, 0 for empty.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Stone::Black => 1.0,
            Stone::White => -1.0,
            Stone::Empty => 0.0,
        }
    }
}

/// One of the four line directions a run of stones can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// (1, 0)
    Horizontal,
    /// (0, 1)
    Vertical,
    /// (1, 1)
    Diagonal,
    /// (1, -1)
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// Unit step "forwards" along this axis as (dx, dy).
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    #[inline]
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < BOARD_SIZE as u8 && y < BOARD_SIZE as u8);
        Self { x, y }
    }

    /// Board center (9, 9)
    #[inline]
    pub fn center() -> Self {
        Self::new(CENTER, CENTER)
    }

    /// Build a position from signed coordinates, `None` when off the board.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        if Self::is_valid(x, y) {
            Some(Self { x: x as u8, y: y as u8 })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.x as usize * BOARD_SIZE + self.y as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            x: (idx / BOARD_SIZE) as u8,
            y: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32) -> bool {
        x >= 0 && x < BOARD_SIZE as i32 && y >= 0 && y < BOARD_SIZE as i32
    }

    /// Move `n` steps along `axis` (negative `n` goes backwards).
    #[inline]
    pub fn step(self, axis: Axis, n: i32) -> Option<Pos> {
        let (dx, dy) = axis.delta();
        Self::try_new(i32::from(self.x) + dx * n, i32::from(self.y) + dy * n)
    }

    /// Chebyshev distance, which is the step count between two cells on a shared line.
    #[inline]
    pub fn distance(self, other: Pos) -> u32 {
        let dx = (i32::from(self.x) - i32::from(other.x)).unsigned_abs();
        let dy = (i32::from(self.y) - i32::from(other.y)).unsigned_abs();
        dx.max(dy)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
