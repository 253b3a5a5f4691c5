//! Board structure with occupied-area tracking

use super::window::Window;
use super::{Pos, Stone, TOTAL_CELLS};

/// Game board: raw cell contents plus the window of occupied cells.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [Stone; TOTAL_CELLS],
    window: Window,
    stones: u32,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Stone::Empty; TOTAL_CELLS],
            window: Window::EMPTY,
            stones: 0,
        }
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index()]
    }

    /// Get stone at signed coordinates, `None` when off the board
    #[inline]
    pub fn get_xy(&self, x: i32, y: i32) -> Option<Stone> {
        Pos::try_new(x, y).map(|p| self.get(p))
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone and grow the window. Occupied cells are left untouched
    /// and `false` is returned.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) -> bool {
        if stone == Stone::Empty || !self.is_empty(pos) {
            return false;
        }
        self.cells[pos.to_index()] = stone;
        self.window.stretch(pos);
        self.stones += 1;
        true
    }

    /// Remove a stone. The window is not shrunk.
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        if !self.is_empty(pos) {
            self.cells[pos.to_index()] = Stone::Empty;
            self.stones -= 1;
        }
    }

    /// Window containing every stone ever placed on this board
    #[inline]
    pub fn window(&self) -> Window {
        self.window
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.stones
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stones as usize == TOTAL_CELLS
    }

    /// Iterate over occupied cells in row-major order
    pub fn stones(&self) -> impl Iterator<Item = (Pos, Stone)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != Stone::Empty)
            .map(|(i, s)| (Pos::from_index(i), *s))
    }

    /// Empty cell closest to the center (Chebyshev distance, row-major on ties).
    pub fn nearest_empty_to_center(&self) -> Option<Pos> {
        let center = Pos::center();
        (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(|p| self.is_empty(*p))
            .min_by_key(|p| p.distance(center))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Text rendering with `y` growing downwards and `x` across.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use super::BOARD_SIZE;

        write!(f, "   ")?;
        for x in 0..BOARD_SIZE {
            write!(f, "{x:>3}")?;
        }
        writeln!(f)?;
        for y in 0..BOARD_SIZE {
            write!(f, "{y:>3}")?;
            for x in 0..BOARD_SIZE {
                let c = match self.get(Pos::new(x as u8, y as u8)) {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    Stone::Empty => '.',
                };
                write!(f, "{c:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
