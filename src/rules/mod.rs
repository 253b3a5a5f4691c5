//! Game rules
//!
//! Standard gomoku on a 19x19 board: five or more in a row wins, no captures
//! and no forbidden moves.

pub mod win;

pub use win::{check_winner, find_five_line_at_pos, has_five_at_pos, has_five_in_row};
