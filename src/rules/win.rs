//! Win condition checking
//!
//! A game is won by five or more stones of one color in a row along any of
//! the four axes. The search core never asks; the turn loop does after each
//! move.

use crate::board::{Axis, Board, Pos, Stone};

/// Stones needed in a row to win
const WIN_LENGTH: usize = 5;

/// Count `color` stones from `pos` (exclusive) stepping `dir` along `axis`.
#[inline]
fn count_direction(board: &Board, pos: Pos, axis: Axis, dir: i32, color: Stone) -> usize {
    (1..)
        .map_while(|i| pos.step(axis, dir * i))
        .take_while(|p| board.get(*p) == color)
        .count()
}

/// Fast five-in-a-row check through a specific position.
///
/// Only checks the four lines through `pos`. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    if color == Stone::Empty {
        return false;
    }
    Axis::ALL.iter().any(|&axis| {
        1 + count_direction(board, pos, axis, -1, color) + count_direction(board, pos, axis, 1, color)
            >= WIN_LENGTH
    })
}

/// The full winning line through `pos`, ordered along its axis.
///
/// Returns `None` when the stone at `pos` is not part of five in a row.
pub fn find_five_line_at_pos(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let color = board.get(pos);
    if color == Stone::Empty {
        return None;
    }
    for axis in Axis::ALL {
        let back = count_direction(board, pos, axis, -1, color) as i32;
        let ahead = count_direction(board, pos, axis, 1, color) as i32;
        if (back + ahead + 1) as usize >= WIN_LENGTH {
            return Some((-back..=ahead).filter_map(|i| pos.step(axis, i)).collect());
        }
    }
    None
}

/// Check if there's 5+ in a row for the given color anywhere on the board
pub fn has_five_in_row(board: &Board, color: Stone) -> bool {
    board
        .stones()
        .any(|(pos, stone)| stone == color && has_five_at_pos(board, pos, color))
}

/// Check for a winner
///
/// Returns `Some(Stone)` if either color has five in a row, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&color| has_five_in_row(board, color))
}
