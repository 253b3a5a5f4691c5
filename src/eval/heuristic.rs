//! Full-window heuristic for the brute-force search
//!
//! Unlike [`VectorEvaluator`](super::VectorEvaluator) this scans raw board
//! cells every time. For each stone and axis it counts the same-colored stones
//! running forward from it (itself included, at most five) and adds
//! `sign / (5 - count)`. A count of five yields infinity signed by the owner.

use crate::board::{Axis, Board, Pos, Stone, Window};

use super::patterns::WIN_LENGTH;

/// Evaluate every cell inside `window`. Positive values favor Black.
#[must_use]
pub fn evaluate_window(board: &Board, window: Window) -> f64 {
    window.cells(0).map(|pos| evaluate_point(board, pos)).sum()
}

/// Sum of the four axis contributions of the stone at `pos`.
#[must_use]
pub fn evaluate_point(board: &Board, pos: Pos) -> f64 {
    Axis::ALL
        .iter()
        .map(|&axis| evaluate_direction(board, pos, axis))
        .sum()
}

/// Contribution of the run starting at `pos` and heading forward along `axis`.
#[must_use]
pub fn evaluate_direction(board: &Board, pos: Pos, axis: Axis) -> f64 {
    let stone = board.get(pos);
    if stone == Stone::Empty {
        return 0.0;
    }
    let count = (1..WIN_LENGTH as i32)
        .take_while(|&i| pos.step(axis, i).is_some_and(|p| board.get(p) == stone))
        .count()
        + 1;
    if count >= WIN_LENGTH {
        return stone.sign() * f64::INFINITY;
    }
    stone.sign() / (WIN_LENGTH - count) as f64
}
