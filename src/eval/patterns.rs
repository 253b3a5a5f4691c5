//! Scores for runs of stones
//!
//! A run's value grows steeply with its length: `factor / (5 - len)^3`,
//! where `factor` is 1 when both ends are open and 1/4 when only one is.
//! Length 5 is a finished line and scores infinity.

/// Number of stones in a row that wins the game
pub const WIN_LENGTH: usize = 5;

/// Weight of a run open on only one end, relative to an open run
pub const HALF_OPEN_FACTOR: f64 = 0.25;

/// Candidates always kept regardless of score
pub const MIN_CANDIDATES: usize = 3;

/// Extra candidates are kept while within this fraction of the running average
pub const CANDIDATE_WINDOW: f64 = 0.1;

/// Bound of the multiplicative noise on returned evaluations
pub const NOISE_WINDOW: f64 = 0.05;

/// Spread (in cells) of exploratory moves around the center
pub const EXPLORE_SPREAD: f64 = 9.0;

/// Rejected exploratory samples before falling back to a center scan
pub const MAX_EXPLORE_SAMPLES: usize = 64;

/// Value of a run of `length` stones with the given openness.
///
/// Lengths are capped at [`WIN_LENGTH`]; a capped run returns infinity.
///
/// # Example
///
/// ```
/// use gomoku::eval::run_score;
///
/// assert_eq!(run_score(4, true), 1.0);
/// assert_eq!(run_score(4, false), 0.25);
/// assert!(run_score(5, false).is_infinite());
/// assert!(run_score(2, true) < run_score(3, true));
/// ```
#[must_use]
pub fn run_score(length: usize, open_both: bool) -> f64 {
    let length = length.min(WIN_LENGTH);
    if length == WIN_LENGTH {
        return f64::INFINITY;
    }
    let factor = if open_both { 1.0 } else { HALF_OPEN_FACTOR };
    let gap = (WIN_LENGTH - length) as f64;
    factor / (gap * gap * gap)
}
