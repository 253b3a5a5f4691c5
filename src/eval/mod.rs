//! Position evaluation
//!
//! - [`VectorEvaluator`]: incremental run tracking, evaluation and candidate moves
//! - [`heuristic`]: full-window scan used by the brute-force search
//! - [`patterns`]: run scores and tuning constants

pub mod evaluator;
pub mod heuristic;
pub mod patterns;
pub mod vector;

pub use evaluator::{Candidate, VectorEvaluator};
pub use heuristic::evaluate_window;
pub use patterns::run_score;
pub use vector::Run;
