//! Five-in-a-row engine with an incremental vector evaluator
//!
//! A gomoku engine for the standard 19x19 board (five or more in a row wins,
//! no captures, no forbidden moves). The engine searches a fixed number of
//! plies with negamax alpha-beta and keeps its search tree between turns.
//!
//! # Architecture
//!
//! - [`board`]: cells, coordinates, axes and the occupied-area window
//! - [`eval`]: the vector evaluator (maximal runs tracked incrementally) and
//!   the brute-force window heuristic
//! - [`search`]: node tree, transposition cache, additive hashing and the
//!   alpha-beta driver
//! - [`policy`]: evaluation noise, exploratory openings and random
//!   tie-breaks, all switchable for reproducible play
//! - [`engine`]: one side's engine (`notify_move`, `compute_move`, `end_game`)
//! - [`worker`]: shared game table and engine threads
//! - [`rules`]: five-in-a-row detection for the turn loop
//!
//! # Quick Start
//!
//! ```
//! use gomoku::config::{EngineConfig, Randomness};
//! use gomoku::{Engine, Pos, Stone};
//!
//! let config = EngineConfig::default()
//!     .with_side(Stone::White)
//!     .with_depth(2)
//!     .with_randomness(Randomness::NONE);
//! let mut engine = Engine::new(config).unwrap();
//!
//! engine.notify_move(Pos::new(9, 9), Stone::Black).unwrap();
//! let reply = engine.compute_move().unwrap();
//! assert_eq!(engine.board().get(reply), Stone::White);
//! println!("engine plays {reply}");
//! ```
//!
//! # Variants
//!
//! [`Variant::Vector`](config::Variant::Vector) takes its candidates from the
//! vector evaluator's ranked extension cells. [`Variant::BruteForce`](config::Variant::BruteForce)
//! tries every empty cell near the stones and memoizes positions in a
//! transposition cache.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod policy;
pub mod rules;
pub mod search;
pub mod worker;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::{EngineConfig, Randomness, Variant};
pub use engine::{Engine, MoveResult, MoveSource};
pub use error::{GameError, Result};
