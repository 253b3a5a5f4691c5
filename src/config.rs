//! Engine configuration

use crate::board::{Stone, BOARD_SIZE};
use crate::error::{GameError, Result};

/// Smallest depth that sees a full exchange; shallower searches play much worse.
pub const RECOMMENDED_MIN_DEPTH: u32 = 4;

/// Which move generator and evaluator the search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Incremental vector evaluator supplies ranked candidates (default)
    #[default]
    Vector,
    /// Every empty cell near the occupied area, full-window heuristic,
    /// transposition cache enabled
    BruteForce,
}

/// Switches for the three sources of randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Randomness {
    /// Multiplicative noise on returned evaluations
    pub noise: bool,
    /// Uniform choice among equally good children
    pub tie_break: bool,
    /// Exploratory opening moves in the candidate list
    pub explore: bool,
}

impl Randomness {
    /// Everything switched off
    pub const NONE: Randomness = Randomness {
        noise: false,
        tie_break: false,
        explore: false,
    };
}

impl Default for Randomness {
    fn default() -> Self {
        Self {
            noise: true,
            tie_break: true,
            explore: true,
        }
    }
}

/// Engine configuration.
///
/// # Example
///
/// ```
/// use gomoku::config::{EngineConfig, Variant};
/// use gomoku::Stone;
///
/// let config = EngineConfig::default()
///     .with_side(Stone::Black)
///     .with_depth(3)
///     .with_variant(Variant::BruteForce)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Player the engine computes moves for
    pub side: Stone,
    /// Search depth in plies
    pub depth: u32,
    pub variant: Variant,
    /// Margin around the occupied window for brute-force move generation
    pub buffer: usize,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
    pub randomness: Randomness,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            side: Stone::White,
            depth: RECOMMENDED_MIN_DEPTH,
            variant: Variant::Vector,
            buffer: 1,
            seed: None,
            randomness: Randomness::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_side(mut self, side: Stone) -> Self {
        self.side = side;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_randomness(mut self, randomness: Randomness) -> Self {
        self.randomness = randomness;
        self
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.side == Stone::Empty {
            return Err(GameError::InvalidConfig {
                message: "engine side must be Black or White".to_string(),
            });
        }
        if self.depth == 0 {
            return Err(GameError::InvalidConfig {
                message: "search depth must be at least 1".to_string(),
            });
        }
        if self.buffer > BOARD_SIZE {
            return Err(GameError::InvalidConfig {
                message: format!("buffer {} exceeds board size {BOARD_SIZE}", self.buffer),
            });
        }
        Ok(())
    }
}
