//! Sources of randomness used by the engine
//!
//! Three independent sources exist:
//! - multiplicative noise on returned evaluations
//! - exploratory opening moves in the candidate list
//! - uniform tie-breaking among equally good children
//!
//! All of them go through [`Policy`] so tests can switch them off, either all
//! at once with [`Deterministic`] or one by one with the [`RandomPolicy`] toggles.
//!
//! # Example
//!
//! ```
//! use gomoku::policy::{Deterministic, Policy, RandomPolicy};
//!
//! let mut quiet = Deterministic;
//! assert_eq!(quiet.noise_factor(0.05), 1.0);
//! assert_eq!(quiet.pick(4), 0);
//!
//! let mut seeded = RandomPolicy::new(7).without_noise();
//! assert_eq!(seeded.noise_factor(0.05), 1.0);
//! assert!(seeded.pick(4) < 4);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::config::Randomness;

/// Pluggable randomness for evaluation noise, exploration and tie-breaking.
pub trait Policy: Send {
    /// Factor applied to a returned evaluation; `1.0` means no noise.
    fn noise_factor(&mut self, window: f64) -> f64;

    /// Whether to insert an exploratory move after `moves_played` moves.
    fn explore(&mut self, moves_played: usize) -> bool;

    /// Draw from a bell-shaped distribution centered on zero with unit spread.
    fn gaussian(&mut self) -> f64;

    /// Pick an index in `0..n` (n > 0) among equally ranked options.
    fn pick(&mut self, n: usize) -> usize;
}

/// Policy without any randomness.
///
/// Never explores, never perturbs and always takes the first tied option.
/// Forced exploratory samples land on the center.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deterministic;

impl Policy for Deterministic {
    fn noise_factor(&mut self, _window: f64) -> f64 {
        1.0
    }

    fn explore(&mut self, _moves_played: usize) -> bool {
        false
    }

    fn gaussian(&mut self) -> f64 {
        0.0
    }

    fn pick(&mut self, _n: usize) -> usize {
        0
    }
}

/// Seeded random policy where each source can be disabled on its own.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
    seed: u64,
    switches: Randomness,
}

impl RandomPolicy {
    /// Create a policy with every source enabled.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_switches(seed, Randomness::default())
    }

    #[must_use]
    pub fn with_switches(seed: u64, switches: Randomness) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            switches,
        }
    }

    /// Seed drawn from the operating system.
    #[must_use]
    pub fn from_entropy(switches: Randomness) -> Self {
        Self::with_switches(rand::rng().random(), switches)
    }

    #[must_use]
    pub fn without_noise(mut self) -> Self {
        self.switches.noise = false;
        self
    }

    #[must_use]
    pub fn without_exploration(mut self) -> Self {
        self.switches.explore = false;
        self
    }

    #[must_use]
    pub fn without_tie_break(mut self) -> Self {
        self.switches.tie_break = false;
        self
    }

    /// Seed this policy was created with, for replaying a game.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Policy for RandomPolicy {
    fn noise_factor(&mut self, window: f64) -> f64 {
        if !self.switches.noise {
            return 1.0;
        }
        1.0 + self.rng.random_range(-1.0..=1.0) * window
    }

    fn explore(&mut self, moves_played: usize) -> bool {
        if !self.switches.explore {
            return false;
        }
        let draw: f64 = self.rng.sample(StandardNormal);
        draw >= moves_played as f64
    }

    fn gaussian(&mut self) -> f64 {
        if !self.switches.explore {
            return 0.0;
        }
        self.rng.sample(StandardNormal)
    }

    fn pick(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        if !self.switches.tie_break || n <= 1 {
            return 0;
        }
        self.rng.random_range(0..n)
    }
}
