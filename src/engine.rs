//! Engine tying board, evaluator, search tree and caches together
//!
//! The engine plays one side. The turn loop reports every real move through
//! [`Engine::notify_move`] (its own included, if they were not produced by
//! [`Engine::compute_move`]) and asks for a reply with `compute_move`.
//!
//! Per real move the engine:
//!
//! 1. places the stone on its board and in the vector evaluator,
//! 2. promotes the matching child of the search tree to root (or starts a
//!    fresh root),
//! 3. clears the transposition cache.
//!
//! # Example
//!
//! ```
//! use gomoku::config::{EngineConfig, Randomness};
//! use gomoku::{Engine, Pos, Stone};
//!
//! let config = EngineConfig::default()
//!     .with_side(Stone::Black)
//!     .with_depth(2)
//!     .with_randomness(Randomness::NONE);
//! let mut engine = Engine::new(config).unwrap();
//!
//! for (x, y, player) in [(9, 9, Stone::Black), (9, 10, Stone::White), (8, 8, Stone::Black),
//!                        (7, 7, Stone::Black), (6, 6, Stone::Black)] {
//!     engine.notify_move(Pos::new(x, y), player).unwrap();
//! }
//! assert_eq!(engine.compute_move().unwrap(), Pos::new(5, 5));
//! ```

use std::time::Instant;

use log::{debug, info, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::{EngineConfig, Variant, RECOMMENDED_MIN_DEPTH};
use crate::error::{GameError, Result};
use crate::eval::VectorEvaluator;
use crate::policy::{Policy, RandomPolicy};
use crate::search::{BoardHasher, BruteForce, NodeTree, SearchStats, Searcher, TranspositionCache};

/// Where a computed move came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Best child of the searched root
    Search,
    /// Search produced no child; the empty cell closest to the center
    Fallback,
}

/// Result of a move computation with diagnostics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub best_move: Pos,
    /// Negamax value of the move for the engine's side (`+inf` may mean a cutoff)
    pub score: f64,
    pub source: MoveSource,
    /// Expected continuation after `best_move`
    pub principal_line: Vec<Pos>,
    pub stats: SearchStats,
}

/// Search engine for one side of a game.
pub struct Engine {
    config: EngineConfig,
    board: Board,
    eval: VectorEvaluator,
    tree: NodeTree,
    tt: TranspositionCache,
    hasher: BoardHasher,
    searcher: Searcher,
    policy: Box<dyn Policy>,
    ended: bool,
}

impl Engine {
    /// Create an engine from a configuration.
    ///
    /// Randomness is drawn from a [`RandomPolicy`] seeded with `config.seed`,
    /// or from OS entropy when no seed is given. The seed in use is logged.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let policy = match config.seed {
            Some(seed) => RandomPolicy::with_switches(seed, config.randomness),
            None => RandomPolicy::from_entropy(config.randomness),
        };
        info!("engine seed: {}", policy.seed());
        Self::with_policy(config, Box::new(policy))
    }

    /// Create an engine with a caller-supplied randomness policy.
    pub fn with_policy(config: EngineConfig, policy: Box<dyn Policy>) -> Result<Self> {
        config.validate()?;
        if config.depth < RECOMMENDED_MIN_DEPTH {
            warn!(
                "search depth {} is below {RECOMMENDED_MIN_DEPTH}; play will be weak",
                config.depth
            );
        }
        info!(
            "engine ready: side={:?} depth={} variant={:?}",
            config.side, config.depth, config.variant
        );
        Ok(Self {
            config,
            board: Board::new(),
            eval: VectorEvaluator::new(),
            tree: NodeTree::new(),
            tt: TranspositionCache::new(),
            hasher: BoardHasher::new(),
            searcher: Searcher::new(),
            policy,
            ended: false,
        })
    }

    /// Report a move played by either side.
    pub fn notify_move(&mut self, pos: Pos, player: Stone) -> Result<()> {
        if self.ended {
            return Err(GameError::GameEnded);
        }
        if player == Stone::Empty {
            return Err(GameError::NotYourTurn { player });
        }
        if !self.board.is_empty(pos) {
            return Err(GameError::Occupied { x: pos.x, y: pos.y });
        }
        self.apply(pos, player);
        info!("{player:?} played {pos}");
        Ok(())
    }

    /// [`notify_move`](Self::notify_move) for raw coordinates.
    pub fn notify_move_xy(&mut self, x: i32, y: i32, player: Stone) -> Result<()> {
        let pos = Pos::try_new(x, y).ok_or(GameError::OutOfBoard { x, y })?;
        self.notify_move(pos, player)
    }

    /// Search, play and return the engine's move.
    pub fn compute_move(&mut self) -> Result<Pos> {
        self.compute_move_with_stats().map(|r| r.best_move)
    }

    /// Search, play and return the engine's move with diagnostics.
    ///
    /// Returns [`GameError::BoardFull`] when no empty cell is left.
    pub fn compute_move_with_stats(&mut self) -> Result<MoveResult> {
        if self.ended {
            return Err(GameError::GameEnded);
        }
        if self.board.is_full() {
            return Err(GameError::BoardFull);
        }

        let start = Instant::now();
        let side = self.config.side;
        let depth = self.config.depth;
        self.tree.reset_root_bounds();

        let stats = match self.config.variant {
            Variant::Vector => self.searcher.search_vector(
                &mut self.eval,
                &mut self.tree,
                self.policy.as_mut(),
                side,
                depth,
            ),
            Variant::BruteForce => {
                let stats = self.searcher.search_brute(
                    &self.board,
                    &mut BruteForce {
                        tt: &mut self.tt,
                        hasher: &self.hasher,
                        buffer: self.config.buffer,
                    },
                    &mut self.tree,
                    side,
                    depth,
                );
                let tt = self.tt.stats();
                debug!(
                    "transpositions: entries={} probes={} hits={} ({:.1}%)",
                    tt.entries,
                    tt.probes,
                    tt.hits,
                    tt.hit_rate()
                );
                stats
            }
        };
        self.tt.clear();

        let root = self.tree.root();
        let searched = self
            .tree
            .follow(root, self.policy.as_mut())
            .and_then(|id| Some((self.tree[id].mv?, -self.tree[id].bounds.alpha)))
            .filter(|(mv, _)| self.board.is_empty(*mv));

        let (best_move, score, source) = match searched {
            Some((mv, score)) => (mv, score, MoveSource::Search),
            None => {
                let mv = self
                    .board
                    .nearest_empty_to_center()
                    .ok_or(GameError::BoardFull)?;
                warn!("search found no move; falling back to {mv}");
                (mv, 0.0, MoveSource::Fallback)
            }
        };

        self.apply(best_move, side);
        let principal_line = self.tree.principal_line();
        debug!(
            "search: nodes={} cutoffs={} nps={:.0} line={:?}",
            stats.nodes,
            stats.cutoffs,
            stats.nps(),
            principal_line
        );
        info!(
            "{side:?} (engine) plays {best_move} score={score:.4} in {}ms",
            start.elapsed().as_millis()
        );

        Ok(MoveResult {
            best_move,
            score,
            source,
            principal_line,
            stats,
        })
    }

    /// Stop the engine; later calls fail with [`GameError::GameEnded`].
    pub fn end_game(&mut self) {
        if !self.ended {
            info!("engine for {:?} stopped", self.config.side);
        }
        self.ended = true;
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    #[inline]
    pub fn side(&self) -> Stone {
        self.config.side
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine's view of the board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn evaluator(&self) -> &VectorEvaluator {
        &self.eval
    }

    #[inline]
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Play a real move into every structure and re-root the tree.
    fn apply(&mut self, pos: Pos, player: Stone) {
        self.board.place_stone(pos, player);
        self.eval.play(pos, player);
        if self.tree.advance_root(pos) {
            debug!("reusing explored subtree at {pos} ({} nodes)", self.tree.len());
        }
        self.tt.clear();
    }
}
