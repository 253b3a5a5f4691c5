//! Negamax alpha-beta search over the persistent node tree
//!
//! Two move generators share one recursion shape:
//!
//! - **Vector**: candidates come ranked from the [`VectorEvaluator`], which is
//!   updated incrementally with `play`/`undo` along the search path.
//! - **Brute force**: every empty cell of the node's window widened by a
//!   margin, in row-major order, scored with the full-window heuristic and
//!   memoized in the [`TranspositionCache`].
//!
//! Bounds are stored on the tree nodes from the view of the player to move
//! there. A child is searched with the parent's window negated and swapped.
//! When a child proves the parent's alpha reaches beta, the parent's alpha is
//! set to `+inf` and the remaining candidates are skipped. That `+inf` marks
//! "at least beta", not an exact score.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Pos, Stone};
//! use gomoku::eval::VectorEvaluator;
//! use gomoku::policy::Deterministic;
//! use gomoku::search::{NodeTree, Searcher};
//!
//! let mut eval = VectorEvaluator::new();
//! let mut tree = NodeTree::new();
//! for x in 3..7 {
//!     eval.play(Pos::new(x, 9), Stone::Black);
//!     tree.advance_root(Pos::new(x, 9));
//! }
//!
//! let mut searcher = Searcher::new();
//! let stats = searcher.search_vector(&mut eval, &mut tree, &mut Deterministic, Stone::Black, 2);
//! assert!(stats.cutoffs > 0);
//!
//! let best = tree.follow(tree.root(), &mut Deterministic).unwrap();
//! assert_eq!(tree[best].mv, Some(Pos::new(2, 9)));
//! ```

use std::time::{Duration, Instant};

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate_window, VectorEvaluator};
use crate::policy::Policy;

use super::hash::BoardHasher;
use super::node::{Bounds, NodeId, NodeTree};
use super::tt::TranspositionCache;

/// Counters collected during one search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Nodes visited, root included
    pub nodes: u64,
    /// Beta cutoffs
    pub cutoffs: u64,
    /// Transposition cache lookups (brute force only)
    pub tt_probes: u64,
    /// Lookups answered from the cache
    pub tt_hits: u64,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Nodes per second, 0 for an instantaneous search
    pub fn nps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.nodes as f64 / secs
        }
    }
}

/// Cache and hashing state borrowed by a brute-force search.
pub struct BruteForce<'a> {
    pub tt: &'a mut TranspositionCache,
    pub hasher: &'a BoardHasher,
    /// Margin around a node's window for move generation
    pub buffer: usize,
}

/// Alpha-beta searcher writing its results into a [`NodeTree`].
#[derive(Debug, Default)]
pub struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the last search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Search `depth` plies from the tree root with `player` to move, using
    /// the evaluator's candidate list.
    ///
    /// The evaluator must hold the root position. It is returned to that
    /// position when the search ends.
    pub fn search_vector(
        &mut self,
        eval: &mut VectorEvaluator,
        tree: &mut NodeTree,
        policy: &mut dyn Policy,
        player: Stone,
        depth: u32,
    ) -> SearchStats {
        self.stats = SearchStats::default();
        let start = Instant::now();
        let root = tree.root();
        self.negamax_vector(eval, tree, policy, root, player, depth);
        self.stats.elapsed = start.elapsed();
        self.stats.clone()
    }

    /// Search `depth` plies from the tree root with `player` to move, trying
    /// every empty cell near each node's window.
    ///
    /// Cached bounds are reused on a hash match. The search runs on a scratch
    /// copy of `board`.
    pub fn search_brute(
        &mut self,
        board: &Board,
        ctx: &mut BruteForce<'_>,
        tree: &mut NodeTree,
        player: Stone,
        depth: u32,
    ) -> SearchStats {
        self.stats = SearchStats::default();
        let start = Instant::now();
        let root = tree.root();
        let hash = ctx.hasher.hash(board);
        let mut scratch = board.clone();
        self.negamax_brute(&mut scratch, ctx, tree, root, player, depth, hash);
        self.stats.elapsed = start.elapsed();
        self.stats.clone()
    }

    fn negamax_vector(
        &mut self,
        eval: &mut VectorEvaluator,
        tree: &mut NodeTree,
        policy: &mut dyn Policy,
        node: NodeId,
        player: Stone,
        depth: u32,
    ) {
        self.stats.nodes += 1;

        let value = eval.evaluate(policy);
        if depth == 0 || value.is_infinite() {
            tree[node].bounds = Bounds::exact(player.sign() * value);
            return;
        }

        let moves: Vec<Pos> = eval.list_moves(policy).iter().map(|c| c.pos).collect();
        for mv in moves {
            if !eval.play(mv, player) {
                continue;
            }
            let child = tree.child_or_insert(node, mv);
            tree[child].bounds = tree[node].bounds.negated();

            self.negamax_vector(eval, tree, policy, child, player.opponent(), depth - 1);
            eval.undo();

            if self.raise_alpha(tree, node, child) {
                break;
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn negamax_brute(
        &mut self,
        board: &mut Board,
        ctx: &mut BruteForce<'_>,
        tree: &mut NodeTree,
        node: NodeId,
        player: Stone,
        depth: u32,
        hash: i64,
    ) {
        self.stats.nodes += 1;

        self.stats.tt_probes += 1;
        if let Some(bounds) = ctx.tt.probe(hash) {
            self.stats.tt_hits += 1;
            tree[node].bounds = bounds;
            return;
        }

        let window = tree[node].window;
        let value = player.sign() * evaluate_window(board, window);
        if depth == 0 || value.is_infinite() {
            tree[node].bounds = Bounds::exact(value);
        } else {
            let moves: Vec<Pos> = window
                .cells(ctx.buffer)
                .filter(|p| board.is_empty(*p))
                .collect();
            for mv in moves {
                let child = tree.child_or_insert(node, mv);
                tree[child].bounds = tree[node].bounds.negated();

                board.place_stone(mv, player);
                let child_hash = ctx.hasher.update_place(hash, mv, player);
                self.negamax_brute(board, ctx, tree, child, player.opponent(), depth - 1, child_hash);
                board.remove_stone(mv);

                if self.raise_alpha(tree, node, child) {
                    break;
                }
            }
        }

        ctx.tt.store(hash, tree[node].bounds);
    }

    /// Fold a searched child into its parent's alpha.
    ///
    /// Returns `true` on a cutoff, after flagging the parent with `+inf`.
    #[inline]
    fn raise_alpha(&mut self, tree: &mut NodeTree, node: NodeId, child: NodeId) -> bool {
        let child_alpha = tree[child].bounds.alpha;
        let bounds = &mut tree[node].bounds;
        bounds.alpha = bounds.alpha.max(-child_alpha);
        if bounds.alpha >= bounds.beta {
            bounds.alpha = f64::INFINITY;
            self.stats.cutoffs += 1;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Deterministic;

    /// Black diagonal (6,6)..(9,9) with one white stone at (9,10).
    const OPEN_FOUR: [(u8, u8, Stone); 5] = [
        (9, 9, Stone::Black),
        (9, 10, Stone::White),
        (8, 8, Stone::Black),
        (7, 7, Stone::Black),
        (6, 6, Stone::Black),
    ];

    fn vector_setup(moves: &[(u8, u8, Stone)]) -> (VectorEvaluator, NodeTree) {
        let mut eval = VectorEvaluator::new();
        let mut tree = NodeTree::new();
        for &(x, y, stone) in moves {
            assert!(eval.play(Pos::new(x, y), stone));
            tree.advance_root(Pos::new(x, y));
        }
        (eval, tree)
    }

    fn brute_setup(moves: &[(u8, u8, Stone)]) -> (Board, NodeTree) {
        let mut board = Board::new();
        let mut tree = NodeTree::new();
        for &(x, y, stone) in moves {
            assert!(board.place_stone(Pos::new(x, y), stone));
            tree.advance_root(Pos::new(x, y));
        }
        (board, tree)
    }

    fn chosen(tree: &NodeTree) -> Option<Pos> {
        let id = tree.follow(tree.root(), &mut Deterministic)?;
        tree[id].mv
    }

    #[test]
    fn test_vector_search_completes_five() {
        let (mut eval, mut tree) = vector_setup(&OPEN_FOUR);
        let mut searcher = Searcher::new();
        let stats = searcher.search_vector(&mut eval, &mut tree, &mut Deterministic, Stone::Black, 4);

        assert_eq!(chosen(&tree), Some(Pos::new(5, 5)));
        // The first candidate wins outright, so the root cuts off after it
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.cutoffs, 1);
        assert_eq!(tree[tree.root()].bounds.alpha, f64::INFINITY);
        assert_eq!(&stats, searcher.stats());
    }

    #[test]
    fn test_vector_search_restores_evaluator() {
        let moves = [
            (9, 9, Stone::Black),
            (10, 10, Stone::White),
            (8, 9, Stone::Black),
            (8, 10, Stone::White),
        ];
        let (mut eval, mut tree) = vector_setup(&moves);
        let before = eval.evaluation();
        let mut searcher = Searcher::new();
        let stats = searcher.search_vector(&mut eval, &mut tree, &mut Deterministic, Stone::Black, 3);

        assert!(stats.nodes > 1);
        assert_eq!(eval.moves_played(), 4);
        assert_eq!(eval.last_move(), Some(Pos::new(8, 10)));
        assert!((eval.evaluation() - before).abs() < 1e-12);
        assert!(chosen(&tree).is_some());
    }

    #[test]
    fn test_depth_one_takes_best_child() {
        let moves = [(9, 9, Stone::Black), (9, 10, Stone::White)];
        let (mut eval, mut tree) = vector_setup(&moves);
        let mut searcher = Searcher::new();
        searcher.search_vector(&mut eval, &mut tree, &mut Deterministic, Stone::Black, 1);

        let root = tree.root();
        let children = tree[root].children().to_vec();
        assert!(!children.is_empty());
        let lowest = children
            .iter()
            .map(|(_, c)| tree[*c].bounds.alpha)
            .fold(f64::INFINITY, f64::min);
        // Finite leaves: no cutoff at the root, alpha is the negated best child
        assert_eq!(tree[root].bounds.alpha, -lowest);

        let best = tree.follow(root, &mut Deterministic).unwrap();
        assert_eq!(tree[best].bounds.alpha, lowest);
    }

    #[test]
    fn test_vector_search_on_decided_position() {
        let moves = [
            (0, 0, Stone::White),
            (1, 0, Stone::White),
            (2, 0, Stone::White),
            (3, 0, Stone::White),
            (4, 0, Stone::White),
        ];
        let (mut eval, mut tree) = vector_setup(&moves);
        let mut searcher = Searcher::new();
        let stats = searcher.search_vector(&mut eval, &mut tree, &mut Deterministic, Stone::Black, 4);

        // A finished five is a leaf: nothing below the root is explored
        assert_eq!(stats.nodes, 1);
        assert_eq!(tree[tree.root()].bounds, Bounds::exact(f64::NEG_INFINITY));
        assert_eq!(chosen(&tree), None);
    }

    #[test]
    fn test_brute_search_completes_five() {
        let (board, mut tree) = brute_setup(&OPEN_FOUR);
        let hasher = BoardHasher::new();
        let mut tt = TranspositionCache::new();
        let mut ctx = BruteForce {
            tt: &mut tt,
            hasher: &hasher,
            buffer: 1,
        };
        let mut searcher = Searcher::new();
        let stats = searcher.search_brute(&board, &mut ctx, &mut tree, Stone::Black, 4);

        // (5, 5) is the first empty cell of the widened window
        assert_eq!(chosen(&tree), Some(Pos::new(5, 5)));
        assert_eq!(stats.cutoffs, 1);
        assert_eq!(stats.tt_probes, 2);
        assert_eq!(tt.stats().entries, 2);
    }

    #[test]
    fn test_brute_search_leaves_board_alone() {
        let moves = [(9, 9, Stone::Black), (10, 9, Stone::White)];
        let (board, mut tree) = brute_setup(&moves);
        let window = board.window();
        let hasher = BoardHasher::new();
        let mut tt = TranspositionCache::new();
        let mut searcher = Searcher::new();
        let stats = searcher.search_brute(
            &board,
            &mut BruteForce {
                tt: &mut tt,
                hasher: &hasher,
                buffer: 1,
            },
            &mut tree,
            Stone::Black,
            2,
        );

        assert!(stats.nodes > 1);
        assert_eq!(board.stone_count(), 2);
        assert_eq!(board.window(), window);
        assert!(chosen(&tree).is_some());
    }

    #[test]
    fn test_brute_second_search_hits_cache() {
        let moves = [(9, 9, Stone::Black), (10, 9, Stone::White)];
        let (board, mut tree) = brute_setup(&moves);
        let hasher = BoardHasher::new();
        let mut tt = TranspositionCache::new();
        let mut searcher = Searcher::new();
        let mut ctx = BruteForce {
            tt: &mut tt,
            hasher: &hasher,
            buffer: 1,
        };

        let first = searcher.search_brute(&board, &mut ctx, &mut tree, Stone::Black, 2);
        let root_bounds = tree[tree.root()].bounds;
        assert!(first.nodes > 1);

        // Same root, cache not cleared: answered by the root entry alone
        tree.reset_root_bounds();
        let second = searcher.search_brute(&board, &mut ctx, &mut tree, Stone::Black, 2);
        assert_eq!(second.nodes, 1);
        assert_eq!(second.tt_hits, 1);
        assert_eq!(tree[tree.root()].bounds, root_bounds);
    }

    #[test]
    fn test_brute_search_empty_board() {
        let board = Board::new();
        let mut tree = NodeTree::new();
        let hasher = BoardHasher::new();
        let mut tt = TranspositionCache::new();
        let mut searcher = Searcher::new();
        searcher.search_brute(
            &board,
            &mut BruteForce {
                tt: &mut tt,
                hasher: &hasher,
                buffer: 1,
            },
            &mut tree,
            Stone::Black,
            4,
        );
        // An empty window yields no candidates
        assert_eq!(chosen(&tree), None);
    }
}
