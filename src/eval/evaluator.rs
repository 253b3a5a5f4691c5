//! Incremental evaluator built on vectors (maximal runs of stones)
//!
//! The evaluator keeps every maximal straight run of same-colored stones along
//! the four axes, plus a `(cell, axis) -> run` index. Playing a stone touches
//! at most two neighboring runs per axis, so `play` and `undo` cost time
//! proportional to the length of the runs involved, not the board size.
//!
//! Evaluation and candidate moves are derived lazily from the run list and
//! cached until the next `play`/`undo`.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Pos, Stone};
//! use gomoku::eval::VectorEvaluator;
//! use gomoku::policy::Deterministic;
//!
//! let mut eval = VectorEvaluator::new();
//! for x in 0..5 {
//!     eval.play(Pos::new(x, 0), Stone::Black);
//! }
//! assert_eq!(eval.evaluation(), f64::INFINITY);
//!
//! eval.undo();
//! assert!(eval.evaluation().is_finite());
//! let moves = eval.list_moves(&mut Deterministic);
//! assert_eq!(moves[0].pos, Pos::new(4, 0));
//! ```

use crate::board::{Axis, Pos, Stone, CENTER, TOTAL_CELLS};
use crate::policy::Policy;

use super::patterns::{
    run_score, CANDIDATE_WINDOW, EXPLORE_SPREAD, MAX_EXPLORE_SAMPLES, MIN_CANDIDATES,
    NOISE_WINDOW, WIN_LENGTH,
};
use super::vector::Run;

/// A candidate move and its accumulated extension score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub pos: Pos,
    pub score: f64,
}

type RunId = u32;

/// Vector-based incremental position evaluator.
///
/// Positive evaluations favor Black, negative favor White; a finished
/// five-in-a-row evaluates to infinity signed by its owner.
#[derive(Debug, Clone)]
pub struct VectorEvaluator {
    /// Run storage; slots listed in `free` are dead
    runs: Vec<Run>,
    live: Vec<bool>,
    free: Vec<RunId>,
    /// Owning run for every (cell, axis)
    index: Vec<[Option<RunId>; 4]>,
    /// Stones played, most recent last
    history: Vec<Pos>,

    stale: bool,
    evaluation: f64,
    ranked: Vec<Candidate>,
    candidates: Option<Vec<Candidate>>,
    scores: Vec<f64>,
}

impl VectorEvaluator {
    pub fn new() -> Self {
        Self {
            runs: Vec::with_capacity(256),
            live: Vec::with_capacity(256),
            free: Vec::new(),
            index: vec![[None; 4]; TOTAL_CELLS],
            history: Vec::with_capacity(TOTAL_CELLS),
            stale: false,
            evaluation: 0.0,
            ranked: Vec::new(),
            candidates: None,
            scores: vec![0.0; TOTAL_CELLS],
        }
    }

    /// Check if no stone occupies `pos`
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.index[pos.to_index()].iter().all(Option::is_none)
    }

    /// Stone at `pos`, read from the run owning the cell
    #[inline]
    pub fn stone_at(&self, pos: Pos) -> Stone {
        self.index[pos.to_index()][0].map_or(Stone::Empty, |id| self.runs[id as usize].player)
    }

    #[inline]
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Most recent stone, the one `undo` would take back
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    /// Live runs in storage order
    pub fn runs(&self) -> impl Iterator<Item = &Run> + '_ {
        self.runs
            .iter()
            .zip(&self.live)
            .filter(|(_, live)| **live)
            .map(|(run, _)| run)
    }

    /// Run owning `pos` along `axis`
    pub fn run_at(&self, pos: Pos, axis: Axis) -> Option<&Run> {
        self.index[pos.to_index()][axis.index()].map(|id| &self.runs[id as usize])
    }

    /// Runs of at least `min_len` stones, longest first
    pub fn vectors_at_least(&self, min_len: usize) -> Vec<Run> {
        let mut runs: Vec<Run> = self.runs().filter(|r| r.len() >= min_len).copied().collect();
        runs.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        runs
    }

    /// Place a stone for `player`.
    ///
    /// Returns `false` and changes nothing when the cell is occupied.
    pub fn play(&mut self, pos: Pos, player: Stone) -> bool {
        if player == Stone::Empty || !self.is_empty(pos) {
            return false;
        }
        self.history.push(pos);
        self.invalidate();

        for axis in Axis::ALL {
            let behind = self.same_player_run(pos.step(axis, -1), axis, player);
            let ahead = self.same_player_run(pos.step(axis, 1), axis, player);

            let id = match (behind, ahead) {
                (None, None) => self.alloc(Run::single(pos, axis, player)),
                (Some(id), None) => {
                    self.runs[id as usize].end = pos;
                    id
                }
                (None, Some(id)) => {
                    self.runs[id as usize].start = pos;
                    id
                }
                (Some(b), Some(a)) => {
                    let merged = Run::join(&self.runs[b as usize], &self.runs[a as usize]);
                    self.release(b);
                    self.release(a);
                    let id = self.alloc(merged);
                    self.claim(&merged, id);
                    id
                }
            };
            self.index[pos.to_index()][axis.index()] = Some(id);
        }
        true
    }

    /// Take back the most recent stone.
    ///
    /// Exact inverse of the matching `play`. Returns the freed cell, or `None`
    /// (and changes nothing) when there is no move to undo.
    pub fn undo(&mut self) -> Option<Pos> {
        let pos = self.history.pop()?;
        self.invalidate();

        for axis in Axis::ALL {
            let Some(id) = self.index[pos.to_index()][axis.index()].take() else {
                debug_assert!(false, "occupied cell {pos} missing run on {axis:?}");
                continue;
            };
            let run = self.runs[id as usize];
            let behind = pos
                .step(axis, -1)
                .filter(|p| self.same_player_run(Some(*p), axis, run.player).is_some());
            let ahead = pos
                .step(axis, 1)
                .filter(|p| self.same_player_run(Some(*p), axis, run.player).is_some());

            match (behind, ahead) {
                (None, None) => self.release(id),
                (Some(prev), None) => self.runs[id as usize].end = prev,
                (None, Some(next)) => self.runs[id as usize].start = next,
                (Some(prev), Some(next)) => {
                    self.release(id);
                    let left = Run { end: prev, ..run };
                    let right = Run { start: next, ..run };
                    let left_id = self.alloc(left);
                    self.claim(&left, left_id);
                    let right_id = self.alloc(right);
                    self.claim(&right, right_id);
                }
            }
        }
        Some(pos)
    }

    /// Noise-free evaluation of the current position (cached).
    pub fn evaluation(&mut self) -> f64 {
        self.refresh();
        self.evaluation
    }

    /// Evaluation with the policy's multiplicative noise applied.
    ///
    /// The noise only touches the returned value, never the cached total.
    pub fn evaluate(&mut self, policy: &mut dyn Policy) -> f64 {
        self.evaluation() * policy.noise_factor(NOISE_WINDOW)
    }

    /// Ranked candidate moves, best first (cached until the position changes).
    ///
    /// Never empty while the board has an empty cell: an exploratory move is
    /// added when no run offers an extension.
    pub fn list_moves(&mut self, policy: &mut dyn Policy) -> &[Candidate] {
        self.refresh();
        if self.candidates.is_none() {
            let mut list = self.ranked.clone();
            if list.is_empty() || policy.explore(self.history.len()) {
                if let Some(pos) = self.sample_exploratory(policy) {
                    if !list.iter().any(|c| c.pos == pos) {
                        list.insert(0, Candidate { pos, score: 0.0 });
                    }
                }
            }
            self.candidates = Some(list);
        }
        self.candidates.as_deref().unwrap_or(&[])
    }

    // =========================================================================
    // Internals
    // =========================================================================

    #[inline]
    fn invalidate(&mut self) {
        self.stale = true;
        self.candidates = None;
    }

    #[inline]
    fn same_player_run(&self, pos: Option<Pos>, axis: Axis, player: Stone) -> Option<RunId> {
        let id = self.index[pos?.to_index()][axis.index()]?;
        (self.runs[id as usize].player == player).then_some(id)
    }

    fn alloc(&mut self, run: Run) -> RunId {
        if let Some(id) = self.free.pop() {
            self.runs[id as usize] = run;
            self.live[id as usize] = true;
            id
        } else {
            self.runs.push(run);
            self.live.push(true);
            (self.runs.len() - 1) as RunId
        }
    }

    fn release(&mut self, id: RunId) {
        self.live[id as usize] = false;
        self.free.push(id);
    }

    /// Point the index at `id` for every cell of `run`
    fn claim(&mut self, run: &Run, id: RunId) {
        for cell in run.cells() {
            self.index[cell.to_index()][run.axis.index()] = Some(id);
        }
    }

    #[inline]
    fn open_cell(&self, pos: Option<Pos>) -> Option<Pos> {
        pos.filter(|p| self.is_empty(*p))
    }

    /// Recompute evaluation and ranked extensions if the runs changed.
    fn refresh(&mut self) {
        if !self.stale {
            return;
        }
        self.scores.fill(0.0);
        let mut total = 0.0;

        for (slot, run) in self.runs.iter().enumerate() {
            if !self.live[slot] {
                continue;
            }
            let len = run.len();
            let sign = run.player.sign();
            if len >= WIN_LENGTH {
                total += sign * f64::INFINITY;
                continue;
            }
            match (self.open_cell(run.before()), self.open_cell(run.after())) {
                (Some(a), Some(b)) => {
                    let extension = run_score(len + 1, true);
                    self.scores[a.to_index()] += extension;
                    self.scores[b.to_index()] += extension;
                    total += sign * run_score(len, true);
                }
                (Some(p), None) | (None, Some(p)) => {
                    self.scores[p.to_index()] += run_score(len + 1, false);
                    total += sign * run_score(len, false);
                }
                (None, None) => {}
            }
        }

        let mut cells: Vec<Candidate> = self
            .scores
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != 0.0)
            .map(|(i, s)| Candidate {
                pos: Pos::from_index(i),
                score: *s,
            })
            .collect();
        // Stable: equal scores keep row-major order
        cells.sort_by(|a, b| b.score.total_cmp(&a.score));

        self.ranked.clear();
        let mut kept_total = 0.0;
        for c in cells {
            let kept = self.ranked.len();
            if kept >= MIN_CANDIDATES
                && c.score < kept_total / kept as f64 * (1.0 - CANDIDATE_WINDOW)
            {
                break;
            }
            kept_total += c.score;
            self.ranked.push(c);
        }

        self.evaluation = total;
        self.stale = false;
    }

    /// Empty cell drawn from a bell curve around the center.
    #[allow(clippy::cast_possible_truncation)]
    fn sample_exploratory(&self, policy: &mut dyn Policy) -> Option<Pos> {
        let center = i32::from(CENTER);
        for _ in 0..MAX_EXPLORE_SAMPLES {
            let x = center + (policy.gaussian() * EXPLORE_SPREAD) as i32;
            let y = center + (policy.gaussian() * EXPLORE_SPREAD) as i32;
            if let Some(pos) = Pos::try_new(x, y) {
                if self.is_empty(pos) {
                    return Some(pos);
                }
            }
        }
        let center = Pos::center();
        (0..TOTAL_CELLS)
            .map(Pos::from_index)
            .filter(|p| self.is_empty(*p))
            .min_by_key(|p| p.distance(center))
    }
}

impl Default for VectorEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
