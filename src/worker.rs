//! Turn loop between the engine and its opponents
//!
//! [`Table`] is the authoritative game: board, side to move, move history and
//! outcome, guarded by a mutex. Every change wakes the threads waiting on its
//! condition variable.
//!
//! [`EngineWorker`] runs an [`Engine`] on its own thread. While it is not the
//! engine's turn the worker sleeps on the table with the poll interval as
//! timeout. Once the turn comes it forwards the moves it has not seen, computes
//! a reply and plays it. The worker exits when the game is decided or the
//! table is closed.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use gomoku::config::{EngineConfig, Randomness};
//! use gomoku::worker::{EngineWorker, Table};
//! use gomoku::{Engine, Pos, Stone};
//!
//! let table = Arc::new(Table::new());
//! let config = EngineConfig::default()
//!     .with_side(Stone::White)
//!     .with_depth(2)
//!     .with_randomness(Randomness::NONE);
//! let worker = EngineWorker::spawn(Arc::clone(&table), Engine::new(config).unwrap(),
//!                                  Duration::from_millis(10));
//!
//! table.play(Pos::new(9, 9), Stone::Black).unwrap();
//! table.wait_for_turn(Stone::Black, Duration::from_millis(10));
//! assert_eq!(table.history().len(), 2);
//!
//! table.end();
//! let engine = worker.join().unwrap();
//! assert!(engine.is_ended());
//! ```

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info, trace};

use crate::board::{Board, Pos, Stone};
use crate::engine::Engine;
use crate::error::{GameError, Result};
use crate::rules::has_five_at_pos;

/// How a game finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Stone),
    Draw,
}

#[derive(Debug)]
struct TableState {
    board: Board,
    turn: Stone,
    history: Vec<(Pos, Stone)>,
    outcome: Option<Outcome>,
    closed: bool,
}

impl TableState {
    #[inline]
    fn is_over(&self) -> bool {
        self.closed || self.outcome.is_some()
    }
}

/// Lock the table state, recovering it if another thread panicked while holding it.
fn lock_or_recover(mutex: &Mutex<TableState>) -> MutexGuard<'_, TableState> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("table mutex was poisoned, attempting recovery");
            poisoned.into_inner()
        }
    }
}

/// Shared game state for the engine workers and the front-end.
#[derive(Debug)]
pub struct Table {
    state: Mutex<TableState>,
    changed: Condvar,
}

impl Table {
    /// Empty board, Black to move
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TableState {
                board: Board::new(),
                turn: Stone::Black,
                history: Vec::new(),
                outcome: None,
                closed: false,
            }),
            changed: Condvar::new(),
        }
    }

    /// Play a move for `player`.
    ///
    /// Returns the outcome if this move decided the game.
    pub fn play(&self, pos: Pos, player: Stone) -> Result<Option<Outcome>> {
        let mut state = lock_or_recover(&self.state);
        if state.is_over() {
            return Err(GameError::GameEnded);
        }
        if player != state.turn {
            return Err(GameError::NotYourTurn { player });
        }
        if !state.board.place_stone(pos, player) {
            return Err(GameError::Occupied { x: pos.x, y: pos.y });
        }
        state.history.push((pos, player));

        if has_five_at_pos(&state.board, pos, player) {
            state.outcome = Some(Outcome::Win(player));
        } else if state.board.is_full() {
            state.outcome = Some(Outcome::Draw);
        }
        state.turn = player.opponent();
        let outcome = state.outcome;
        drop(state);

        if let Some(outcome) = outcome {
            info!("game over after {player:?} {pos}: {outcome:?}");
        }
        self.changed.notify_all();
        Ok(outcome)
    }

    /// [`play`](Self::play) for raw coordinates.
    pub fn play_xy(&self, x: i32, y: i32, player: Stone) -> Result<Option<Outcome>> {
        let pos = Pos::try_new(x, y).ok_or(GameError::OutOfBoard { x, y })?;
        self.play(pos, player)
    }

    /// Close the table for good and wake every waiter.
    pub fn end(&self) {
        lock_or_recover(&self.state).closed = true;
        self.changed.notify_all();
    }

    /// Block until it is `player`'s turn and return the move history, or
    /// `None` once the game is over.
    ///
    /// Wakes up at least every `poll`; spurious and timed-out wake-ups just
    /// re-check the state.
    pub fn wait_for_turn(&self, player: Stone, poll: Duration) -> Option<Vec<(Pos, Stone)>> {
        let mut state = lock_or_recover(&self.state);
        loop {
            if state.is_over() {
                return None;
            }
            if state.turn == player {
                return Some(state.history.clone());
            }
            let (guard, timeout) = self
                .changed
                .wait_timeout(state, poll)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
            if timeout.timed_out() {
                trace!("{player:?} poll: still waiting");
            }
        }
    }

    /// Block until the game is over. Returns the outcome, `None` if the table
    /// was closed before a decision.
    pub fn wait_for_end(&self, poll: Duration) -> Option<Outcome> {
        let mut state = lock_or_recover(&self.state);
        while !state.is_over() {
            let (guard, _) = self
                .changed
                .wait_timeout(state, poll)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
        state.outcome
    }

    pub fn turn(&self) -> Stone {
        lock_or_recover(&self.state).turn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        lock_or_recover(&self.state).outcome
    }

    /// Whether the game is decided or the table closed
    pub fn is_over(&self) -> bool {
        lock_or_recover(&self.state).is_over()
    }

    /// Moves played so far, oldest first
    pub fn history(&self) -> Vec<(Pos, Stone)> {
        lock_or_recover(&self.state).history.clone()
    }

    /// Copy of the current board
    pub fn board(&self) -> Board {
        lock_or_recover(&self.state).board.clone()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine running on its own thread against a [`Table`].
pub struct EngineWorker {
    side: Stone,
    handle: JoinHandle<Engine>,
}

impl EngineWorker {
    /// Start a worker playing `engine`'s side on `table`.
    pub fn spawn(table: Arc<Table>, mut engine: Engine, poll: Duration) -> Self {
        let side = engine.side();
        let handle = thread::spawn(move || {
            if let Err(e) = run(&table, &mut engine, poll) {
                error!("engine for {side:?} failed: {e}");
                table.end();
            }
            engine.end_game();
            engine
        });
        Self { side, handle }
    }

    #[inline]
    pub fn side(&self) -> Stone {
        self.side
    }

    /// Wait for the worker to exit and get its engine back.
    pub fn join(self) -> thread::Result<Engine> {
        self.handle.join()
    }
}

/// Worker loop: wait for the turn, catch up on moves, reply.
fn run(table: &Table, engine: &mut Engine, poll: Duration) -> Result<()> {
    let side = engine.side();
    let mut seen = 0;
    while let Some(history) = table.wait_for_turn(side, poll) {
        for &(pos, player) in history.iter().skip(seen) {
            // Moves this engine computed are already on its board
            if engine.board().get(pos) != player {
                engine.notify_move(pos, player)?;
            }
        }
        seen = history.len();

        let mv = engine.compute_move()?;
        match table.play(mv, side) {
            Ok(_) => debug!("{side:?} worker played {mv}"),
            Err(GameError::GameEnded) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
