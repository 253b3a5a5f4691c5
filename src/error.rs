//! Error types for the engine and the turn-loop adapter

use thiserror::Error;

use crate::board::Stone;

/// Main error type for the crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("position ({x}, {y}) is outside the board")]
    OutOfBoard { x: i32, y: i32 },

    #[error("position ({x}, {y}) is already occupied")]
    Occupied { x: u8, y: u8 },

    #[error("game already over")]
    GameEnded,

    #[error("it is not {player:?}'s turn")]
    NotYourTurn { player: Stone },

    #[error("no empty cell left on the board")]
    BoardFull,

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, GameError>;
