use std::path::PathBuf;

use crate::game::Position;

/// Reasons a proposed move is rejected. None of these end the game; the
/// caller is expected to ask for another move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("position {position} is off the board")]
    OutOfBounds { position: Position },

    #[error("{position} is a light square, pieces only stand on dark squares")]
    InvalidSquare { position: Position },

    #[error("there is no piece at {position}")]
    EmptySquare { position: Position },

    #[error("the piece at {position} belongs to your opponent")]
    NotYourPiece { position: Position },

    #[error("{position} is already occupied")]
    OccupiedSquare { position: Position },

    #[error("illegal jump from {from} to {to}")]
    IllegalJump { from: Position, to: Position },

    #[error("a capture is available, you must capture")]
    MustCapture,

    #[error("you have to move the piece")]
    NoMovement,

    #[error("men can only move forward ({from} -> {to})")]
    WrongDirection { from: Position, to: Position },

    #[error("you must keep capturing with the piece at {required}")]
    MustContinueChain { required: Position },

    #[error("the game is over")]
    GameOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
