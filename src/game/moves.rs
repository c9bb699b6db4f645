use std::fmt;

use super::{Player, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// A jump covers two rows; a step covers one.
    pub fn is_jump(&self) -> bool {
        self.from.row.abs_diff(self.to.row) == 2
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Classification of a move that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub is_capture: bool,
    pub captured_position: Option<Position>,
    /// The same piece has another capture from its landing square and the
    /// turn does not pass.
    pub must_continue: bool,
}

/// What actually happened on the board when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyResult {
    pub is_capture: bool,
    pub captured_position: Option<Position>,
    pub promoted: bool,
    pub must_continue: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    InProgress,
    Winner(Player),
    Draw,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}
