//! Core checkers logic: board and pieces, move validation with mandatory
//! capture and capture chains, and the turn-tracking game state.

mod board;
mod moves;
mod player;
pub mod rules;
mod state;

pub use board::{Board, Piece, Position, Rank, BOARD_SIZE};
pub use moves::{ApplyResult, GameResult, Move, MoveResult};
pub use player::Player;
pub use rules::{apply_move, check_game_over, has_further_capture, validate_move};
pub use state::{new_game, GameState, DEFAULT_QUIET_MOVE_LIMIT};
