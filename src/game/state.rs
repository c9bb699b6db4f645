use tracing::info;

use super::rules::{self, apply_move, check_game_over, validate_move};
use super::{ApplyResult, Board, GameResult, Move, MoveResult, Player, Position, Rank};
use crate::error::MoveError;

/// Plies without a capture or a man moving before the game is drawn
/// (forty moves each).
pub const DEFAULT_QUIET_MOVE_LIMIT: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    /// Piece that must keep capturing before the turn can pass
    active_piece: Option<Position>,
    outcome: GameResult,
    quiet_plies: u32,
    quiet_move_limit: Option<u32>,
    captured: [usize; 2],
    ply: u32,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        Self::new(Player::Green) // Green starts
    }

    /// Standard opening position with the given player to move
    pub fn new(first_player: Player) -> Self {
        Self::from_board(Board::standard(), first_player)
    }

    /// Start from an arbitrary position
    pub fn from_board(board: Board, to_move: Player) -> Self {
        GameState {
            board,
            current_player: to_move,
            active_piece: None,
            outcome: check_game_over(&board, to_move),
            quiet_plies: 0,
            quiet_move_limit: Some(DEFAULT_QUIET_MOVE_LIMIT),
            captured: [0; 2],
            ply: 0,
        }
    }

    /// Set the draw rule; `None` disables it
    pub fn with_quiet_move_limit(mut self, limit: Option<u32>) -> Self {
        self.quiet_move_limit = limit;
        self
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece locked into a capture chain, if any
    pub fn active_piece(&self) -> Option<Position> {
        self.active_piece
    }

    pub fn outcome(&self) -> GameResult {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_over()
    }

    /// Number of opposing pieces `player` has captured so far
    pub fn captured_by(&self, player: Player) -> usize {
        self.captured[player_index(player)]
    }

    /// Half-moves played so far
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Legal moves for the current player, restricted to the chain piece
    /// while a capture chain is in progress.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        match self.active_piece {
            Some(piece) => rules::legal_moves_from(&self.board, self.current_player, piece),
            None => rules::legal_moves(&self.board, self.current_player),
        }
    }

    /// Validate a move for the current player without applying it
    pub fn validate(&self, from: Position, to: Position) -> Result<MoveResult, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if let Some(required) = self.active_piece {
            if from != required {
                return Err(MoveError::MustContinueChain { required });
            }
        }
        validate_move(&self.board, self.current_player, from, to)
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(
        &self,
        from: Position,
        to: Position,
    ) -> Result<(GameState, ApplyResult), MoveError> {
        let mut next = *self;
        let applied = next.apply_move_mut(from, to)?;
        Ok((next, applied))
    }

    /// Apply move mutably (for UI efficiency)
    pub fn apply_move_mut(&mut self, from: Position, to: Position) -> Result<ApplyResult, MoveError> {
        self.validate(from, to)?;

        let mover = self.current_player;
        let moved_man = matches!(self.board.at(from), Some(piece) if piece.rank == Rank::Man);
        let applied = apply_move(&mut self.board, Move::new(from, to));
        self.ply += 1;

        if applied.is_capture {
            self.captured[player_index(mover)] += 1;
        }
        if applied.promoted {
            info!(player = mover.name(), square = %to, "man crowned");
        }
        if applied.is_capture || moved_man {
            self.quiet_plies = 0;
        } else {
            self.quiet_plies += 1;
        }

        if applied.must_continue {
            self.active_piece = Some(to);
        } else {
            self.active_piece = None;
            self.current_player = mover.other();
        }

        self.outcome = check_game_over(&self.board, self.current_player);
        if !self.is_terminal() && self.active_piece.is_none() {
            if let Some(limit) = self.quiet_move_limit.filter(|&limit| limit > 0) {
                if self.quiet_plies >= limit {
                    self.outcome = GameResult::Draw;
                }
            }
        }
        if self.is_terminal() {
            info!(outcome = ?self.outcome, ply = self.ply, "game over");
        }

        Ok(applied)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Start a standard game with Green to move.
pub fn new_game() -> GameState {
    GameState::initial()
}

fn player_index(player: Player) -> usize {
    match player {
        Player::Green => 0,
        Player::Orange => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Piece;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn chain_board() -> Board {
        Board::empty()
            .with_piece(pos(0, 0), Piece::man(Player::Green))
            .unwrap()
            .with_piece(pos(1, 1), Piece::man(Player::Orange))
            .unwrap()
            .with_piece(pos(3, 3), Piece::man(Player::Orange))
            .unwrap()
            .with_piece(pos(5, 3), Piece::man(Player::Orange))
            .unwrap()
            .with_piece(pos(7, 7), Piece::man(Player::Orange))
            .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.current_player(), Player::Green);
        assert!(!state.is_terminal());
        assert_eq!(state.outcome(), GameResult::InProgress);
        assert_eq!(state.legal_moves().len(), 7);
        assert_eq!(new_game(), state);
    }

    #[test]
    fn test_opening_step_passes_turn() {
        let state = GameState::initial();
        let (next, applied) = state.apply_move(pos(2, 0), pos(3, 1)).unwrap();

        assert!(!applied.is_capture);
        assert!(!applied.must_continue);
        assert_eq!(next.current_player(), Player::Orange);
        assert_eq!(next.board().get_piece(pos(3, 1)), Ok(Some(Piece::man(Player::Green))));
        // The previous state is untouched
        assert_eq!(state.board().get_piece(pos(3, 1)), Ok(None));
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut state = GameState::initial();
        assert_eq!(
            state.apply_move_mut(pos(5, 1), pos(4, 0)),
            Err(MoveError::NotYourPiece { position: pos(5, 1) })
        );
        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn test_chain_keeps_turn_until_done() {
        let mut state = GameState::from_board(chain_board(), Player::Green);

        let applied = state.apply_move_mut(pos(0, 0), pos(2, 2)).unwrap();
        assert!(applied.must_continue);
        assert_eq!(state.current_player(), Player::Green);
        assert_eq!(state.active_piece(), Some(pos(2, 2)));

        state.apply_move_mut(pos(2, 2), pos(4, 4)).unwrap();
        assert_eq!(state.current_player(), Player::Green);

        let applied = state.apply_move_mut(pos(4, 4), pos(6, 2)).unwrap();
        assert!(!applied.must_continue);
        assert_eq!(state.current_player(), Player::Orange);
        assert_eq!(state.active_piece(), None);
        assert_eq!(state.captured_by(Player::Green), 3);
        assert_eq!(state.ply(), 3);
    }

    #[test]
    fn test_chain_lock_rejects_other_pieces() {
        let board = chain_board()
            .with_piece(pos(0, 6), Piece::man(Player::Green))
            .unwrap();
        let mut state = GameState::from_board(board, Player::Green);
        state.apply_move_mut(pos(0, 0), pos(2, 2)).unwrap();

        assert_eq!(
            state.validate(pos(0, 6), pos(1, 5)),
            Err(MoveError::MustContinueChain { required: pos(2, 2) })
        );
        assert_eq!(state.validate(pos(2, 2), pos(3, 1)), Err(MoveError::MustCapture));
        assert_eq!(state.legal_moves(), vec![Move::new(pos(2, 2), pos(4, 4))]);
    }

    #[test]
    fn test_capturing_last_piece_wins() {
        let board = Board::empty()
            .with_piece(pos(2, 2), Piece::man(Player::Green))
            .unwrap()
            .with_piece(pos(3, 3), Piece::man(Player::Orange))
            .unwrap();
        let mut state = GameState::from_board(board, Player::Green);
        state.apply_move_mut(pos(2, 2), pos(4, 4)).unwrap();

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), GameResult::Winner(Player::Green));
        assert_eq!(state.validate(pos(4, 4), pos(5, 5)), Err(MoveError::GameOver));
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_blocking_opponent_wins() {
        // Green steps to (6,6); Orange's (7,7) can neither step nor jump.
        let board = Board::empty()
            .with_piece(pos(7, 7), Piece::man(Player::Orange))
            .unwrap()
            .with_piece(pos(5, 5), Piece::man(Player::Green))
            .unwrap()
            .with_piece(pos(5, 7), Piece::man(Player::Green))
            .unwrap();
        let mut state = GameState::from_board(board, Player::Green);
        state.apply_move_mut(pos(5, 7), pos(6, 6)).unwrap();
        assert_eq!(state.outcome(), GameResult::Winner(Player::Green));
    }

    #[test]
    fn test_quiet_king_moves_draw() {
        let board = Board::empty()
            .with_piece(pos(0, 0), Piece::king(Player::Green))
            .unwrap()
            .with_piece(pos(7, 7), Piece::king(Player::Orange))
            .unwrap();
        let mut state = GameState::from_board(board, Player::Green).with_quiet_move_limit(Some(4));

        state.apply_move_mut(pos(0, 0), pos(1, 1)).unwrap();
        state.apply_move_mut(pos(7, 7), pos(6, 6)).unwrap();
        state.apply_move_mut(pos(1, 1), pos(0, 0)).unwrap();
        assert!(!state.is_terminal());
        state.apply_move_mut(pos(6, 6), pos(7, 7)).unwrap();
        assert_eq!(state.outcome(), GameResult::Draw);
    }

    #[test]
    fn test_man_move_resets_quiet_count() {
        let board = Board::empty()
            .with_piece(pos(0, 0), Piece::king(Player::Green))
            .unwrap()
            .with_piece(pos(2, 6), Piece::man(Player::Green))
            .unwrap()
            .with_piece(pos(7, 7), Piece::king(Player::Orange))
            .unwrap();
        let mut state = GameState::from_board(board, Player::Green).with_quiet_move_limit(Some(2));

        state.apply_move_mut(pos(2, 6), pos(3, 7)).unwrap();
        state.apply_move_mut(pos(7, 7), pos(6, 6)).unwrap();
        assert!(!state.is_terminal());
        state.apply_move_mut(pos(0, 0), pos(1, 1)).unwrap();
        assert_eq!(state.outcome(), GameResult::Draw);
    }

    #[test]
    fn test_draw_rule_disabled() {
        let board = Board::empty()
            .with_piece(pos(0, 0), Piece::king(Player::Green))
            .unwrap()
            .with_piece(pos(7, 7), Piece::king(Player::Orange))
            .unwrap();
        let mut state = GameState::from_board(board, Player::Green).with_quiet_move_limit(None);
        for _ in 0..5 {
            state.apply_move_mut(pos(0, 0), pos(1, 1)).unwrap();
            state.apply_move_mut(pos(7, 7), pos(6, 6)).unwrap();
            state.apply_move_mut(pos(1, 1), pos(0, 0)).unwrap();
            state.apply_move_mut(pos(6, 6), pos(7, 7)).unwrap();
        }
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_orange_can_start() {
        let state = GameState::new(Player::Orange);
        assert_eq!(state.current_player(), Player::Orange);
        assert!(state.validate(pos(5, 1), pos(4, 0)).is_ok());
        assert_eq!(
            state.validate(pos(2, 0), pos(3, 1)),
            Err(MoveError::NotYourPiece { position: pos(2, 0) })
        );
    }
}
