//! Move legality, capture resolution and game-end detection.
//!
//! Every function here is pure with respect to its inputs except
//! [`apply_move`], which mutates the board it is handed and trusts that the
//! move was validated first.

use tracing::debug;

use super::{ApplyResult, Board, GameResult, Move, MoveResult, Piece, Player, Position};
use crate::error::MoveError;

const COL_DIRECTIONS: [i8; 2] = [1, -1];

/// Single jumps available to `piece` standing on `from`, as
/// `(captured square, landing square)` pairs.
fn jumps_from(board: &Board, from: Position, piece: Piece) -> Vec<(Position, Position)> {
    let mut jumps = Vec::new();
    for &dr in piece.row_directions() {
        for dc in COL_DIRECTIONS {
            let (Some(over), Some(landing)) = (from.offset(dr, dc), from.offset(2 * dr, 2 * dc))
            else {
                continue;
            };
            let captures_opponent = matches!(board.at(over), Some(p) if p.owner != piece.owner);
            if captures_opponent && board.at(landing).is_none() {
                jumps.push((over, landing));
            }
        }
    }
    jumps
}

fn steps_from(board: &Board, from: Position, piece: Piece) -> Vec<Position> {
    piece
        .row_directions()
        .iter()
        .flat_map(|&dr| COL_DIRECTIONS.iter().filter_map(move |&dc| from.offset(dr, dc)))
        .filter(|&to| board.at(to).is_none())
        .collect()
}

/// Whether the piece owned by `player` on `pos` has at least one capture.
pub fn has_further_capture(board: &Board, pos: Position, player: Player) -> bool {
    match board.get_piece(pos) {
        Ok(Some(piece)) if piece.owner == player => !jumps_from(board, pos, piece).is_empty(),
        _ => false,
    }
}

/// Every single jump available to `player` anywhere on the board.
pub fn available_captures(board: &Board, player: Player) -> Vec<Move> {
    board
        .pieces(player)
        .flat_map(|(from, piece)| {
            jumps_from(board, from, piece)
                .into_iter()
                .map(move |(_, to)| Move::new(from, to))
        })
        .collect()
}

/// Legal moves for `player`: the captures when any exist, otherwise steps.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let captures = available_captures(board, player);
    if !captures.is_empty() {
        return captures;
    }
    board
        .pieces(player)
        .flat_map(|(from, piece)| {
            steps_from(board, from, piece)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Legal moves for the single piece on `from`, honouring mandatory capture
/// across the whole board.
pub fn legal_moves_from(board: &Board, player: Player, from: Position) -> Vec<Move> {
    legal_moves(board, player)
        .into_iter()
        .filter(|mv| mv.from == from)
        .collect()
}

/// Decide whether `player` may move the piece on `from` to `to`.
///
/// Checks, in order: board bounds, that the piece actually moves, origin
/// ownership, destination colour and occupancy, diagonal geometry, direction
/// for men, the jumped-over piece, and finally mandatory capture for steps.
/// For jumps, `must_continue` is computed on a scratch copy of the board with
/// the jump already made.
pub fn validate_move(
    board: &Board,
    player: Player,
    from: Position,
    to: Position,
) -> Result<MoveResult, MoveError> {
    let result = classify(board, player, from, to);
    match &result {
        Ok(outcome) => debug!(%from, %to, player = player.name(), ?outcome, "move accepted"),
        Err(err) => debug!(%from, %to, player = player.name(), %err, "move rejected"),
    }
    result
}

fn classify(
    board: &Board,
    player: Player,
    from: Position,
    to: Position,
) -> Result<MoveResult, MoveError> {
    let piece = board.get_piece(from)?;
    let target = board.get_piece(to)?;
    if from == to {
        return Err(MoveError::NoMovement);
    }

    let piece = piece.ok_or(MoveError::EmptySquare { position: from })?;
    if piece.owner != player {
        return Err(MoveError::NotYourPiece { position: from });
    }
    if !to.is_dark() {
        return Err(MoveError::InvalidSquare { position: to });
    }
    if target.is_some() {
        return Err(MoveError::OccupiedSquare { position: to });
    }

    let dr = to.row as isize - from.row as isize;
    let dc = to.col as isize - from.col as isize;
    let distance = dr.abs();
    if distance != dc.abs() || !(1..=2).contains(&distance) {
        return Err(MoveError::IllegalJump { from, to });
    }
    if !piece.can_move_toward(dr) {
        return Err(MoveError::WrongDirection { from, to });
    }

    if distance == 1 {
        if !available_captures(board, player).is_empty() {
            return Err(MoveError::MustCapture);
        }
        return Ok(MoveResult::default());
    }

    let over = from.midpoint(to);
    match board.at(over) {
        Some(jumped) if jumped.owner != player => {}
        _ => return Err(MoveError::IllegalJump { from, to }),
    }

    let mut scratch = *board;
    let applied = apply_move(&mut scratch, Move::new(from, to));
    Ok(MoveResult {
        is_capture: true,
        captured_position: Some(over),
        must_continue: applied.must_continue,
    })
}

/// Make a validated move on the board.
///
/// Removes the jumped piece for captures and crowns the piece if it landed
/// on its promotion row. Crowning ends a capture chain, so `must_continue`
/// is only set for an uncrowned piece that can capture again. Turn order is
/// left to the caller.
pub fn apply_move(board: &mut Board, mv: Move) -> ApplyResult {
    debug_assert!(mv.from.in_bounds() && mv.to.in_bounds(), "move off the board: {mv}");
    debug_assert!(mv.to.is_dark(), "move to a light square: {mv}");
    debug_assert!(board.at(mv.to).is_none(), "move onto an occupied square: {mv}");

    let Some(piece) = board.remove_piece(mv.from) else {
        debug_assert!(false, "no piece to move: {mv}");
        return ApplyResult::default();
    };
    let placed = board.place_piece(mv.to, piece);
    debug_assert!(placed.is_ok(), "could not place piece: {mv}");

    let captured_position = if mv.is_jump() {
        let over = mv.from.midpoint(mv.to);
        let captured = board.remove_piece(over);
        debug_assert!(
            matches!(captured, Some(p) if p.owner != piece.owner),
            "jump without an opponent piece to capture: {mv}"
        );
        Some(over)
    } else {
        None
    };

    let promoted = board.promote_if_eligible(mv.to);
    let is_capture = captured_position.is_some();
    let must_continue = is_capture && !promoted && has_further_capture(board, mv.to, piece.owner);

    ApplyResult {
        is_capture,
        captured_position,
        promoted,
        must_continue,
    }
}

/// Every maximal capture chain the piece on `from` can make, each listed as
/// the squares it visits starting with `from`.
///
/// Depth-first over an explicit stack of scratch boards; each jump is played
/// on its own copy so a captured piece cannot be jumped twice. A chain stops
/// where the piece is crowned.
pub fn capture_sequences(board: &Board, from: Position) -> Vec<Vec<Position>> {
    let mut chains = Vec::new();
    if !matches!(board.get_piece(from), Ok(Some(_))) {
        return chains;
    }

    let mut stack = vec![(*board, vec![from])];
    while let Some((scratch, path)) = stack.pop() {
        let current = path[path.len() - 1];
        let Some(piece) = scratch.at(current) else {
            continue;
        };
        for (_, landing) in jumps_from(&scratch, current, piece) {
            let mut next = scratch;
            let applied = apply_move(&mut next, Move::new(current, landing));
            let mut extended = path.clone();
            extended.push(landing);
            if applied.must_continue {
                stack.push((next, extended));
            } else {
                chains.push(extended);
            }
        }
    }
    chains
}

/// Result of the game from the point of view of `player`, who is to move.
///
/// Losing every piece loses; so does having pieces but no legal move.
pub fn check_game_over(board: &Board, player: Player) -> GameResult {
    if board.count(player) == 0 {
        return GameResult::Winner(player.other());
    }
    if board.count(player.other()) == 0 {
        return GameResult::Winner(player);
    }
    if legal_moves(board, player).is_empty() {
        return GameResult::Winner(player.other());
    }
    GameResult::InProgress
}
