use std::fmt;

use super::Player;
use crate::error::MoveError;

pub const BOARD_SIZE: usize = 8;

/// Rows each side fills at the start of a game.
const STARTING_ROWS: usize = 3;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Dark squares are the playable ones; (0, 0) is dark.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// The square `(dr, dc)` away, if it is still on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Position> {
        let row = self.row as isize + dr as isize;
        let col = self.col as isize + dc as isize;
        if (0..BOARD_SIZE as isize).contains(&row) && (0..BOARD_SIZE as isize).contains(&col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    /// Square halfway between two positions two diagonal steps apart.
    pub fn midpoint(self, other: Position) -> Position {
        Position::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(owner: Player) -> Self {
        Piece { owner, rank: Rank::Man }
    }

    pub const fn king(owner: Player) -> Self {
        Piece { owner, rank: Rank::King }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Row directions this piece may move and capture in.
    pub fn row_directions(self) -> &'static [i8] {
        match (self.rank, self.owner) {
            (Rank::King, _) => &[1, -1],
            (Rank::Man, Player::Green) => &[1],
            (Rank::Man, Player::Orange) => &[-1],
        }
    }

    /// Whether a move with the given row delta is allowed for this piece.
    pub fn can_move_toward(self, row_delta: isize) -> bool {
        self.row_directions()
            .iter()
            .any(|&dr| (dr as isize).signum() == row_delta.signum())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create a board with no pieces on it
    pub fn empty() -> Self {
        Board {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Standard opening layout: twelve men per side on the dark squares of
    /// each player's three back rows.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            let owner = if row < STARTING_ROWS {
                Player::Green
            } else if row >= BOARD_SIZE - STARTING_ROWS {
                Player::Orange
            } else {
                continue;
            };
            for col in (row % 2..BOARD_SIZE).step_by(2) {
                board.squares[row][col] = Some(Piece::man(owner));
            }
        }
        board
    }

    /// Builder used to set up custom positions.
    pub fn with_piece(mut self, pos: Position, piece: Piece) -> Result<Self, MoveError> {
        self.place_piece(pos, piece)?;
        Ok(self)
    }

    /// Get the piece at a position, or `None` if the square is empty
    pub fn get_piece(&self, pos: Position) -> Result<Option<Piece>, MoveError> {
        if !pos.in_bounds() {
            return Err(MoveError::OutOfBounds { position: pos });
        }
        Ok(self.squares[pos.row][pos.col])
    }

    /// Lookup for positions already known to be on the board.
    pub(crate) fn at(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row][pos.col]
    }

    pub(crate) fn place_piece(&mut self, pos: Position, piece: Piece) -> Result<(), MoveError> {
        if !pos.in_bounds() {
            return Err(MoveError::OutOfBounds { position: pos });
        }
        if !pos.is_dark() {
            return Err(MoveError::InvalidSquare { position: pos });
        }
        self.squares[pos.row][pos.col] = Some(piece);
        Ok(())
    }

    pub(crate) fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        self.squares[pos.row][pos.col].take()
    }

    /// Crown the man at `pos` if it stands on its promotion row.
    /// Returns `true` only when a promotion actually happened.
    pub fn promote_if_eligible(&mut self, pos: Position) -> bool {
        if !pos.in_bounds() {
            return false;
        }
        match &mut self.squares[pos.row][pos.col] {
            Some(piece) if piece.rank == Rank::Man && pos.row == piece.owner.promotion_row() => {
                piece.rank = Rank::King;
                true
            }
            _ => false,
        }
    }

    /// All pieces owned by `player`, in row-major order
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(move |(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| match cell {
                Some(piece) if piece.owner == player => Some((Position::new(row, col), *piece)),
                _ => None,
            })
        })
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces(player).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    /// Row 7 is printed first so Green plays "up" the diagram.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   0 1 2 3 4 5 6 7")?;
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{row} ")?;
            for col in 0..BOARD_SIZE {
                let symbol = match self.squares[row][col] {
                    Some(Piece { owner: Player::Green, rank: Rank::Man }) => 'g',
                    Some(Piece { owner: Player::Green, rank: Rank::King }) => 'G',
                    Some(Piece { owner: Player::Orange, rank: Rank::Man }) => 'o',
                    Some(Piece { owner: Player::Orange, rank: Rank::King }) => 'O',
                    None if Position::new(row, col).is_dark() => '.',
                    None => ' ',
                };
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
