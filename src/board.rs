use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::piece::{Color, Piece, PieceId};

pub const BOARD_SIZE: usize = 8;
pub const INITIAL_ROWS: usize = 3;

/// The 8x8 grid. Each cell owns at most one piece and pieces only ever stand
/// on dark squares, i.e. cells where `row + col` is odd.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    pub(crate) squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    next_id: u16,
}

/// Wire shape of a board before its invariants have been checked.
#[derive(Deserialize)]
struct RawBoard {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    next_id: u16,
}

impl TryFrom<RawBoard> for Board {
    type Error = SetupError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let mut seen = Vec::new();
        for (row, cells) in raw.squares.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(piece) = cell else { continue };
                if piece.position() != (row, col) {
                    return Err(SetupError::Misplaced { row, col });
                }
                if !Self::is_dark(row, col) {
                    return Err(SetupError::LightSquare { row, col });
                }
                if seen.contains(&piece.id) {
                    return Err(SetupError::DuplicateId(piece.id.0));
                }
                seen.push(piece.id);
            }
        }
        // Ids handed out later must not collide with the loaded ones.
        let next_id = seen.iter().map(|id| id.0.saturating_add(1)).max().unwrap_or(0).max(raw.next_id);
        Ok(Board { squares: raw.squares, next_id })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
            next_id: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_initial_rows(INITIAL_ROWS)
    }

    /// Black fills the dark squares of the first `rows` rows, white the last
    /// `rows` rows. `rows` comes from a validated `GameConfig` and is kept in 1..=3.
    pub(crate) fn with_initial_rows(rows: usize) -> Self {
        let rows = rows.clamp(1, INITIAL_ROWS);
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            let color = if row < rows {
                Color::Black
            } else if row >= BOARD_SIZE - rows {
                Color::White
            } else {
                continue;
            };
            for col in 0..BOARD_SIZE {
                if Self::is_dark(row, col) {
                    board.spawn(color, row, col);
                }
            }
        }
        board
    }

    pub fn is_dark(row: usize, col: usize) -> bool {
        (row + col) % 2 == 1
    }

    pub fn is_within_board(row: i32, col: i32) -> bool {
        (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
    }

    /// The piece on `(row, col)`, or `None` when the cell is empty or off the board.
    pub fn piece_at(&self, row: i32, col: i32) -> Option<&Piece> {
        if !Self::is_within_board(row, col) {
            return None;
        }
        self.squares[row as usize][col as usize].as_ref()
    }

    pub fn is_empty(&self, row: i32, col: i32) -> bool {
        self.piece_at(row, col).is_none()
    }

    /// Put a new piece on the board. Only for building positions; during play
    /// pieces are moved and removed by the engine, never created.
    pub fn place(&mut self, color: Color, row: usize, col: usize) -> Result<PieceId, SetupError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(SetupError::OutOfBounds { row, col });
        }
        if !Self::is_dark(row, col) {
            return Err(SetupError::LightSquare { row, col });
        }
        if self.squares[row][col].is_some() {
            return Err(SetupError::Occupied { row, col });
        }
        Ok(self.spawn(color, row, col))
    }

    fn spawn(&mut self, color: Color, row: usize, col: usize) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.squares[row][col] = Some(Piece::new(id, color, row, col));
        id
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten().flatten()
    }

    pub fn find(&self, id: PieceId) -> Option<&Piece> {
        self.pieces().find(|p| p.id == id)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|p| p.color == color).count()
    }

    /// Move the piece on `from` to the empty cell `to`, keeping the piece's
    /// own coordinates in step with the cell that owns it.
    pub(crate) fn relocate(&mut self, from: (usize, usize), to: (usize, usize)) -> Option<Piece> {
        if !matches!(self.cell(to), Some(None)) {
            return None;
        }
        let mut piece = self.cell_mut(from)?.take()?;
        piece.row = to.0;
        piece.col = to.1;
        *self.cell_mut(to)? = Some(piece);
        Some(piece)
    }

    pub(crate) fn remove(&mut self, at: (usize, usize)) -> Option<Piece> {
        self.cell_mut(at)?.take()
    }

    fn cell(&self, (row, col): (usize, usize)) -> Option<&Option<Piece>> {
        self.squares.get(row)?.get(col)
    }

    fn cell_mut(&mut self, (row, col): (usize, usize)) -> Option<&mut Option<Piece>> {
        self.squares.get_mut(row)?.get_mut(col)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  01234567")?;
        for (row, cells) in self.squares.iter().enumerate() {
            write!(f, "{row} ")?;
            for (col, cell) in cells.iter().enumerate() {
                let ch = match cell {
                    Some(p) => p.symbol(),
                    None if Self::is_dark(row, col) => '.',
                    None => ' ',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
