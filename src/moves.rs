use serde::{Deserialize, Serialize};

use crate::board::{Board, BOARD_SIZE};
use crate::error::NotationError;

/// A single hop. A chain capture is several `Move`s by the same piece.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: (usize, usize),
    pub to: (usize, usize),
    /// The cell of the jumped piece, for captures.
    pub captured: Option<(usize, usize)>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Square-number notation, e.g. "22-18" or "22x15".
    pub fn to_notation(&self) -> String {
        let sep = if self.is_capture() { 'x' } else { '-' };
        match (square_number(self.from), square_number(self.to)) {
            (Some(f), Some(t)) => format!("{f}{sep}{t}"),
            _ => format!("{:?}{sep}{:?}", self.from, self.to),
        }
    }
}

/// Number of a dark square, 1..=32 counted row by row from row 0.
pub fn square_number((row, col): (usize, usize)) -> Option<u8> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE || !Board::is_dark(row, col) {
        return None;
    }
    Some((row * 4 + col / 2 + 1) as u8)
}

pub fn square_coords(n: u8) -> Option<(usize, usize)> {
    if !(1..=32).contains(&n) {
        return None;
    }
    let idx = (n - 1) as usize;
    let row = idx / 4;
    let col = 2 * (idx % 4) + usize::from(row % 2 == 0);
    Some((row, col))
}

/// Parse one turn such as "22-18", "22x15" or a chain "22x15x8" into the
/// hops it is made of. The separator is only checked for consistency here;
/// whether a hop is legal is up to the engine.
pub fn parse_turn(text: &str) -> Result<Vec<((usize, usize), (usize, usize))>, NotationError> {
    let err = |reason| NotationError { text: text.to_string(), reason };
    let text = text.trim();
    let capture = text.contains('x');
    if capture && text.contains('-') {
        return Err(err("mixes '-' and 'x'"));
    }
    let squares = text
        .split(if capture { 'x' } else { '-' })
        .map(|part| {
            part.trim()
                .parse::<u8>()
                .ok()
                .and_then(square_coords)
                .ok_or_else(|| err("squares must be numbers from 1 to 32"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if squares.len() < 2 {
        return Err(err("needs at least two squares"));
    }
    if !capture && squares.len() > 2 {
        return Err(err("a simple move has exactly two squares"));
    }
    Ok(squares.windows(2).map(|w| (w[0], w[1])).collect())
}
