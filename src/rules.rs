// =============================================================================
// Move legality
//
// Pure predicates over a board. Nothing here mutates state; the engine asks,
// then applies. Simple moves go one diagonal step forward only, captures jump
// two diagonal steps over an opposing piece in any of the four directions.
// =============================================================================

use crate::board::Board;
use crate::moves::Move;
use crate::piece::{Color, Piece};

pub const MOVE_STEP: i32 = 1;
pub const CAPTURE_STEP: i32 = 2;

pub const CAPTURE_DIRECTIONS: [(i32, i32); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];

/// One diagonal step towards the opponent's side onto an empty cell.
pub fn can_move(board: &Board, start: (i32, i32), end: (i32, i32), player: Color) -> bool {
    if !Board::is_within_board(end.0, end.1) || !board.is_empty(end.0, end.1) {
        return false;
    }
    let row_diff = end.0 - start.0;
    let col_diff = end.1 - start.1;
    if col_diff.abs() != MOVE_STEP || row_diff.abs() != MOVE_STEP {
        return false;
    }
    row_diff == player.forward()
}

/// A two-step diagonal jump onto an empty cell over a piece of the other color.
pub fn can_capture(board: &Board, start: (i32, i32), end: (i32, i32), player: Color) -> bool {
    jumped_square(board, start, end, player).is_some()
}

/// The cell of the piece a capture from `start` to `end` would remove.
pub fn jumped_square(
    board: &Board,
    start: (i32, i32),
    end: (i32, i32),
    player: Color,
) -> Option<(usize, usize)> {
    if !Board::is_within_board(end.0, end.1) || !board.is_empty(end.0, end.1) {
        return None;
    }
    let row_diff = end.0 - start.0;
    let col_diff = end.1 - start.1;
    if row_diff.abs() != CAPTURE_STEP || col_diff.abs() != CAPTURE_STEP {
        return None;
    }
    let mid = (start.0 + row_diff / 2, start.1 + col_diff / 2);
    match board.piece_at(mid.0, mid.1) {
        Some(p) if p.color != player => Some((mid.0 as usize, mid.1 as usize)),
        _ => None,
    }
}

fn origin(piece: &Piece) -> (i32, i32) {
    (piece.row as i32, piece.col as i32)
}

pub fn can_piece_capture_again(board: &Board, piece: &Piece) -> bool {
    !captures_for(board, piece).is_empty()
}

pub fn captures_for(board: &Board, piece: &Piece) -> Vec<Move> {
    let start = origin(piece);
    CAPTURE_DIRECTIONS
        .iter()
        .filter_map(|&(dr, dc)| {
            let end = (start.0 + dr, start.1 + dc);
            jumped_square(board, start, end, piece.color).map(|mid| Move {
                from: piece.position(),
                to: (end.0 as usize, end.1 as usize),
                captured: Some(mid),
            })
        })
        .collect()
}

pub fn simple_moves_for(board: &Board, piece: &Piece) -> Vec<Move> {
    let start = origin(piece);
    let dr = piece.color.forward();
    [-MOVE_STEP, MOVE_STEP]
        .iter()
        .map(|&dc| (start.0 + dr, start.1 + dc))
        .filter(|&end| can_move(board, start, end, piece.color))
        .map(|end| Move {
            from: piece.position(),
            to: (end.0 as usize, end.1 as usize),
            captured: None,
        })
        .collect()
}

/// Every destination `piece` could reach, captures first. Capture wins when a
/// destination would qualify as both, which geometry rules out anyway.
pub fn legal_destinations(board: &Board, piece: &Piece) -> Vec<Move> {
    let mut moves = captures_for(board, piece);
    moves.extend(simple_moves_for(board, piece));
    moves
}

pub fn moves_for(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces()
        .filter(|p| p.color == color)
        .flat_map(|p| legal_destinations(board, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(Color, usize, usize)]) -> Board {
        let mut board = Board::empty();
        for &(color, row, col) in pieces {
            board.place(color, row, col).expect("test position uses dark squares");
        }
        board
    }

    #[test]
    fn simple_moves_only_go_one_step_forward() {
        let board = board_with(&[(Color::White, 5, 2), (Color::Black, 2, 3)]);
        for row in -1..9 {
            for col in -1..9 {
                let white_ok = can_move(&board, (5, 2), (row, col), Color::White);
                assert_eq!(white_ok, row == 4 && (col == 1 || col == 3), "white to ({row}, {col})");
                let black_ok = can_move(&board, (2, 3), (row, col), Color::Black);
                assert_eq!(black_ok, row == 3 && (col == 2 || col == 4), "black to ({row}, {col})");
            }
        }
    }

    #[test]
    fn simple_move_blocked_by_any_piece() {
        let board = board_with(&[(Color::White, 5, 2), (Color::White, 4, 1), (Color::Black, 4, 3)]);
        assert!(!can_move(&board, (5, 2), (4, 1), Color::White));
        assert!(!can_move(&board, (5, 2), (4, 3), Color::White));
    }

    #[test]
    fn simple_move_off_the_edge() {
        let board = board_with(&[(Color::White, 7, 0)]);
        assert!(!can_move(&board, (7, 0), (6, -1), Color::White));
        assert!(can_move(&board, (7, 0), (6, 1), Color::White));
    }

    #[test]
    fn capture_needs_an_opposing_midpoint() {
        let board = board_with(&[(Color::White, 5, 2), (Color::Black, 4, 3), (Color::White, 4, 1)]);
        assert!(can_capture(&board, (5, 2), (3, 4), Color::White));
        assert_eq!(jumped_square(&board, (5, 2), (3, 4), Color::White), Some((4, 3)));
        // Own piece in the middle.
        assert!(!can_capture(&board, (5, 2), (3, 0), Color::White));
        // Empty middle.
        assert!(!can_capture(&board, (5, 2), (7, 4), Color::White));
        assert!(!can_capture(&board, (5, 2), (7, 0), Color::White));
    }

    #[test]
    fn capture_needs_empty_landing_inside_the_board() {
        let board = board_with(&[(Color::White, 5, 2), (Color::Black, 4, 3), (Color::Black, 3, 4)]);
        assert!(!can_capture(&board, (5, 2), (3, 4), Color::White));
        let edge = board_with(&[(Color::White, 2, 1), (Color::Black, 1, 0)]);
        assert!(!can_capture(&edge, (2, 1), (0, -1), Color::White));
    }

    #[test]
    fn capture_rejects_wrong_geometry() {
        let board = board_with(&[(Color::White, 5, 2), (Color::Black, 4, 3)]);
        for row in -1..9 {
            for col in -1..9 {
                let ok = can_capture(&board, (5, 2), (row, col), Color::White);
                assert_eq!(ok, (row, col) == (3, 4), "white jump to ({row}, {col})");
            }
        }
    }

    #[test]
    fn backward_captures_are_allowed() {
        let board = board_with(&[(Color::Black, 4, 3), (Color::White, 3, 4)]);
        assert!(can_capture(&board, (4, 3), (2, 5), Color::Black));
        let white_piece = board.piece_at(3, 4).copied().expect("placed");
        assert!(can_piece_capture_again(&board, &white_piece));
    }

    #[test]
    fn captures_listed_before_simple_moves() {
        let board = board_with(&[(Color::White, 5, 2), (Color::Black, 4, 3)]);
        let piece = board.piece_at(5, 2).copied().expect("placed");
        let dests = legal_destinations(&board, &piece);
        assert_eq!(dests.len(), 2);
        assert_eq!(dests[0].to, (3, 4));
        assert!(dests[0].is_capture());
        assert_eq!(dests[1].to, (4, 1));
        assert!(!dests[1].is_capture());
    }

    #[test]
    fn opening_moves() {
        let board = Board::new();
        assert_eq!(moves_for(&board, Color::White).len(), 7);
        assert_eq!(moves_for(&board, Color::Black).len(), 7);
        assert!(moves_for(&board, Color::White).iter().all(|m| !m.is_capture()));
    }
}
