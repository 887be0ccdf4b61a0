//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are kept apart from board
//! storage so the search and the session can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, has_line};

use super::{Board, GameOutcome};
use tracing::instrument;

/// Derives the outcome of a board.
///
/// `Win` takes precedence over `Draw`, so a full board with a completed
/// line is a win.
#[instrument(level = "trace", skip(board), fields(board = %board.compact()))]
pub fn outcome(board: &Board) -> GameOutcome {
    if let Some(winner) = check_winner(board) {
        GameOutcome::Win(winner)
    } else if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_row_win_with_empty_cells() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        assert_eq!(outcome(&board), GameOutcome::Win(Player::X));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(outcome(&board), GameOutcome::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        let board: Board = "XOX/OXO/OXX".parse().unwrap();
        assert_eq!(outcome(&board), GameOutcome::Win(Player::X));
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(outcome(&Board::new()), GameOutcome::InProgress);
    }
}
