//! At most one player owns a completed line.

use super::super::rules::has_line;
use super::super::{Board, Player};
use super::Invariant;
use tracing::warn;

/// Invariant: X and O never both have a completed line.
pub struct SingleWinnerInvariant;

impl Invariant<Board> for SingleWinnerInvariant {
    fn holds(board: &Board) -> bool {
        let valid = !(has_line(board, Player::X) && has_line(board, Player::O));
        if !valid {
            warn!(board = %board.compact(), "Both players hold a line");
        }
        valid
    }

    fn description() -> &'static str {
        "At most one player has three in a row"
    }
}
