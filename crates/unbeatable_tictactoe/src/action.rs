//! Move types and validated move application.
//!
//! Moves are domain events, not side effects. They carry the player's intent
//! and can be validated independently of execution.

use super::{Board, Player, Position, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// A move that cannot be applied to the board.
///
/// Always a caller bug: front-ends only offer empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidMove {
    /// Row or column outside 0-2.
    #[display("Cell ({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),
}

/// Creates an empty board.
pub fn new_board() -> Board {
    Board::new()
}

/// Places `player`'s mark at `(row, col)` and returns the resulting board.
///
/// The input board is never modified, so on error the caller still holds
/// the board exactly as it was.
///
/// # Errors
///
/// Returns [`InvalidMove::OutOfBounds`] for coordinates outside 0-2 and
/// [`InvalidMove::SquareOccupied`] when the cell already holds a mark.
#[instrument(skip(board), fields(board = %board.compact()))]
pub fn apply_move(
    board: &Board,
    row: usize,
    col: usize,
    player: Player,
) -> Result<Board, InvalidMove> {
    let position = Position::from_coords(row, col).ok_or_else(|| {
        warn!(row, col, "Move off the board");
        InvalidMove::OutOfBounds { row, col }
    })?;
    place(board, Move::new(player, position))
}

/// Applies a [`Move`] to a copy of `board`.
///
/// # Errors
///
/// Returns [`InvalidMove::SquareOccupied`] when the target cell already
/// holds a mark.
pub fn place(board: &Board, action: Move) -> Result<Board, InvalidMove> {
    if !board.is_empty(action.position) {
        warn!(position = %action.position, "Square already occupied");
        return Err(InvalidMove::SquareOccupied(action.position));
    }

    let mut next = *board;
    next.set(action.position, Square::Occupied(action.player));
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameOutcome, outcome};

    #[test]
    fn test_apply_move_sets_only_target_cell() {
        let board = new_board();
        let next = apply_move(&board, 1, 2, Player::X).unwrap();

        for pos in Position::valid_moves(&board) {
            let expected = if pos == Position::MiddleRight {
                Square::Occupied(Player::X)
            } else {
                Square::Empty
            };
            assert_eq!(next.get(pos), expected);
        }
        assert_eq!(outcome(&next), GameOutcome::InProgress);
    }

    #[test]
    fn test_apply_move_occupied_leaves_board_unchanged() {
        let board = apply_move(&new_board(), 1, 1, Player::X).unwrap();
        let before = board;

        let result = apply_move(&board, 1, 1, Player::O);
        assert_eq!(result, Err(InvalidMove::SquareOccupied(Position::Center)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_move_out_of_bounds() {
        let board = new_board();
        assert_eq!(
            apply_move(&board, 3, 0, Player::X),
            Err(InvalidMove::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(
            apply_move(&board, 0, 7, Player::O),
            Err(InvalidMove::OutOfBounds { row: 0, col: 7 })
        );
        assert_eq!(board, new_board());
    }

    #[test]
    fn test_move_display() {
        let action = Move::new(Player::O, Position::BottomLeft);
        assert_eq!(action.to_string(), "O -> Bottom-left");
    }
}
