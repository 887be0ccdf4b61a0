//! Optimal move search.
//!
//! Plain minimax over the full game tree: no pruning, no transposition
//! table, no heuristic evaluation. Only terminal boards are scored, and the
//! score depends on depth so that faster wins rank above slower ones and
//! slower losses above faster ones. A 3x3 board keeps the tree small enough
//! (at most 9! move sequences) to search exhaustively on every call.
//!
//! # Example
//!
//! ```
//! use unbeatable_tictactoe::{Board, Player, Searcher};
//!
//! let board: Board = "X../.X./OO.".parse().unwrap();
//! let report = Searcher::new(Player::O, Player::X).search(&board).unwrap();
//! assert_eq!(report.coords(), (2, 2));
//! ```

use super::rules::{has_line, is_full};
use super::{Board, Player, Position, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument, trace};

/// Score of an immediate win for the computer; losses mirror it.
pub const WIN_SCORE: i32 = 10;

/// `best_move` was asked for a move on a board with no empty square.
///
/// Always a caller bug: check [`crate::outcome`] before asking for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("No legal move: every square is occupied")]
pub struct NoLegalMove;

/// The move chosen by a search, with the evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// The chosen cell.
    pub position: Position,
    /// Minimax score of the chosen cell from the computer's point of view.
    pub score: i32,
    /// Boards visited during the search, the root's children included.
    pub nodes: u64,
}

impl SearchReport {
    /// `(row, col)` of the chosen cell.
    pub fn coords(&self) -> (usize, usize) {
        self.position.coords()
    }

    /// True when the computer can force a win from here.
    pub fn is_forced_win(&self) -> bool {
        self.score > 0
    }

    /// True when the human can force a win from here.
    pub fn is_forced_loss(&self) -> bool {
        self.score < 0
    }
}

/// Minimax searcher for one computer/human pairing.
#[derive(Debug, Clone)]
pub struct Searcher {
    computer: Player,
    human: Player,
    nodes: u64,
}

impl Searcher {
    /// Creates a searcher that plays `computer` against `human`.
    pub fn new(computer: Player, human: Player) -> Self {
        debug_assert_ne!(computer, human, "computer and human need distinct marks");
        Self {
            computer,
            human,
            nodes: 0,
        }
    }

    /// The computer's mark.
    pub fn computer(&self) -> Player {
        self.computer
    }

    /// The human's mark.
    pub fn human(&self) -> Player {
        self.human
    }

    /// Finds the computer's best move on `board`.
    ///
    /// Empty cells are tried in row-major order and a later cell replaces the
    /// current choice only with a strictly greater score, so ties go to the
    /// first cell scanned. The board is read, never modified.
    ///
    /// # Errors
    ///
    /// Returns [`NoLegalMove`] when the board has no empty square.
    #[instrument(
        skip(self, board),
        fields(board = %board.compact(), computer = %self.computer)
    )]
    pub fn search(&mut self, board: &Board) -> Result<SearchReport, NoLegalMove> {
        let started = Instant::now();
        self.nodes = 0;

        let mut best: Option<(Position, i32)> = None;

        for position in Position::valid_moves(board) {
            let mut child = *board;
            child.set(position, Square::Occupied(self.computer));
            let score = self.score(&child, 0, false);
            trace!(%position, score, "Root move scored");

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((position, score));
            }
        }

        let (position, score) = best.ok_or(NoLegalMove)?;
        let report = SearchReport {
            position,
            score,
            nodes: self.nodes,
        };

        debug!(
            %position,
            score,
            nodes = report.nodes,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Search complete"
        );
        Ok(report)
    }

    /// Minimax value of `board` from the computer's point of view.
    ///
    /// `depth` counts plies below the root move; `maximizing` is true when
    /// the computer is to move on `board`.
    pub fn score(&mut self, board: &Board, depth: i32, maximizing: bool) -> i32 {
        self.nodes += 1;

        if has_line(board, self.computer) {
            return WIN_SCORE - depth;
        }
        if has_line(board, self.human) {
            return depth - WIN_SCORE;
        }
        if is_full(board) {
            return 0;
        }

        let mark = if maximizing { self.computer } else { self.human };
        let children = Position::valid_moves(board).into_iter().map(|position| {
            let mut child = *board;
            child.set(position, Square::Occupied(mark));
            child
        });

        if maximizing {
            children
                .map(|child| self.score(&child, depth + 1, false))
                .fold(i32::MIN, i32::max)
        } else {
            children
                .map(|child| self.score(&child, depth + 1, true))
                .fold(i32::MAX, i32::min)
        }
    }
}

/// Returns `(row, col)` of the computer's optimal move on `board`.
///
/// # Errors
///
/// Returns [`NoLegalMove`] when the board has no empty square.
pub fn best_move(
    board: &Board,
    computer: Player,
    human: Player,
) -> Result<(usize, usize), NoLegalMove> {
    Searcher::new(computer, human)
        .search(board)
        .map(|report| report.coords())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_immediate_win() {
        // O to move with O O _ on the bottom row; X threatens the diagonal.
        let board: Board = "X../.X./OO.".parse().unwrap();
        let report = Searcher::new(Player::O, Player::X).search(&board).unwrap();
        assert_eq!(report.position, Position::BottomRight);
        assert_eq!(report.score, WIN_SCORE);
    }

    #[test]
    fn test_blocks_opponent_line() {
        // X threatens the top row; O has nothing better than blocking.
        let board: Board = "XX./.O./...".parse().unwrap();
        assert_eq!(best_move(&board, Player::O, Player::X), Ok((0, 2)));
    }

    #[test]
    fn test_prefers_immediate_win() {
        // X wins now at (0,2); anything else lets O complete the middle row.
        let board: Board = "XX./OO./...".parse().unwrap();
        let report = Searcher::new(Player::X, Player::O).search(&board).unwrap();
        assert_eq!(report.coords(), (0, 2));
        assert_eq!(report.score, WIN_SCORE);
        assert!(report.is_forced_win());
    }

    #[test]
    fn test_prefers_faster_win() {
        // (0,2) forks the diagonals and wins two plies later (score 8), but
        // (2,2) completes the main diagonal now.
        let board: Board = "XO./OX./...".parse().unwrap();
        let mut searcher = Searcher::new(Player::X, Player::O);

        let mut forked = board;
        forked.set(Position::TopRight, Square::Occupied(Player::X));
        assert_eq!(searcher.score(&forked, 0, false), WIN_SCORE - 2);

        let report = searcher.search(&board).unwrap();
        assert_eq!(report.coords(), (2, 2));
        assert_eq!(report.score, WIN_SCORE);
    }

    #[test]
    fn test_win_beats_blocking() {
        // X threatens (0,2) and (2,0); O completes the bottom row instead.
        let board: Board = "XX./X../.OO".parse().unwrap();
        let report = Searcher::new(Player::O, Player::X).search(&board).unwrap();
        assert_eq!(report.coords(), (2, 0));
        assert_eq!(report.score, WIN_SCORE);
    }

    #[test]
    fn test_unavoidable_loss_scores_by_depth() {
        // X threatens (0,2) and (2,0) and O has no winning reply.
        let board: Board = "XX./XO./..O".parse().unwrap();
        let report = Searcher::new(Player::O, Player::X).search(&board).unwrap();
        assert!(report.is_forced_loss());
        assert_eq!(report.score, 1 - WIN_SCORE);
        // Every reply loses on the next ply, so the first cell scanned is kept.
        assert_eq!(report.coords(), (0, 2));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(best_move(&board, Player::O, Player::X), Err(NoLegalMove));
    }

    #[test]
    fn test_last_cell() {
        let board: Board = "XOX/XOO/OX.".parse().unwrap();
        let report = Searcher::new(Player::X, Player::O).search(&board).unwrap();
        assert_eq!(report.position, Position::BottomRight);
        assert_eq!(report.nodes, 1);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board: Board = "X...O....".parse().unwrap();
        let before = board;
        let first = best_move(&board, Player::X, Player::O);
        let second = best_move(&board, Player::X, Player::O);
        assert_eq!(first, second);
        assert_eq!(board, before);
    }
}
