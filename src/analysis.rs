//! One-shot engine queries for the `best-move` and `selfplay` commands.

use anyhow::{Result, bail};
use serde::Serialize;
use std::io::Write;
use tracing::{info, instrument};
use unbeatable_tictactoe::{
    Board, GameOutcome, Move, Player, SearchReport, Searcher, new_board, outcome, place,
};

/// The engine's answer for an arbitrary position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Side to move on the analysed board.
    pub to_move: Player,
    /// `(row, col)` of the recommended move.
    pub coords: (usize, usize),
    /// Full search report.
    pub report: SearchReport,
}

impl std::fmt::Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.report.is_forced_win() {
            "forced win"
        } else if self.report.is_forced_loss() {
            "lost against best play"
        } else {
            "draw with best play"
        };
        write!(
            f,
            "Best move for {}: {} at ({}, {}) - score {}, {}, {} positions searched",
            self.to_move,
            self.report.position,
            self.coords.0,
            self.coords.1,
            self.report.score,
            verdict,
            self.report.nodes
        )
    }
}

/// Finds the best move on `board` for `to_move`.
///
/// When `to_move` is `None` the side is inferred from the mark counts, X
/// having opened.
#[instrument(skip(board), fields(board = %board.compact()))]
pub fn analyze(board: &Board, to_move: Option<Player>) -> Result<Analysis> {
    let state = outcome(board);
    if state.is_terminal() {
        bail!("Position is already decided: {}", state);
    }

    let to_move = to_move.unwrap_or_else(|| board.side_to_move());
    let report = Searcher::new(to_move, to_move.opponent()).search(board)?;
    Ok(Analysis {
        to_move,
        coords: report.coords(),
        report,
    })
}

/// Lets the engine play both sides from the empty board.
///
/// Each move is written to `output`; returns the final outcome, which is
/// always a draw for a correct engine.
#[instrument(skip(output))]
pub fn selfplay<W: Write>(output: &mut W) -> Result<GameOutcome> {
    let mut board = new_board();
    let mut to_move = Player::X;

    while !outcome(&board).is_terminal() {
        let report = Searcher::new(to_move, to_move.opponent()).search(&board)?;
        let action = Move::new(to_move, report.position);
        board = place(&board, action)?;
        writeln!(output, "{} (score {})", action, report.score)?;
        to_move = to_move.opponent();
    }

    let result = outcome(&board);
    info!(%result, "Self-play finished");
    writeln!(output, "\n{}\n\n{}", board, result)?;
    Ok(result)
}
