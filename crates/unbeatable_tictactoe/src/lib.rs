//! Tic-tac-toe rules and an opponent that never loses.
//!
//! The crate exposes four core operations, [`new_board`], [`apply_move`],
//! [`outcome`] and [`best_move`], plus a [`GameSession`] that runs the
//! human-versus-computer turn cycle on top of them. Boards are plain values;
//! nothing here holds global state.
//!
//! # Example
//!
//! ```
//! use unbeatable_tictactoe::{GameOutcome, Player, apply_move, best_move, new_board, outcome};
//!
//! let board = apply_move(&new_board(), 1, 1, Player::X).unwrap();
//! assert_eq!(outcome(&board), GameOutcome::InProgress);
//!
//! let (row, col) = best_move(&board, Player::O, Player::X).unwrap();
//! let board = apply_move(&board, row, col, Player::O).unwrap();
//! assert_eq!(board.filled(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod invariants;
mod position;
pub mod rules;
mod search;
mod session;
mod types;

pub use action::{InvalidMove, Move, apply_move, new_board, place};
pub use position::Position;
pub use rules::{check_winner as winner, is_full, outcome};
pub use search::{NoLegalMove, SearchReport, Searcher, WIN_SCORE, best_move};
pub use session::{GameResult, GameSession, Roles, SessionError, SessionState, Side};
pub use types::{Board, GameOutcome, ParseBoardError, Player, Square};
