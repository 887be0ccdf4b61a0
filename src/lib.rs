//! Unbeatable - play tic-tac-toe against an engine that never loses.
//!
//! The game rules and the minimax engine live in
//! [`unbeatable_tictactoe`]; this crate adds configuration and a terminal
//! front-end that drives a [`GameSession`](unbeatable_tictactoe::GameSession).
//!
//! # Architecture
//!
//! - **Config**: [`PlayConfig`] loaded from TOML, overridden by CLI flags
//! - **Play**: [`Console`], a line-oriented game loop over any reader/writer
//! - **Analysis**: one-shot engine queries ([`analyze`], [`selfplay`])

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analysis;
mod config;
mod play;

pub use analysis::{Analysis, analyze, selfplay};
pub use config::{ConfigError, PlayConfig};
pub use play::{Command, Console, HELP, Tally};
