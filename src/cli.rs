//! Command-line interface for unbeatable.

use clap::{Parser, Subcommand};
use unbeatable_tictactoe::{Board, Player};

/// Unbeatable - tic-tac-toe against an engine that never loses
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Tic-tac-toe against a minimax engine that never loses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Path to a TOML config file (ignored if missing)
        #[arg(short, long, default_value = "unbeatable.toml")]
        config: std::path::PathBuf,

        /// Mark you play (x or o); X always moves first
        #[arg(long)]
        human: Option<Player>,

        /// Pause before each computer move, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Print the score and node count behind each computer move
        #[arg(long)]
        show_search: bool,
    },

    /// Print the best move for the side to move on a board
    BestMove {
        /// Nine cells in row-major order, e.g. "X../.X./OO." (`.`, `_` or `-` for empty)
        board: Board,

        /// Side to move (x or o); inferred from the mark counts if omitted
        #[arg(long)]
        to_move: Option<Player>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the engine play itself from the empty board
    Selfplay,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_best_move_side_flag() {
        let args = ["unbeatable", "best-move", "X../.X./OO.", "--to-move", "o"];
        match parse(&args) {
            Command::BestMove { to_move, json, .. } => {
                assert_eq!(to_move, Some(Player::O));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let inferred = parse(&["unbeatable", "best-move", "X../.X./OO."]);
        assert!(matches!(inferred, Command::BestMove { to_move: None, .. }));
    }
}
