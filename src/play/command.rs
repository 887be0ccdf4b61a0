//! Parsing of the human's input lines.

use unbeatable_tictactoe::Position;

/// One line of input at the move prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a mark.
    Cell(Position),
    /// Abandon the current game and start another.
    NewGame,
    /// Print the help text.
    Help,
    /// Leave the program.
    Quit,
    /// Input that matched nothing.
    Unknown,
}

impl Command {
    /// Parses a prompt line.
    ///
    /// Cells are a digit 1-9 (as printed on the board), a zero-based
    /// `row col` pair, or a cell label such as `center`.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "q" | "quit" | "exit" => Command::Quit,
            "n" | "new" | "reset" => Command::NewGame,
            "h" | "help" | "?" => Command::Help,
            other => Position::parse_input(other)
                .map(Command::Cell)
                .unwrap_or(Command::Unknown),
        }
    }
}

/// Help text printed for `help`.
pub const HELP: &str = "\
Enter a cell number (1-9 as shown on the board) or a zero-based `row col`.
  n  start a new game
  h  show this help
  q  quit";
