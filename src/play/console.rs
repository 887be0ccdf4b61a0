//! Line-oriented game loop over any reader and writer.

use super::command::{Command, HELP};
use crate::config::PlayConfig;
use anyhow::Result;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{debug, info, instrument};
use unbeatable_tictactoe::{GameResult, GameSession, Roles, SessionState};

/// Results of the games finished during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Games the human won.
    pub human_wins: u32,
    /// Games the computer won.
    pub computer_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl Tally {
    /// Counts one finished game.
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::HumanWin => self.human_wins += 1,
            GameResult::ComputerWin => self.computer_wins += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    /// Total finished games.
    pub fn games(&self) -> u32 {
        self.human_wins + self.computer_wins + self.draws
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You {} - Computer {} - Draws {}",
            self.human_wins, self.computer_wins, self.draws
        )
    }
}

/// Interactive game against the engine.
pub struct Console<R, W> {
    input: R,
    output: W,
    config: PlayConfig,
    session: GameSession,
    tally: Tally,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console reading moves from `input` and printing to `output`.
    pub fn new(input: R, output: W, config: PlayConfig) -> Self {
        let session = GameSession::new(Roles::new(*config.human_mark()));
        Self {
            input,
            output,
            config,
            session,
            tally: Tally::default(),
        }
    }

    /// Plays games until the human quits or input ends.
    ///
    /// Returns the tally of finished games.
    #[instrument(skip(self), fields(human = %self.session.roles().human()))]
    pub fn run(&mut self) -> Result<Tally> {
        info!("Starting interactive play");
        let roles = self.session.roles();
        writeln!(
            self.output,
            "Tic-tac-toe: you play {}, the computer plays {}. Type h for help.",
            roles.human(),
            roles.computer()
        )?;

        loop {
            match self.session.state() {
                SessionState::ComputerTurn => self.computer_turn()?,
                SessionState::HumanTurn => {
                    if !self.human_turn()? {
                        break;
                    }
                }
                SessionState::GameOver(result) => {
                    self.tally.record(result);
                    writeln!(self.output, "\n{}\n\n{}", self.session.board(), result)?;
                    writeln!(self.output, "{}", self.tally)?;
                    if !self.confirm("Play again? [y/N] ")? {
                        break;
                    }
                    self.session.reset();
                }
            }
        }

        info!(games = self.tally.games(), "Interactive play finished");
        writeln!(self.output, "Bye. {}", self.tally)?;
        Ok(self.tally)
    }

    fn computer_turn(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Computer's turn ({}): thinking...",
            self.session.roles().computer()
        )?;
        self.output.flush()?;

        let delay = *self.config.thinking_delay_ms();
        if delay > 0 {
            std::thread::sleep(Duration::from_millis(delay));
        }

        self.session.play_computer()?;

        if let Some(action) = self.session.last_move() {
            writeln!(self.output, "Computer plays {}.", action.position)?;
        }
        if *self.config.show_search()
            && let Some(report) = self.session.last_search()
        {
            writeln!(
                self.output,
                "  (score {}, {} positions searched)",
                report.score, report.nodes
            )?;
        }
        Ok(())
    }

    /// Returns false when the human asked to quit or input ran out.
    fn human_turn(&mut self) -> Result<bool> {
        writeln!(self.output, "\n{}\n", self.session.board())?;
        writeln!(self.output, "Your turn ({})", self.session.roles().human())?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                return Ok(false);
            };

            match Command::parse(&line) {
                Command::Quit => return Ok(false),
                Command::NewGame => {
                    self.session.reset();
                    writeln!(self.output, "New game.")?;
                    return Ok(true);
                }
                Command::Help => writeln!(self.output, "{}", HELP)?,
                Command::Unknown => writeln!(
                    self.output,
                    "Didn't understand {:?}. Type h for help.",
                    line.trim()
                )?,
                Command::Cell(position) => {
                    // Only free cells are offered, so the session never sees an illegal move
                    let free = self.session.available_moves();
                    if free.contains(&position) {
                        self.session.play_human_at(position)?;
                        return Ok(true);
                    }
                    debug!(%position, "Human picked a taken cell");
                    let cells: Vec<String> = free
                        .iter()
                        .map(|pos| (pos.to_index() + 1).to_string())
                        .collect();
                    writeln!(
                        self.output,
                        "{} is taken. Free cells: {}",
                        position,
                        cells.join(" ")
                    )?;
                }
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(question)?.unwrap_or_default();
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    /// Reads one line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Consumes the console, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}
