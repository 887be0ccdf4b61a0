//! Human-versus-computer game session.
//!
//! A session owns the board and walks the turn cycle
//! `HumanTurn → ComputerTurn → … → GameOver`. Each operation is only legal
//! in one state; calling it in another state is rejected without touching
//! the board. `reset` is the only way out of `GameOver`.

use super::action::{InvalidMove, Move, place};
use super::invariants::{BoardInvariants, InvariantSet};
use super::search::{NoLegalMove, SearchReport, Searcher};
use super::{Board, GameOutcome, Player, Position, rules};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Which mark the human plays; the computer takes the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roles {
    human: Player,
    computer: Player,
}

impl Roles {
    /// Human plays `human`, computer plays the opponent mark.
    pub fn new(human: Player) -> Self {
        Self {
            human,
            computer: human.opponent(),
        }
    }

    /// The human's mark.
    pub fn human(&self) -> Player {
        self.human
    }

    /// The computer's mark.
    pub fn computer(&self) -> Player {
        self.computer
    }

    /// Who owns `mark`.
    pub fn side_of(&self, mark: Player) -> Side {
        if mark == self.human {
            Side::Human
        } else {
            Side::Computer
        }
    }
}

impl Default for Roles {
    /// The human plays X and moves first.
    fn default() -> Self {
        Self::new(Player::X)
    }
}

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Side {
    /// The person at the keyboard.
    Human,
    /// The minimax engine.
    Computer,
}

/// How a finished game ended, from the session's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// The human completed a line.
    HumanWin,
    /// The computer completed a line.
    ComputerWin,
    /// Board filled with no line.
    Draw,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::HumanWin => write!(f, "You win!"),
            GameResult::ComputerWin => write!(f, "Computer wins!"),
            GameResult::Draw => write!(f, "It's a draw!"),
        }
    }
}

/// Where the session is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for the human's move.
    HumanTurn,
    /// Waiting for the computer's move.
    ComputerTurn,
    /// Terminal; only `reset` leaves this state.
    GameOver(GameResult),
}

impl SessionState {
    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        matches!(self, SessionState::GameOver(_))
    }
}

/// Errors from driving a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The human picked a cell that cannot be played.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMove),

    /// The search found no empty cell.
    #[display("{}", _0)]
    NoLegalMove(NoLegalMove),

    /// The operation belongs to the other side's turn.
    #[display("It is not the {}'s turn", _0)]
    NotYourTurn(#[error(not(source))] Side),

    /// The game is over; reset to play again.
    #[display("Game is already over")]
    GameOver,
}

impl From<InvalidMove> for SessionError {
    fn from(err: InvalidMove) -> Self {
        Self::InvalidMove(err)
    }
}

impl From<NoLegalMove> for SessionError {
    fn from(err: NoLegalMove) -> Self {
        Self::NoLegalMove(err)
    }
}

/// A single human-versus-computer game.
#[derive(Debug, Clone)]
pub struct GameSession {
    roles: Roles,
    board: Board,
    state: SessionState,
    history: Vec<Move>,
    searcher: Searcher,
    last_search: Option<SearchReport>,
}

impl GameSession {
    /// Starts a game with an empty board.
    ///
    /// X always opens, so a human playing O starts in `ComputerTurn`.
    #[instrument]
    pub fn new(roles: Roles) -> Self {
        let session = Self {
            roles,
            board: Board::new(),
            state: Self::initial_state(roles),
            history: Vec::new(),
            searcher: Searcher::new(roles.computer(), roles.human()),
            last_search: None,
        };
        info!(human = %roles.human(), state = ?session.state, "New game");
        session
    }

    fn initial_state(roles: Roles) -> SessionState {
        match roles.side_of(Player::X) {
            Side::Human => SessionState::HumanTurn,
            Side::Computer => SessionState::ComputerTurn,
        }
    }

    /// Returns the roles.
    pub fn roles(&self) -> Roles {
        self.roles
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The most recent move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Report of the computer's most recent search.
    pub fn last_search(&self) -> Option<&SearchReport> {
        self.last_search.as_ref()
    }

    /// Outcome of the current board.
    pub fn outcome(&self) -> GameOutcome {
        rules::outcome(&self.board)
    }

    /// Cells the human may pick right now (empty during `HumanTurn`).
    pub fn available_moves(&self) -> Vec<Position> {
        match self.state {
            SessionState::HumanTurn => Position::valid_moves(&self.board),
            _ => Vec::new(),
        }
    }

    /// Plays the human's mark at `(row, col)`.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidMove`] for an off-board or occupied cell,
    /// [`SessionError::NotYourTurn`] during the computer's turn and
    /// [`SessionError::GameOver`] after the game ended. The session is
    /// unchanged on error.
    #[instrument(skip(self), fields(state = ?self.state))]
    pub fn play_human(&mut self, row: usize, col: usize) -> Result<SessionState, SessionError> {
        self.expect_turn(Side::Human)?;
        let position = Position::from_coords(row, col)
            .ok_or(InvalidMove::OutOfBounds { row, col })?;
        self.commit(Move::new(self.roles.human(), position))
    }

    /// Plays the human's mark at `position`.
    ///
    /// # Errors
    ///
    /// Same as [`GameSession::play_human`].
    pub fn play_human_at(&mut self, position: Position) -> Result<SessionState, SessionError> {
        let (row, col) = position.coords();
        self.play_human(row, col)
    }

    /// Searches for and plays the computer's move.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotYourTurn`] during the human's turn and
    /// [`SessionError::GameOver`] after the game ended.
    #[instrument(skip(self), fields(state = ?self.state))]
    pub fn play_computer(&mut self) -> Result<SessionState, SessionError> {
        self.expect_turn(Side::Computer)?;
        let report = self.searcher.search(&self.board)?;
        debug!(position = %report.position, score = report.score, "Computer chose");
        self.last_search = Some(report);
        self.commit(Move::new(self.roles.computer(), report.position))
    }

    /// Discards the game and starts over with the same roles.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(moves = self.history.len(), "Resetting game");
        *self = Self::new(self.roles);
    }

    fn expect_turn(&self, side: Side) -> Result<(), SessionError> {
        let expected = match side {
            Side::Human => SessionState::HumanTurn,
            Side::Computer => SessionState::ComputerTurn,
        };
        match self.state {
            SessionState::GameOver(_) => {
                warn!(%side, "Move requested after game over");
                Err(SessionError::GameOver)
            }
            state if state != expected => {
                warn!(%side, ?state, "Move requested out of turn");
                Err(SessionError::NotYourTurn(side))
            }
            _ => Ok(()),
        }
    }

    fn commit(&mut self, action: Move) -> Result<SessionState, SessionError> {
        self.board = place(&self.board, action)?;
        self.history.push(action);

        debug_assert!(
            BoardInvariants::check_all(&self.board).is_ok(),
            "board invariants violated after {}",
            action
        );

        self.state = match rules::outcome(&self.board) {
            GameOutcome::Win(mark) => SessionState::GameOver(match self.roles.side_of(mark) {
                Side::Human => GameResult::HumanWin,
                Side::Computer => GameResult::ComputerWin,
            }),
            GameOutcome::Draw => SessionState::GameOver(GameResult::Draw),
            GameOutcome::InProgress => match self.roles.side_of(action.player) {
                Side::Human => SessionState::ComputerTurn,
                Side::Computer => SessionState::HumanTurn,
            },
        };

        info!(%action, state = ?self.state, "Move played");
        Ok(self.state)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Roles::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_x_starts() {
        let session = GameSession::default();
        assert_eq!(session.state(), SessionState::HumanTurn);
        assert_eq!(session.available_moves().len(), 9);
    }

    #[test]
    fn test_human_o_waits_for_computer() {
        let mut session = GameSession::new(Roles::new(Player::O));
        assert_eq!(session.state(), SessionState::ComputerTurn);
        assert!(session.available_moves().is_empty());

        let state = session.play_computer().unwrap();
        assert_eq!(state, SessionState::HumanTurn);
        assert_eq!(
            session.last_move(),
            Some(Move::new(Player::X, Position::TopLeft))
        );
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = GameSession::default();
        assert_eq!(session.play_human(1, 1), Ok(SessionState::ComputerTurn));
        assert_eq!(
            session.play_human(0, 0),
            Err(SessionError::NotYourTurn(Side::Human))
        );
        assert_eq!(session.play_computer(), Ok(SessionState::HumanTurn));
        assert_eq!(
            session.play_computer(),
            Err(SessionError::NotYourTurn(Side::Computer))
        );
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_invalid_human_move_leaves_session_unchanged() {
        let mut session = GameSession::default();
        session.play_human(1, 1).unwrap();
        session.play_computer().unwrap();

        let board = *session.board();
        let taken = session.last_move().unwrap().position;
        let (row, col) = taken.coords();

        assert_eq!(
            session.play_human(row, col),
            Err(SessionError::InvalidMove(InvalidMove::SquareOccupied(taken)))
        );
        assert_eq!(
            session.play_human(5, 1),
            Err(SessionError::InvalidMove(InvalidMove::OutOfBounds { row: 5, col: 1 }))
        );
        assert_eq!(session.board(), &board);
        assert_eq!(session.state(), SessionState::HumanTurn);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_game_over_blocks_moves_until_reset() {
        let mut session = GameSession::default();
        // Human always takes the first free cell.
        while !session.state().is_over() {
            match session.state() {
                SessionState::HumanTurn => {
                    let cell = session.available_moves()[0];
                    session.play_human_at(cell).unwrap();
                }
                SessionState::ComputerTurn => {
                    session.play_computer().unwrap();
                }
                SessionState::GameOver(_) => unreachable!(),
            }
        }

        assert_ne!(session.state(), SessionState::GameOver(GameResult::HumanWin));
        assert_eq!(session.play_human(0, 0), Err(SessionError::GameOver));
        assert_eq!(session.play_computer(), Err(SessionError::GameOver));

        session.reset();
        assert_eq!(session.state(), SessionState::HumanTurn);
        assert!(session.history().is_empty());
        assert_eq!(session.board(), &Board::new());
        assert!(session.last_search().is_none());
    }

    #[test]
    fn test_result_display() {
        assert_eq!(GameResult::HumanWin.to_string(), "You win!");
        assert_eq!(GameResult::ComputerWin.to_string(), "Computer wins!");
        assert_eq!(GameResult::Draw.to_string(), "It's a draw!");
    }
}
