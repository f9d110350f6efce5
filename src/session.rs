//! One game between a human-driven caller and the engine.
//!
//! The session owns its board exclusively. Whose turn it is and whether the game is over are
//! always recomputed from the grid, checking for a win before checking for a draw.

use tracing::{debug, info, instrument};

use crate::minimax::SearchEngine;
use crate::tictactoe::{Board, EngineError, GameState, Move, Player};

/// Outcome of one human turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub human: Move,
    /// `None` when the human move ended the game.
    pub machine: Option<Move>,
    pub state: GameState,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    first: Player,

    engine: SearchEngine,
    opening: Option<Move>,
}

impl GameSession {
    /// Starts a game. If the machine starts, it has already made its opening move when this
    /// returns (see [`GameSession::opening`]).
    #[instrument]
    pub fn new(first: Player, alpha_beta_prune: bool) -> Result<Self, EngineError> {
        let mut session = GameSession {
            board: Board::new(),
            first,
            engine: SearchEngine::new(alpha_beta_prune),
            opening: None,
        };

        session.open()?;

        Ok(session)
    }

    fn open(&mut self) -> Result<(), EngineError> {
        self.opening = match self.first {
            Player::Machine => Some(self.machine_move()?),
            Player::Human => None,
        };

        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn first(&self) -> Player {
        self.first
    }

    /// The machine's opening move, if it started.
    pub fn opening(&self) -> Option<Move> {
        self.opening
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    pub fn to_move(&self) -> Player {
        self.board.player_to_move(self.first)
    }

    fn check_turn(&self, player: Player) -> Result<(), EngineError> {
        if self.state().is_terminal() {
            return Err(EngineError::GameOver);
        }

        let expected = self.to_move();
        if expected != player {
            return Err(EngineError::NotYourTurn { expected });
        }

        Ok(())
    }

    /// Places the human's mark and, unless that ended the game, the machine's reply.
    /// On error nothing changes.
    #[instrument(skip(self))]
    pub fn play(&mut self, row: usize, col: usize) -> Result<TurnReport, EngineError> {
        self.check_turn(Player::Human)?;

        let human = Move::new(row, col)?;
        self.board.apply_move(human, Player::Human)?;
        debug!(%human, "human moved");

        let machine = match self.state() {
            GameState::InProgress => Some(self.machine_move()?),
            _ => None,
        };

        let state = self.state();
        if state.is_terminal() {
            info!(%state, board = %self.board.to_notation(), "game over");
        }

        Ok(TurnReport { human, machine, state })
    }

    pub fn machine_move(&mut self) -> Result<Move, EngineError> {
        self.check_turn(Player::Machine)?;

        let machine = self.engine.play_best_move(&mut self.board, Player::Machine)?;
        debug!(%machine, "machine moved");

        Ok(machine)
    }

    /// Fresh board, same opening player.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.board = Board::new();
        self.open()
    }
}
