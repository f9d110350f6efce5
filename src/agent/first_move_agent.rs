use crate::agent::Agent;
use crate::tictactoe::{Board, EngineError, Move, Player};

/// agent that always picks the first empty cell
/// useful for tests since, unlike RandomAgent, it's deterministic
#[derive(Default)]
pub struct FirstMoveAgent {
    board: Board,
}

impl FirstMoveAgent {
    pub fn new() -> Self {
        FirstMoveAgent { board: Board::new() }
    }
}

impl Agent for FirstMoveAgent {
    fn inform_move(&mut self, move_: Move, player: Player) -> Result<(), EngineError> {
        self.board.apply_move(move_, player)
    }

    fn get_move(&mut self) -> Result<Move, EngineError> {
        self.board.empty_cells().next().ok_or(EngineError::NoMovesAvailable)
    }
}
