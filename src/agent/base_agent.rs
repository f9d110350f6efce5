use crate::tictactoe::{EngineError, Move, Player};

/// A player that keeps its own copy of the board in sync through `inform_move`.
pub trait Agent {
    fn inform_move(&mut self, move_: Move, player: Player) -> Result<(), EngineError>;
    fn get_move(&mut self) -> Result<Move, EngineError>;
}
