mod board;
mod error;
mod notation;

pub use board::{Board, Cell, GameState, Move, Player, SIZE};
pub use error::EngineError;
