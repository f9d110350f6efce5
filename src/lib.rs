pub mod agent;
pub mod config;
pub mod minimax;
pub mod session;
pub mod tictactoe;
pub mod tournament;
pub mod util;

pub use minimax::{best_move, SearchEngine};
pub use session::{GameSession, TurnReport};
pub use tictactoe::{Board, Cell, EngineError, GameState, Move, Player};
