use derive_more::{Display, Error};

use super::Player;

/// Everything the engine can refuse to do. All of these are caller-side precondition
/// violations; a failed operation never leaves a board or session modified.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    #[display("coordinate ({row}, {col}) is outside the 3x3 board")]
    OutOfRange { row: usize, col: usize },

    #[display("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[display("no empty cells left to move to")]
    NoMovesAvailable,

    #[display("the game is already over")]
    GameOver,

    #[display("it is {expected}'s turn")]
    NotYourTurn { expected: Player },

    #[display("could not parse {input:?}")]
    InvalidNotation { input: String },
}
