use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::agent::Agent;
use crate::tictactoe::{Board, EngineError, Move, Player};

pub struct RandomAgent {
    board: Board,

    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            board: Board::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            board: Board::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn inform_move(&mut self, move_: Move, player: Player) -> Result<(), EngineError> {
        self.board.apply_move(move_, player)
    }

    fn get_move(&mut self) -> Result<Move, EngineError> {
        self.board
            .empty_cells()
            .choose(&mut self.rng)
            .ok_or(EngineError::NoMovesAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Cell;

    #[test]
    fn test_random_agent_picks_empty_cell() {
        let mut agent = RandomAgent::with_seed(7);
        let mut board = Board::new();

        for i in 0..9 {
            let player = if i % 2 == 0 { Player::Human } else { Player::Machine };
            let move_ = agent.get_move().unwrap();

            assert_eq!(board.cell(move_), Cell::Empty);

            board.apply_move(move_, player).unwrap();
            agent.inform_move(move_, player).unwrap();
        }

        assert_eq!(agent.get_move(), Err(EngineError::NoMovesAvailable));
    }

    #[test]
    fn test_random_agent_seed_is_reproducible() {
        let mut a = RandomAgent::with_seed(42);
        let mut b = RandomAgent::with_seed(42);

        assert_eq!(a.get_move().unwrap(), b.get_move().unwrap());
    }
}
