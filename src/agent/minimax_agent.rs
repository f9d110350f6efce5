use crate::agent::Agent;
use crate::minimax::SearchEngine;
use crate::tictactoe::{Board, EngineError, Move, Player};

/// Plays the minimax-optimal move for `player`.
pub struct MinimaxAgent {
    board: Board,
    player: Player,

    engine: SearchEngine,
}

impl MinimaxAgent {
    pub fn new(player: Player, alpha_beta_prune: bool) -> Self {
        MinimaxAgent {
            board: Board::new(),
            player,
            engine: SearchEngine::new(alpha_beta_prune),
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }
}

impl Agent for MinimaxAgent {
    fn inform_move(&mut self, move_: Move, player: Player) -> Result<(), EngineError> {
        self.board.apply_move(move_, player)
    }

    fn get_move(&mut self) -> Result<Move, EngineError> {
        self.engine
            .find_best_move(&mut self.board, self.player)
            .ok_or(EngineError::NoMovesAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimax_agent_opens_in_corner() {
        let mut agent = MinimaxAgent::new(Player::Machine, true);

        assert_eq!(agent.player(), Player::Machine);
        assert_eq!(agent.get_move().unwrap(), Move::new(0, 0).unwrap());
    }

    #[test]
    fn test_minimax_agent_tracks_moves() {
        let mut agent = MinimaxAgent::new(Player::Machine, false);

        agent.inform_move(Move::new(1, 0).unwrap(), Player::Human).unwrap();
        agent.inform_move(Move::new(0, 0).unwrap(), Player::Machine).unwrap();
        agent.inform_move(Move::new(1, 1).unwrap(), Player::Human).unwrap();

        // has to block the middle row
        assert_eq!(agent.get_move().unwrap(), Move::new(1, 2).unwrap());
        assert_eq!(
            agent.inform_move(Move::new(1, 1).unwrap(), Player::Machine),
            Err(EngineError::CellOccupied { row: 1, col: 1 })
        );
    }
}
