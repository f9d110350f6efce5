use rand::seq::IteratorRandom;
use rand::Rng;

use crate::tictactoe::{Board, Move, Player};

/// Plays up to `num_moves` uniformly random moves, alternating from `first`, and stops early
/// at a terminal position. Returns the moves made, in order, and the player to move next.
pub fn advance_random<R: Rng>(board: &mut Board, first: Player, num_moves: usize, rng: &mut R) -> (Vec<Move>, Player) {
    let mut current_player = first;
    let mut moves = Vec::with_capacity(num_moves);

    for _ in 0..num_moves {
        if board.state().is_terminal() {
            break;
        }

        let move_ = match board.empty_cells().choose(rng) {
            Some(move_) => move_,
            None => break,
        };

        board.mark(move_, current_player);
        moves.push(move_);
        current_player = !current_player;
    }

    (moves, current_player)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_advance_random_alternates_players() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new();

        let (moves, next) = advance_random(&mut board, Player::Human, 4, &mut rng);

        assert_eq!(moves.len(), 4);
        assert_eq!(next, Player::Human);
        assert_eq!(board.marks(Player::Human), 2);
        assert_eq!(board.marks(Player::Machine), 2);
    }

    #[test]
    fn test_advance_random_stops_at_terminal_position() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::new();

            let (moves, _) = advance_random(&mut board, Player::Machine, 20, &mut rng);

            assert!(moves.len() <= 9);
            assert!(board.state().is_terminal());
        }
    }
}
