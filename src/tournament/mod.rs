use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use threadpool::ThreadPool;
use tracing::{debug, info, instrument, warn};

use crate::agent::Agent;
use crate::tictactoe::{Board, EngineError, GameState, Player};
use crate::util::advance_random;

/// Asks `playing_agent` for a move, applies it and informs both agents. Returns the player
/// to move next.
fn single_ply(
    board: &mut Board,
    playing_agent: &mut impl Agent,
    opponent_agent: &mut impl Agent,
    player: Player,
) -> Result<Player, EngineError> {
    let player_move = playing_agent.get_move()?;

    // an illegal move is refused here before either agent's copy is touched
    board.apply_move(player_move, player)?;

    debug!(%player, %player_move, "ply");

    playing_agent.inform_move(player_move, player)?;
    opponent_agent.inform_move(player_move, player)?;

    Ok(!player)
}

fn game_loop(
    board: Board,
    first: Player,
    machine_agent: &mut impl Agent,
    human_agent: &mut impl Agent,
) -> Result<Board, EngineError> {
    use Player::{Human, Machine};

    let mut board = board;
    let mut current_player = board.player_to_move(first);

    while !board.state().is_terminal() {
        current_player = match current_player {
            Machine => single_ply(&mut board, machine_agent, human_agent, Machine)?,
            Human => single_ply(&mut board, human_agent, machine_agent, Human)?,
        };
    }

    Ok(board)
}

/// Plays one game from an empty board to its end.
pub fn play_game(
    machine_agent: &mut impl Agent,
    human_agent: &mut impl Agent,
    first: Player,
) -> Result<GameState, EngineError> {
    let board = game_loop(Board::new(), first, machine_agent, human_agent)?;

    Ok(board.state())
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentConfig {
    pub num_games: usize,
    pub num_workers: usize,

    /// `None` alternates the opening player from game to game.
    pub first: Option<Player>,

    /// Random moves played before the agents take over, for variety between deterministic agents.
    pub random_opening_plies: usize,
    pub seed: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            num_games: 100,
            num_workers: num_cpus::get(),
            first: None,
            random_opening_plies: 0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TournamentResult {
    pub machine_wins: u64,
    pub draws: u64,
    pub human_wins: u64,
    /// games aborted because an agent produced an illegal move
    pub errors: u64,
}

impl TournamentResult {
    pub fn games(&self) -> u64 {
        self.machine_wins + self.draws + self.human_wins + self.errors
    }
}

fn play_tournament_game(
    config: &TournamentConfig,
    game_idx: usize,
    machine_agent: &mut impl Agent,
    human_agent: &mut impl Agent,
) -> Result<GameState, EngineError> {
    let first = config.first.unwrap_or(if game_idx % 2 == 0 {
        Player::Machine
    } else {
        Player::Human
    });

    let mut board = Board::new();
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(game_idx as u64));
    let (opening, _) = advance_random(&mut board, first, config.random_opening_plies, &mut rng);

    let mut player = first;
    for move_ in opening {
        machine_agent.inform_move(move_, player)?;
        human_agent.inform_move(move_, player)?;
        player = !player;
    }

    Ok(game_loop(board, first, machine_agent, human_agent)?.state())
}

/// Plays `config.num_games` games on a thread pool, building fresh agents for every game.
#[instrument(skip(machine_agent_builder, human_agent_builder))]
pub fn run_tournament<MachineAgent, HumanAgent>(
    machine_agent_builder: &dyn Fn() -> MachineAgent,
    human_agent_builder: &dyn Fn() -> HumanAgent,
    config: TournamentConfig,
) -> TournamentResult
where
    MachineAgent: Agent + Send + 'static,
    HumanAgent: Agent + Send + 'static,
{
    let machine_wins = Arc::new(AtomicU64::new(0));
    let human_wins = Arc::new(AtomicU64::new(0));
    let draws = Arc::new(AtomicU64::new(0));
    let errors = Arc::new(AtomicU64::new(0));

    let pool = ThreadPool::new(config.num_workers.max(1));

    for game_idx in 0..config.num_games {
        let mut machine_agent = machine_agent_builder();
        let mut human_agent = human_agent_builder();

        let machine_wins = Arc::clone(&machine_wins);
        let human_wins = Arc::clone(&human_wins);
        let draws = Arc::clone(&draws);
        let errors = Arc::clone(&errors);

        pool.execute(move || {
            match play_tournament_game(&config, game_idx, &mut machine_agent, &mut human_agent) {
                Ok(GameState::Won(Player::Machine)) => machine_wins.fetch_add(1, Ordering::Release),
                Ok(GameState::Won(Player::Human)) => human_wins.fetch_add(1, Ordering::Release),
                Ok(_) => draws.fetch_add(1, Ordering::Release),
                Err(err) => {
                    warn!(game_idx, %err, "game aborted");
                    errors.fetch_add(1, Ordering::Release)
                }
            };
        });
    }

    pool.join();

    let result = TournamentResult {
        machine_wins: machine_wins.load(Ordering::Acquire),
        draws: draws.load(Ordering::Acquire),
        human_wins: human_wins.load(Ordering::Acquire),
        errors: errors.load(Ordering::Acquire),
    };

    info!(
        machine_wins = result.machine_wins,
        draws = result.draws,
        human_wins = result.human_wins,
        errors = result.errors,
        "tournament finished"
    );

    result
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::agent::{FirstMoveAgent, MinimaxAgent, RandomAgent};
    use crate::tictactoe::Move;

    // always tries the top-left cell, legal or not
    struct StubbornAgent;

    impl Agent for StubbornAgent {
        fn inform_move(&mut self, _move: Move, _player: Player) -> Result<(), EngineError> {
            Ok(())
        }

        fn get_move(&mut self) -> Result<Move, EngineError> {
            Move::new(0, 0)
        }
    }

    #[test]
    fn test_minimax_draws_against_itself() {
        for first in [Player::Machine, Player::Human] {
            let mut machine = MinimaxAgent::new(Player::Machine, true);
            let mut human = MinimaxAgent::new(Player::Human, true);

            assert_eq!(play_game(&mut machine, &mut human, first).unwrap(), GameState::Draw);
        }
    }

    #[test]
    fn test_minimax_beats_first_move_agent() {
        let mut machine = MinimaxAgent::new(Player::Machine, true);
        let mut human = FirstMoveAgent::new();

        assert_eq!(
            play_game(&mut machine, &mut human, Player::Human).unwrap(),
            GameState::Won(Player::Machine)
        );
    }

    #[test]
    fn test_illegal_move_aborts_game() {
        let mut machine = StubbornAgent;
        let mut human = StubbornAgent;

        assert_eq!(
            play_game(&mut machine, &mut human, Player::Machine),
            Err(EngineError::CellOccupied { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_minimax_never_loses_to_random() {
        let config = TournamentConfig {
            num_games: 200,
            num_workers: 4,
            random_opening_plies: 2,
            seed: 11,
            ..TournamentConfig::default()
        };

        // a different seed for every random agent built
        let next_seed = AtomicU64::new(0);

        let result = run_tournament(
            &|| MinimaxAgent::new(Player::Machine, true),
            &|| RandomAgent::with_seed(next_seed.fetch_add(1, Ordering::Relaxed)),
            config,
        );

        assert_eq!(next_seed.load(Ordering::Relaxed), 200);
        assert_eq!(result.games(), 200);
        assert_eq!(result.human_wins, 0);
        assert_eq!(result.errors, 0);
        assert!(result.machine_wins > 0);
    }

    #[test]
    fn test_random_seeds_give_different_games() {
        let mut final_boards = HashSet::new();

        for seed in 0..100 {
            let first = if seed % 2 == 0 { Player::Machine } else { Player::Human };
            let mut machine = MinimaxAgent::new(Player::Machine, true);
            let mut human = RandomAgent::with_seed(seed);

            let board = game_loop(Board::new(), first, &mut machine, &mut human).unwrap();

            assert_ne!(board.state(), GameState::Won(Player::Human), "lost with seed {}", seed);
            final_boards.insert(board);
        }

        assert!(final_boards.len() > 10, "only {} distinct games", final_boards.len());
    }

    #[test]
    fn test_random_openings_keep_agents_in_sync() {
        let config = TournamentConfig {
            num_games: 40,
            num_workers: 2,
            random_opening_plies: 3,
            seed: 99,
            ..TournamentConfig::default()
        };

        let result = run_tournament(
            &|| MinimaxAgent::new(Player::Machine, true),
            &|| MinimaxAgent::new(Player::Human, true),
            config,
        );

        assert_eq!(result.games(), 40);
        assert_eq!(result.errors, 0);
    }
}
