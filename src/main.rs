use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictactoe_engine::agent::{FirstMoveAgent, MinimaxAgent, RandomAgent};
use tictactoe_engine::config::{Cli, Command, Opponent};
use tictactoe_engine::minimax::SearchEngine;
use tictactoe_engine::tournament::{run_tournament, TournamentConfig, TournamentResult};
use tictactoe_engine::{Board, GameSession, GameState, Move, Player};

fn prompt(line: &mut String, text: &str) -> Result<bool> {
    print!("{}", text);
    io::stdout().flush()?;

    line.clear();
    let read = io::stdin().lock().read_line(line).context("failed to read from stdin")?;

    Ok(read > 0)
}

fn play(machine_first: bool, alpha_beta_prune: bool) -> Result<()> {
    let first = if machine_first { Player::Machine } else { Player::Human };
    let mut session = GameSession::new(first, alpha_beta_prune)?;
    let mut line = String::new();

    println!("You are {}, the machine is {}.", Player::Human.symbol(), Player::Machine.symbol());
    println!("Enter moves as \"row,col\" with rows and columns numbered 0 to 2.\n");

    if let Some(opening) = session.opening() {
        println!("Machine opens at {}", opening);
    }

    loop {
        println!("{}\n", session.board());

        if session.state().is_terminal() {
            println!("{}", session.state());

            if !prompt(&mut line, "Play again? [y/N] ")? || !line.trim().eq_ignore_ascii_case("y") {
                return Ok(());
            }

            session.restart()?;
            if let Some(opening) = session.opening() {
                println!("Machine opens at {}", opening);
            }
            continue;
        }

        if !prompt(&mut line, "Your move: ")? {
            return Ok(());
        }

        let human_move: Move = match line.parse() {
            Ok(move_) => move_,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match session.play(human_move.row(), human_move.col()) {
            Ok(report) => {
                if let Some(machine) = report.machine {
                    println!("Machine plays {}", machine);
                }
            }
            Err(err) => println!("{}", err),
        }
    }
}

fn best_move(position: &str, human: bool) -> Result<()> {
    let mut board: Board = position.parse()?;
    let player = if human { Player::Human } else { Player::Machine };

    if board.state() != GameState::InProgress {
        println!("{}\n\n{}", board, board.state());
        return Ok(());
    }

    let mut engine = SearchEngine::default();
    let best = engine.find_best_move(&mut board, player);
    let score = engine.evaluate(&mut board, player);

    println!("{}\n", board);
    match best {
        Some(move_) => println!("Best move for {}: {} (score {})", player, move_, score),
        None => println!("No move available"),
    }

    Ok(())
}

fn print_result(result: &TournamentResult) {
    println!("Machine wins: {}", result.machine_wins);
    println!("Draws:        {}", result.draws);
    println!("Human wins:   {}", result.human_wins);

    if result.errors > 0 {
        println!("Aborted:      {}", result.errors);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Play {
            machine_first,
            no_prune,
        } => play(machine_first, !no_prune),
        Command::BestMove { position, human } => best_move(&position, human),
        Command::Tournament {
            games,
            workers,
            opponent,
            machine_first,
            random_opening_plies,
            seed,
        } => {
            let config = TournamentConfig {
                num_games: games,
                num_workers: workers.unwrap_or_else(num_cpus::get),
                first: machine_first.then_some(Player::Machine),
                random_opening_plies,
                seed,
            };

            info!(?config, ?opponent, "starting tournament");

            let machine = || MinimaxAgent::new(Player::Machine, true);
            let result = match opponent {
                Opponent::Random => run_tournament(&machine, &RandomAgent::new, config),
                Opponent::First => run_tournament(&machine, &FirstMoveAgent::new, config),
                Opponent::Minimax => run_tournament(&machine, &|| MinimaxAgent::new(Player::Human, true), config),
            };

            print_result(&result);
            Ok(())
        }
    }
}
