use clap::{Parser, Subcommand, ValueEnum};

/// Unbeatable tic-tac-toe: exhaustive minimax search over the 3x3 game tree
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(version)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the machine on the terminal
    Play {
        /// Let the machine open the game
        #[arg(long)]
        machine_first: bool,

        /// Search the full tree without alpha-beta pruning
        #[arg(long)]
        no_prune: bool,
    },

    /// Print the best move for a position, e.g. "X.O/.O./..X"
    BestMove {
        /// Board in row notation: X machine, O human, '.' empty
        position: String,

        /// Search for the human (minimizing) side instead of the machine
        #[arg(long)]
        human: bool,
    },

    /// Play many games between two agents in parallel
    Tournament {
        /// Number of games to play
        #[arg(short, long, default_value = "1000")]
        games: usize,

        /// Worker threads; defaults to the number of CPUs
        #[arg(short, long)]
        workers: Option<usize>,

        /// Agent playing the human side
        #[arg(long, value_enum, default_value = "random")]
        opponent: Opponent,

        /// Let the machine open every game instead of alternating
        #[arg(long)]
        machine_first: bool,

        /// Random moves before the agents take over
        #[arg(long, default_value = "0")]
        random_opening_plies: usize,

        /// Seed for the random openings
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Random,
    First,
    Minimax,
}
