mod search;

pub use search::{best_move, SearchEngine, SearchStats, Score, DRAW, HUMAN_WIN, MACHINE_WIN};
