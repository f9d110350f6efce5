use std::time::{Duration, Instant};

use tracing::{debug, instrument};

use crate::tictactoe::{Board, Cell, EngineError, Move, Player, SIZE};

/// Scores are always from the Machine's (maximizer's) point of view.
pub type Score = i32;

pub const MACHINE_WIN: Score = 10;
pub const HUMAN_WIN: Score = -10;
pub const DRAW: Score = 0;

// sentinels below/above every real score
const MIN_SCORE: Score = Score::MIN;
const MAX_SCORE: Score = Score::MAX;

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub max_depth: u32,
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn nps(&self) -> f64 {
        self.nodes_visited as f64 / self.elapsed.as_secs_f64().max(f64::EPSILON)
    }
}

/*====================================================================================================================*/

// every cell in row-major order; callers skip the occupied ones
fn candidate_moves() -> impl Iterator<Item = Move> {
    (0..SIZE * SIZE).map(Move::from_index)
}

/// Base cases in priority order: Machine line, Human line, full board.
fn terminal_score(board: &Board) -> Option<Score> {
    if board.has_won(Player::Machine) {
        Some(MACHINE_WIN)
    } else if board.has_won(Player::Human) {
        Some(HUMAN_WIN)
    } else if board.is_full() {
        Some(DRAW)
    } else {
        None
    }
}

/// Exhaustive minimax over a board it explores in place. Every hypothetical mark is
/// cleared again before a call returns, so the caller's board looks untouched afterwards.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    alpha_beta_prune: bool,

    nodes_visited: u64,
    max_depth: u32,

    last_stats: SearchStats,
}

impl SearchEngine {
    pub fn new(alpha_beta_prune: bool) -> Self {
        SearchEngine {
            alpha_beta_prune,
            nodes_visited: 0,
            max_depth: 0,
            last_stats: SearchStats::default(),
        }
    }

    pub fn alpha_beta_prune(&self) -> bool {
        self.alpha_beta_prune
    }

    /// Statistics of the most recent `find_best_move` or `evaluate` call.
    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    fn reset_stats(&mut self) -> Instant {
        self.nodes_visited = 0;
        self.max_depth = 0;

        Instant::now()
    }

    fn record_stats(&mut self, start_t: Instant) {
        self.last_stats = SearchStats {
            nodes_visited: self.nodes_visited,
            max_depth: self.max_depth,
            elapsed: start_t.elapsed(),
        };
    }

    /// `depth` is only recorded in the statistics; it never changes a score, so a win in
    /// five plies is worth as much as a win in one.
    pub fn minimax(&mut self, board: &mut Board, depth: u32, is_maximizing: bool) -> Score {
        self.nodes_visited += 1;
        self.max_depth = self.max_depth.max(depth);

        if let Some(score) = terminal_score(board) {
            return score;
        }

        if is_maximizing {
            let mut best = MIN_SCORE;

            for move_ in candidate_moves() {
                if board.cell(move_) != Cell::Empty {
                    continue;
                }

                board.mark(move_, Player::Machine);
                best = best.max(self.minimax(board, depth + 1, false));
                board.clear(move_);
            }

            best
        } else {
            let mut best = MAX_SCORE;

            for move_ in candidate_moves() {
                if board.cell(move_) != Cell::Empty {
                    continue;
                }

                board.mark(move_, Player::Human);
                best = best.min(self.minimax(board, depth + 1, true));
                board.clear(move_);
            }

            best
        }
    }

    // fail-soft alpha-beta; exact whenever the true score lies strictly inside (alpha, beta)
    fn alpha_beta(&mut self, board: &mut Board, depth: u32, is_maximizing: bool, alpha: Score, beta: Score) -> Score {
        self.nodes_visited += 1;
        self.max_depth = self.max_depth.max(depth);

        if let Some(score) = terminal_score(board) {
            return score;
        }

        let mut alpha = alpha;
        let mut beta = beta;

        if is_maximizing {
            let mut best = MIN_SCORE;

            for move_ in candidate_moves() {
                if board.cell(move_) != Cell::Empty {
                    continue;
                }

                board.mark(move_, Player::Machine);
                let value = self.alpha_beta(board, depth + 1, false, alpha, beta);
                board.clear(move_);

                best = best.max(value);
                alpha = alpha.max(best);

                if alpha >= beta {
                    // beta cutoff
                    break;
                }
            }

            best
        } else {
            let mut best = MAX_SCORE;

            for move_ in candidate_moves() {
                if board.cell(move_) != Cell::Empty {
                    continue;
                }

                board.mark(move_, Player::Human);
                let value = self.alpha_beta(board, depth + 1, true, alpha, beta);
                board.clear(move_);

                best = best.min(value);
                beta = beta.min(best);

                if beta <= alpha {
                    // alpha cutoff
                    break;
                }
            }

            best
        }
    }

    /// Score of the position after `player` has just moved, with `best_value` as the
    /// score to beat at the root.
    fn score_reply(&mut self, board: &mut Board, player: Player, best_value: Score) -> Score {
        let opponent_maximizes = player == Player::Human;

        if !self.alpha_beta_prune {
            return self.minimax(board, 0, opponent_maximizes);
        }

        match player {
            Player::Machine => self.alpha_beta(board, 0, opponent_maximizes, best_value, MAX_SCORE),
            Player::Human => self.alpha_beta(board, 0, opponent_maximizes, MIN_SCORE, best_value),
        }
    }

    /// Minimax score of `board` with `to_move` about to play.
    #[instrument(level = "debug", skip(self, board), fields(position = %board.to_notation()))]
    pub fn evaluate(&mut self, board: &mut Board, to_move: Player) -> Score {
        let start_t = self.reset_stats();
        let is_maximizing = to_move == Player::Machine;

        let score = if self.alpha_beta_prune {
            self.alpha_beta(board, 0, is_maximizing, MIN_SCORE, MAX_SCORE)
        } else {
            self.minimax(board, 0, is_maximizing)
        };

        self.record_stats(start_t);

        score
    }

    /// Optimal move for `player`, or `None` if the board has no empty cell.
    ///
    /// Candidates are tried in row-major order and only a strictly better score replaces
    /// the current choice, so the first of several equally good moves wins. Machine
    /// maximizes, Human minimizes. The board is returned exactly as it was passed in.
    #[instrument(level = "debug", skip(self, board), fields(position = %board.to_notation()))]
    pub fn find_best_move(&mut self, board: &mut Board, player: Player) -> Option<Move> {
        let start_t = self.reset_stats();

        let mut best_move = None;
        let mut best_value = match player {
            Player::Machine => MIN_SCORE,
            Player::Human => MAX_SCORE,
        };

        for move_ in candidate_moves() {
            if board.cell(move_) != Cell::Empty {
                continue;
            }

            board.mark(move_, player);
            let move_value = self.score_reply(board, player, best_value);
            board.clear(move_);

            let improves = match player {
                Player::Machine => move_value > best_value,
                Player::Human => move_value < best_value,
            };

            if improves {
                best_move = Some(move_);
                best_value = move_value;
            }
        }

        self.record_stats(start_t);

        debug!(
            best_move = ?best_move,
            best_value,
            nodes = self.last_stats.nodes_visited,
            max_depth = self.last_stats.max_depth,
            elapsed = ?self.last_stats.elapsed,
            nps = format_args!("{:.2e}", self.last_stats.nps()),
            alpha_beta_prune = self.alpha_beta_prune,
            "minimax search finished"
        );

        best_move
    }

    /// Finds the best move and applies it, leaving exactly one new mark on the board.
    pub fn play_best_move(&mut self, board: &mut Board, player: Player) -> Result<Move, EngineError> {
        let best_move = self
            .find_best_move(board, player)
            .ok_or(EngineError::NoMovesAvailable)?;

        board.apply_move(best_move, player)?;

        Ok(best_move)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(true)
    }
}

/*====================================================================================================================*/

/// Runs the search on a private copy, for callers that only hold a shared board.
pub fn best_move(board: &Board, player: Player) -> Option<Move> {
    let mut board = board.clone();

    SearchEngine::default().find_best_move(&mut board, player)
}

/*====================================================================================================================*/
