use log::debug;

use crate::board::Board;
use crate::core::{Outcome, Player, Position, Strategy};
use crate::error::SearchError;

/// Value of a won position for player one. Player two's wins are the negation.
pub const WIN_SCORE: i32 = 10;

/// Performance counters for the exhaustive searches. Passed down the recursion by reference.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SearchStats {
    /// Number of times the search function was entered
    pub nodes: u64,
    /// Number of times the remaining siblings were cut off. Always 0 for plain minimax.
    pub prunes: u64,
}

impl std::ops::AddAssign for SearchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.prunes += rhs.prunes;
    }
}

/// Score of a decided board `depth` plies below the root, or `None` if the game goes on.
///
/// It is good to win. It is bad to lose.
/// If we can win, we want to win fast,
/// If we must lose, we want to lose slowly
pub(crate) fn terminal_value(board: &Board, depth: i32) -> Option<i32> {
    match board.check_outcome() {
        Outcome::Won(Player::One) => Some(WIN_SCORE - depth),
        Outcome::Won(Player::Two) => Some(depth - WIN_SCORE),
        Outcome::Draw => Some(0),
        Outcome::InProgress => None,
    }
}

/// Compute the best move and the game-theoretic value of `board` by exhaustive minimax.
/// Player one maximizes, player two minimizes. On equal scores the first move in
/// row-major order is kept. Returns no move if the board is already decided.
pub fn minimax(board: &Board, depth: i32, stats: &mut SearchStats) -> (Option<Position>, i32) {
    stats.nodes += 1;
    if let Some(value) = terminal_value(board, depth) {
        return (None, value);
    }
    let player = board.next_player();
    let mut best_move = None;
    match player {
        Player::One => {
            let mut best = i32::MIN;
            for pos in board.legal_moves() {
                let child = board.apply_move(pos, player);
                let (_, score) = minimax(&child, depth + 1, stats);
                if score > best {
                    best = score;
                    best_move = Some(pos);
                }
            }
            (best_move, best)
        }
        Player::Two => {
            let mut best = i32::MAX;
            for pos in board.legal_moves() {
                let child = board.apply_move(pos, player);
                let (_, score) = minimax(&child, depth + 1, stats);
                if score < best {
                    best = score;
                    best_move = Some(pos);
                }
            }
            (best_move, best)
        }
    }
}

pub struct MinMaxAi {
    name: String,
    /// A performance counter, summed over every move this AI has made
    stats: SearchStats,
}

impl MinMaxAi {
    pub fn new(mark: Player) -> Self {
        Self {
            name: format!("minimax {mark}"),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

impl Strategy for MinMaxAi {
    fn choose(&mut self, board: &Board) -> Result<Position, SearchError> {
        let mut stats = SearchStats::default();
        let (pos, value) = minimax(board, 0, &mut stats);
        debug!(
            "{} picked {:?} with value {} after visiting {} nodes",
            self.name, pos, value, stats.nodes
        );
        self.stats += stats;
        pos.ok_or(SearchError::InvalidState(board.check_outcome()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for MinMaxAi {
    fn drop(&mut self) {
        debug!("{} visited {} nodes in total", self.name, self.stats.nodes);
    }
}
