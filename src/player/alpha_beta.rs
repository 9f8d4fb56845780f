use log::debug;

use crate::board::Board;
use crate::core::{Player, Position, Strategy};
use crate::error::SearchError;
use crate::player::min_max::{terminal_value, SearchStats};

/// Stand-ins for -inf and +inf in the initial call
pub const ALPHA_INIT: i32 = i32::MIN;
pub const BETA_INIT: i32 = i32::MAX;

/// compute the best move and value of `board` by minimax with alpha-beta pruning.
///
/// `alpha` is the value player one is already guaranteed, `beta` the value player two is
/// already guaranteed. Once they cross, the remaining siblings cannot change the result and
/// are skipped. Gives the same move and value as [`minimax`](super::min_max::minimax) when
/// called with `ALPHA_INIT` and `BETA_INIT`, only visiting fewer nodes.
pub fn alphabeta(
    board: &Board,
    depth: i32,
    alpha: i32,
    beta: i32,
    stats: &mut SearchStats,
) -> (Option<Position>, i32) {
    stats.nodes += 1;
    if let Some(value) = terminal_value(board, depth) {
        return (None, value);
    }
    let mut alpha = alpha;
    let mut beta = beta;
    let player = board.next_player();
    let mut best_move = None;
    match player {
        Player::One => {
            // In this branch, player one looks for the move that maximizes the value
            let mut best = i32::MIN;
            for pos in board.legal_moves() {
                let child = board.apply_move(pos, player);
                let (_, score) = alphabeta(&child, depth + 1, alpha, beta, stats);
                if score > best {
                    best = score;
                    best_move = Some(pos);
                }
                alpha = alpha.max(best);
                if alpha >= beta {
                    stats.prunes += 1;
                    break;
                }
            }
            (best_move, best)
        }
        Player::Two => {
            // In this branch, player two looks for the move that minimizes the value
            let mut best = i32::MAX;
            for pos in board.legal_moves() {
                let child = board.apply_move(pos, player);
                let (_, score) = alphabeta(&child, depth + 1, alpha, beta, stats);
                if score < best {
                    best = score;
                    best_move = Some(pos);
                }
                beta = beta.min(best);
                if alpha >= beta {
                    stats.prunes += 1;
                    break;
                }
            }
            (best_move, best)
        }
    }
}

pub struct ABAi {
    name: String,
    /// A performance counter. If we prune well, the node count is small
    stats: SearchStats,
}

impl ABAi {
    pub fn new(mark: Player) -> Self {
        ABAi {
            name: format!("alphabeta {mark}"),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

impl Strategy for ABAi {
    fn choose(&mut self, board: &Board) -> Result<Position, SearchError> {
        let mut stats = SearchStats::default();
        let (pos, value) = alphabeta(board, 0, ALPHA_INIT, BETA_INIT, &mut stats);
        debug!(
            "{} picked {:?} with value {} after visiting {} nodes and {} prunes",
            self.name, pos, value, stats.nodes, stats.prunes
        );
        self.stats += stats;
        pos.ok_or(SearchError::InvalidState(board.check_outcome()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for ABAi {
    fn drop(&mut self) {
        debug!(
            "{} visited {} nodes and pruned {} times in total",
            self.name, self.stats.nodes, self.stats.prunes
        );
    }
}
