pub mod alpha_beta;
pub mod console;
pub mod mcts;
pub mod min_max;

pub use alpha_beta::ABAi;
pub use console::ConsolePlayer;
pub use mcts::{MctsAi, MctsConfig};
pub use min_max::{MinMaxAi, SearchStats};

use crate::core::{Player, Strategy, StrategyKind};

/// Build the strategy of the given kind to play `mark`. `seed` only matters for MCTS.
pub fn make_strategy(
    kind: StrategyKind,
    mark: Player,
    config: MctsConfig,
    seed: u64,
) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Console => Box::new(ConsolePlayer::new(mark)),
        StrategyKind::Minimax => Box::new(MinMaxAi::new(mark)),
        StrategyKind::AlphaBeta => Box::new(ABAi::new(mark)),
        StrategyKind::Mcts => Box::new(MctsAi::new(mark, config, seed)),
    }
}
