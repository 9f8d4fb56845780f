use clap::Parser;
use log::info;
use rand::{rngs::StdRng, Rng as _, SeedableRng as _};
use ttt_search::{
    board::Board,
    core::{Outcome, Player, StrategyKind},
    error::SearchError,
    game::run_game_with,
    logging::init_logging,
    player::{make_strategy, mcts::DEFAULT_EXPLORATION, MctsConfig},
};

/// A Tic-Tac-Toe game for the command line, with a cool AI integrated!
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Player 1 (X) type
    #[arg(long, default_value = "console")]
    p1: StrategyKind,

    /// Player 2 (O) type
    #[arg(long, default_value = "mcts")]
    p2: StrategyKind,

    /// Number of MCTS iterations per move
    /// Only used for MCTS ai, if used
    #[arg(long, default_value_t = 1000)]
    iterations: usize,

    /// The exploration constant for the MCTS algorithm
    #[arg(long, default_value_t = DEFAULT_EXPLORATION)]
    c: f64,

    /// The seed for the random number generator (when used)
    #[arg(long)]
    seed: Option<u64>,

    /// More output. Repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;
    let seed = args.seed.unwrap_or_else(|| StdRng::from_entropy().gen());
    info!("AI seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let config = MctsConfig {
        iterations: args.iterations,
        exploration: args.c,
    };
    let mut p1 = make_strategy(args.p1, Player::One, config, rng.gen());
    let mut p2 = make_strategy(args.p2, Player::Two, config, rng.gen());
    info!("{} vs {}", p1.name(), p2.name());

    let record = match run_game_with(p1.as_mut(), p2.as_mut(), Board::new(), |player, pos, _| {
        println!("Player {player} placed a mark at {pos}")
    }) {
        Ok(record) => record,
        Err(SearchError::Aborted) => {
            println!("Bye!");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print!("{}", record.board);
    match record.outcome {
        Outcome::Won(p) => println!("Player {p} wins!"),
        _ => println!("The game is a draw!"),
    }
    Ok(())
}
