//! Let the AIs play each other, or compare how much work the exhaustive searches do.
//! Everything is reported on stdout; nothing is written to disk.

use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use rand::{rngs::StdRng, Rng as _, SeedableRng as _};
use serde::Serialize;
use ttt_search::{
    board::Board,
    core::{Outcome, Player, Position, StrategyKind},
    game::run_game,
    logging::init_logging,
    player::{
        alpha_beta::{alphabeta, ALPHA_INIT, BETA_INIT},
        make_strategy,
        mcts::DEFAULT_EXPLORATION,
        min_max::minimax,
        MctsConfig, SearchStats,
    },
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// More output. Repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a series of games between two AIs
    Play {
        /// what kind of player is player one (X)?
        #[arg(short = 'p', long)]
        player1: StrategyKind,
        /// what kind of player is player two (O)?
        #[arg(short = 'q', long)]
        player2: StrategyKind,

        #[arg(short, long, default_value_t = 10)]
        games: usize,

        /// Number of MCTS iterations per move
        #[arg(long, default_value_t = 2000)]
        iterations: usize,

        /// The exploration constant for the MCTS algorithm
        #[arg(long, default_value_t = DEFAULT_EXPLORATION)]
        c: f64,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Run minimax and alpha-beta on one board and report nodes visited and prunes
    Compare {
        /// Nine cells row-major, x/o for marks and . for empty
        #[arg(short, long, default_value = ".........")]
        board: Board,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    /// One row per game
    Csv,
}

#[derive(Serialize)]
struct GameRow {
    game: usize,
    player1: StrategyKind,
    player2: StrategyKind,
    outcome: String,
    moves: usize,
}

#[derive(Serialize)]
struct SeriesReport {
    started_at: chrono::DateTime<chrono::Local>,
    player1: StrategyKind,
    player2: StrategyKind,
    seed: u64,
    games: usize,
    player_one_wins: usize,
    player_two_wins: usize,
    draws: usize,
}

#[derive(Serialize)]
struct SearchSummary {
    best_move: Option<Position>,
    value: i32,
    nodes: u64,
    prunes: u64,
}

impl SearchSummary {
    fn new((best_move, value): (Option<Position>, i32), stats: SearchStats) -> Self {
        Self {
            best_move,
            value,
            nodes: stats.nodes,
            prunes: stats.prunes,
        }
    }
}

#[derive(Serialize)]
struct CompareReport {
    board: Board,
    minimax: SearchSummary,
    alphabeta: SearchSummary,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose)?;
    match args.command {
        Commands::Play {
            player1,
            player2,
            games,
            iterations,
            c,
            seed,
            format,
        } => {
            if player1 == StrategyKind::Console || player2 == StrategyKind::Console {
                bail!("the arena is for AIs only; use the tui binary to play yourself");
            }
            let config = MctsConfig {
                iterations,
                exploration: c,
            };
            play_series(player1, player2, games, config, seed, format)
        }
        Commands::Compare { board, json } => compare(board, json),
    }
}

fn play_series(
    player1: StrategyKind,
    player2: StrategyKind,
    games: usize,
    config: MctsConfig,
    seed: Option<u64>,
    format: Format,
) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(|| StdRng::from_entropy().gen());
    info!("AI seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = SeriesReport {
        started_at: chrono::Local::now(),
        player1,
        player2,
        seed,
        games,
        player_one_wins: 0,
        player_two_wins: 0,
        draws: 0,
    };
    let mut wtr = csv::Writer::from_writer(std::io::stdout());

    for game in 0..games {
        let mut p1 = make_strategy(player1, Player::One, config, rng.gen());
        let mut p2 = make_strategy(player2, Player::Two, config, rng.gen());
        let record = run_game(p1.as_mut(), p2.as_mut(), Board::new())?;
        info!("Game {} ended with {}", game, record.outcome);
        match record.outcome {
            Outcome::Won(Player::One) => report.player_one_wins += 1,
            Outcome::Won(Player::Two) => report.player_two_wins += 1,
            _ => report.draws += 1,
        }
        if let Format::Csv = format {
            wtr.serialize(GameRow {
                game,
                player1,
                player2,
                outcome: record.outcome.to_string(),
                moves: record.moves.len(),
            })?;
        }
    }
    wtr.flush()?;

    match format {
        Format::Table => {
            println!("{:?} (X) vs {:?} (O), {} games", player1, player2, games);
            println!("X wins: {}", report.player_one_wins);
            println!("O wins: {}", report.player_two_wins);
            println!("Draws:  {}", report.draws);
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Csv => {}
    }
    Ok(())
}

fn compare(board: Board, json: bool) -> anyhow::Result<()> {
    let mut mm_stats = SearchStats::default();
    let mm = minimax(&board, 0, &mut mm_stats);
    let mut ab_stats = SearchStats::default();
    let ab = alphabeta(&board, 0, ALPHA_INIT, BETA_INIT, &mut ab_stats);
    let report = CompareReport {
        board,
        minimax: SearchSummary::new(mm, mm_stats),
        alphabeta: SearchSummary::new(ab, ab_stats),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print!("{}", board);
    let show = |m: Option<Position>| m.map_or("none".to_string(), |p| p.to_string());
    println!(
        "Minimax:   move={}, score={}, nodes={}",
        show(report.minimax.best_move),
        report.minimax.value,
        report.minimax.nodes
    );
    println!(
        "AlphaBeta: move={}, score={}, nodes={}, prunes={}",
        show(report.alphabeta.best_move),
        report.alphabeta.value,
        report.alphabeta.nodes,
        report.alphabeta.prunes
    );
    Ok(())
}
