//! Integration test of the MCTS AI with TTT. The games are seeded, but the assertions
//! leave room for an occasional weak move.
use rand::{rngs::StdRng, SeedableRng};
use ttt_search::{
    board::Board,
    core::{Outcome, Player, Position, Strategy},
    error::SearchError,
    game::run_game,
    player::{
        alpha_beta::{alphabeta, ALPHA_INIT, BETA_INIT},
        mcts::{run_mcts, DEFAULT_EXPLORATION},
        ABAi, MctsAi, MctsConfig, SearchStats,
    },
};

fn config(iterations: usize) -> MctsConfig {
    MctsConfig {
        iterations,
        exploration: DEFAULT_EXPLORATION,
    }
}

#[test]
fn opening_move_is_never_losing() {
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let decision = run_mcts(&Board::new(), 1000, &mut rng).unwrap();
        assert_eq!(decision.player, Player::One);
        assert_eq!(decision.board.n_moves_made(), 1);
        let mut stats = SearchStats::default();
        let (_, value) = alphabeta(&decision.board, 0, ALPHA_INIT, BETA_INIT, &mut stats);
        assert_eq!(value, 0);
    }
}

#[test]
fn can_block_winning_move() {
    let b: Board = "xx  o    ".parse().unwrap();
    let mut ai = MctsAi::new(Player::Two, config(5000), 5);
    assert_eq!(ai.choose(&b).unwrap(), Position::new(0, 2));
}

#[test]
fn refuses_to_play_a_finished_game() {
    let b: Board = "xoxoxoo x".parse().unwrap();
    let mut ai = MctsAi::new(Player::Two, config(100), 5);
    assert!(matches!(
        ai.choose(&b),
        Err(SearchError::InvalidState(Outcome::Won(Player::One)))
    ));
}

#[test]
fn holds_its_own_against_perfect_play() {
    let trials = 5;
    let mut losses = 0;
    for seed in 0..trials {
        let mut mcts = MctsAi::new(Player::One, config(3000), seed);
        let mut ab = ABAi::new(Player::Two);
        let record = run_game(&mut mcts, &mut ab, Board::new()).unwrap();
        if record.outcome == Outcome::Won(Player::Two) {
            losses += 1;
        }

        let mut ab = ABAi::new(Player::One);
        let mut mcts = MctsAi::new(Player::Two, config(3000), seed);
        let record = run_game(&mut ab, &mut mcts, Board::new()).unwrap();
        if record.outcome == Outcome::Won(Player::One) {
            losses += 1;
        }
    }
    assert!(
        losses <= 2,
        "MCTS lost {losses} out of {} games against alpha-beta",
        2 * trials
    );
}
