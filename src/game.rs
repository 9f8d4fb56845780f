//! The turn loop. This is the only place the canonical board is mutated.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Outcome, Player, Position, Strategy};
use crate::error::SearchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Every move in the order it was played, with the player who made it
    pub moves: Vec<(Player, Position)>,
    pub board: Board,
    pub outcome: Outcome,
}

/// Let `p1` (player one) and `p2` (player two) take turns on `board` until the game is decided.
/// Whose turn it is is read off the board, so a game can be resumed from any position.
pub fn run_game(
    p1: &mut dyn Strategy,
    p2: &mut dyn Strategy,
    board: Board,
) -> Result<GameRecord, SearchError> {
    run_game_with(p1, p2, board, |_, _, _| {})
}

/// Like [`run_game`], calling `on_move` with the player, its move and the new board after
/// every move.
pub fn run_game_with<F>(
    p1: &mut dyn Strategy,
    p2: &mut dyn Strategy,
    mut board: Board,
    mut on_move: F,
) -> Result<GameRecord, SearchError>
where
    F: FnMut(Player, Position, &Board),
{
    let mut moves = Vec::new();
    while !board.is_over() {
        let current_player = board.next_player();
        let action = match current_player {
            Player::One => p1.choose(&board)?,
            Player::Two => p2.choose(&board)?,
        };
        debug!("Player {} played {}", current_player, action);
        board.place_mark(action, current_player);
        debug!("\n{}", board);
        moves.push((current_player, action));
        on_move(current_player, action, &board);
    }
    let outcome = board.check_outcome();
    debug!("Game ended with {}", outcome);
    Ok(GameRecord {
        moves,
        board,
        outcome,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    /// Plays its moves from a fixed script
    struct Scripted(Vec<Position>);

    impl Strategy for Scripted {
        fn choose(&mut self, _board: &Board) -> Result<Position, SearchError> {
            Ok(self.0.remove(0))
        }
        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn stops_at_the_first_win() {
        let mut x = Scripted(vec![(0, 0).into(), (0, 1).into(), (0, 2).into()]);
        let mut o = Scripted(vec![(1, 0).into(), (1, 1).into(), (1, 2).into()]);
        let record = run_game(&mut x, &mut o, Board::new()).unwrap();
        assert_eq!(record.outcome, Outcome::Won(Player::One));
        assert_eq!(record.moves.len(), 5);
        assert_eq!(record.moves[1], (Player::Two, Position::new(1, 0)));
    }

    #[test]
    fn resumes_from_a_position() {
        let board: Board = "xx oo    ".parse().unwrap();
        let mut x = Scripted(vec![(2, 2).into()]);
        let mut o = Scripted(vec![(1, 2).into()]);
        let mut seen = 0;
        let record = run_game_with(&mut x, &mut o, board, |_, _, _| seen += 1).unwrap();
        assert_eq!(record.outcome, Outcome::Won(Player::Two));
        assert_eq!(seen, 2);
    }

    #[test]
    fn decided_board_plays_no_moves() {
        let board: Board = "xxxoo    ".parse().unwrap();
        let mut x = Scripted(vec![]);
        let mut o = Scripted(vec![]);
        let record = run_game(&mut x, &mut o, board).unwrap();
        assert!(record.moves.is_empty());
        assert_eq!(record.outcome, Outcome::Won(Player::One));
    }
}
