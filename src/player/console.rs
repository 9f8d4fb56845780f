use std::io::BufRead;

use crate::board::Board;
use crate::core::{Player, Position, Strategy};
use crate::error::SearchError;

/// A human at the keyboard. Moves are typed as `row,col`, zero-based; `q` gives up.
pub struct ConsolePlayer<R> {
    pub name: String,
    input: R,
}

impl ConsolePlayer<std::io::StdinLock<'static>> {
    pub fn new(mark: Player) -> Self {
        Self::with_input(mark, std::io::stdin().lock())
    }
}

impl<R: BufRead> ConsolePlayer<R> {
    pub fn with_input(mark: Player, input: R) -> Self {
        ConsolePlayer {
            name: format!("Human ({mark})"),
            input,
        }
    }
}

impl<R: BufRead> Strategy for ConsolePlayer<R> {
    fn choose(&mut self, b: &Board) -> Result<Position, SearchError> {
        println!("Time for {} to make a move", self.name);
        print!("{}", b);
        loop {
            println!("Enter two numbers separated by a comma, e.g. 1,2 (q to quit): ");
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SearchError::Aborted);
            }
            if line.trim().eq_ignore_ascii_case("q") {
                return Err(SearchError::Aborted);
            }
            match line.parse::<Position>() {
                Ok(pos) if b.is_empty_at(pos) => {
                    println!("Got {}", pos);
                    return Ok(pos);
                }
                Ok(pos) => eprintln!("{} is already taken", pos),
                Err(e) => eprintln!("Please use a valid input: {}", e),
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn skips_bad_input_until_a_free_cell() {
        let board: Board = "x        ".parse().unwrap();
        let input = "hello\n3,3\n0,0\n 1 , 1 \n".as_bytes();
        let mut human = ConsolePlayer::with_input(Player::Two, input);
        assert_eq!(human.choose(&board).unwrap(), Position::new(1, 1));
    }

    #[test]
    fn quitting_aborts() {
        let board = Board::new();
        let mut human = ConsolePlayer::with_input(Player::One, "q\n".as_bytes());
        assert!(matches!(human.choose(&board), Err(SearchError::Aborted)));
        let mut human = ConsolePlayer::with_input(Player::One, "".as_bytes());
        assert!(matches!(human.choose(&board), Err(SearchError::Aborted)));
    }
}
