use std::str::FromStr;

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::core::{Outcome, Player, Position};
use crate::error::ParseBoardError;

pub const SIDE: usize = 3;
pub const N_CELLS: usize = SIDE * SIDE;

/// `None` is an empty cell
pub type Cell = Option<Player>;

/// The 8 ways to get three in a row: rows, columns, then the two diagonals.
const WIN_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A 3x3 grid. Whose turn it is is not stored anywhere; it follows from counting the marks.
///
/// The board is `Copy`, so every hypothetical future explored by a search lives in its own
/// value and can never alias the canonical game board.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; SIDE]; SIDE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// A win on any of the 8 lines decides the game. Otherwise the game is still
    /// running if there is room left, or else it is a draw.
    pub fn check_outcome(&self) -> Outcome {
        for line in WIN_LINES {
            let [a, b, c] = line.map(|(r, col)| self.cells[r][col]);
            if let Some(p) = a {
                if b == Some(p) && c == Some(p) {
                    return Outcome::Won(p);
                }
            }
        }
        if self.cells.iter().flatten().any(Option::is_none) {
            Outcome::InProgress
        } else {
            Outcome::Draw
        }
    }

    pub fn is_over(&self) -> bool {
        self.check_outcome().is_decided()
    }

    /// `One` moves whenever both players have placed the same number of marks.
    pub fn next_player(&self) -> Player {
        let count = |p| self.cells.iter().flatten().filter(|&&c| c == Some(p)).count();
        if count(Player::One) > count(Player::Two) {
            Player::Two
        } else {
            Player::One
        }
    }

    /// All empty cells in row-major order. Searches rely on this order for tie-breaking.
    pub fn legal_moves(&self) -> Vec<Position> {
        iproduct!(0..SIDE, 0..SIDE)
            .map(Position::from)
            .filter(|&pos| self.is_empty_at(pos))
            .collect()
    }

    pub fn n_moves_made(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// A copy of this board with `player`'s mark at `pos`.
    /// The cell must be empty; this is the caller's responsibility.
    pub fn apply_move(&self, pos: Position, player: Player) -> Board {
        let mut next = *self;
        next.place_mark(pos, player);
        next
    }

    /// In-place version of [`Board::apply_move`], used on the canonical game board.
    pub fn place_mark(&mut self, pos: Position, player: Player) {
        debug_assert!(
            self.is_empty_at(pos),
            "There is already a marker at {pos}! Invalid move just played!"
        );
        self.cells[pos.row][pos.col] = Some(player);
    }
}

/// Nine cells, row-major. `x`, `X` or `1` for player one, `o`, `O` or `2` for player two,
/// and space, `.`, `_` or `0` for an empty cell.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != N_CELLS {
            return Err(ParseBoardError::WrongLength {
                expected: N_CELLS,
                got: chars.len(),
            });
        }
        let mut b = Self::new();
        for (num, &c) in chars.iter().enumerate() {
            let cell = match c {
                'x' | 'X' | '1' => Some(Player::One),
                'o' | 'O' | '2' => Some(Player::Two),
                ' ' | '.' | '_' | '0' => None,
                _ => {
                    return Err(ParseBoardError::InvalidCell {
                        character: c,
                        position: num,
                    })
                }
            };
            b.cells[num / SIDE][num % SIDE] = cell;
        }
        Ok(b)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = |c: &Cell| c.map_or(' ', |p| p.mark());
        writeln!(f, "    0 1 2 ")?;
        writeln!(f, "   ------- ")?;
        for (i, row) in self.cells.iter().enumerate() {
            write!(f, "{i} | ")?;
            row.iter().try_for_each(|c| write!(f, "{} ", m(c)))?;
            writeln!(f, "|")?;
        }
        writeln!(f, "   ------- ")
    }
}
