//! The core abstractions for this application
//!

use std::fmt::Display;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::board::{Board, SIDE};
use crate::error::{ParsePositionError, SearchError};

/// The two symbols that can be placed on the board.
/// `One` (X) always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(&self) -> Self {
        match *self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub fn mark(&self) -> char {
        match *self {
            Self::One => 'X',
            Self::Two => 'O',
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// Terminal classification of a board
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Draw,
    Won(Player),
}

impl Outcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::Won(p) => write!(f, "{} wins", p),
        }
    }
}

/// A cell on the board, zero-based.
///
///  (0,0) (0,1) (0,2)
///  (1,0) (1,1) (1,2)
///  (2,0) (2,1) (2,2)
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Parses `row,col` with optional whitespace around each number
impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParsePositionError::Format(s.trim().to_string());
        let (row, col) = s.split_once(',').ok_or_else(bad)?;
        let row: usize = row.trim().parse().map_err(|_| bad())?;
        let col: usize = col.trim().parse().map_err(|_| bad())?;
        if row >= SIDE || col >= SIDE {
            return Err(ParsePositionError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }
}

/// Something that decides moves. This is the only thing the turn loop knows about the AIs.
pub trait Strategy {
    /// Observe the board and return where the player to move should place its mark.
    /// Must not be called on a board whose outcome is decided.
    fn choose(&mut self, board: &Board) -> Result<Position, SearchError>;

    fn name(&self) -> &str;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
pub enum StrategyKind {
    /// A human typing moves on stdin
    Console,
    /// Exhaustive minimax
    Minimax,
    /// Minimax with alpha-beta pruning
    AlphaBeta,
    /// Monte Carlo Tree Search
    Mcts,
}
