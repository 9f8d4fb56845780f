//! Error types for the search core

use thiserror::Error;

use crate::core::Outcome;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SearchError {
    /// A search was asked to move on a board whose outcome is already decided
    #[error("invalid state: the game is already over ({0})")]
    InvalidState(Outcome),

    #[error("the search finished without expanding a single move")]
    EmptyTree,

    #[error("the player gave up")]
    Aborted,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected {expected} cells, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("invalid character '{character}' at position {position}")]
    InvalidCell { character: char, position: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParsePositionError {
    #[error("expected two numbers separated by a comma, got '{0}'")]
    Format(String),

    #[error("coordinate ({row},{col}) is outside the 3x3 board")]
    OutOfRange { row: usize, col: usize },
}
