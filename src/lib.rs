//! Tic-tac-toe with three computer opponents: plain minimax, alpha-beta pruned
//! minimax and Monte Carlo Tree Search.

pub mod board;
pub mod core;
pub mod error;
pub mod game;
pub mod logging;
pub mod player;
