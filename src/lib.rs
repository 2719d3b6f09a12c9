//! A depth-limited minimax agent for 'Connect X' style games
//!
//! The board size and the run length needed to win are configurable.
//! Moves are chosen by a fixed-depth minimax search with alpha-beta
//! pruning over a window-counting heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connectx_ai::{agent::{get_ai_move, MoveRequest}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = vec![0; 42];
//! // three red discs on the bottom row, column 3 completes the run
//! board[35] = 1;
//! board[36] = 1;
//! board[37] = 1;
//! board[29] = 2;
//! board[30] = 2;
//!
//! let request = MoveRequest::new(board, 2);
//! assert_eq!(get_ai_move(&request)?, 3);
//!# Ok(())
//!# }
//! ```

pub use anyhow;

pub mod config;

pub mod board;

pub mod movegen;

pub mod window;

pub mod eval;

pub mod search;

pub mod agent;

pub mod arena;

mod test;

pub use agent::{choose_column, choose_move, get_ai_move, select_columns, MoveRequest};
pub use board::{Board, Cell, ColumnFull, Mark};
pub use config::{Config, Weights};
pub use eval::Evaluator;
pub use search::{SearchResult, Searcher};
