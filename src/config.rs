//! Game dimensions, search depth and evaluation weights

use anyhow::{anyhow, Result};
use static_assertions::*;

/// Default number of rows, as on a standard Connect 4 board
pub const DEFAULT_ROWS: usize = 6;
/// Default number of columns, as on a standard Connect 4 board
pub const DEFAULT_COLUMNS: usize = 7;
/// Default run length required to win
pub const DEFAULT_INAROW: usize = 4;
/// Default search depth in plies
pub const DEFAULT_DEPTH: usize = 3;

pub const WIN: i64 = 1_000_000;
pub const THREE: i64 = 1_000;
pub const TWO: i64 = 10;
pub const TWO_OPP: i64 = -50;
pub const THREE_OPP: i64 = -10_000;

// the default game must be winnable
const_assert!(DEFAULT_INAROW <= DEFAULT_ROWS || DEFAULT_INAROW <= DEFAULT_COLUMNS);
// a completed run must outweigh any heuristic shape on a default board
const_assert!(WIN > 100 * THREE);
const_assert!(-THREE_OPP > THREE);
const_assert!(-TWO_OPP > TWO);

/// Board dimensions and search depth, shared by every operation
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub columns: usize,
    pub inarow: usize,
    /// Number of plies searched before falling back to the heuristic
    pub depth: usize,
}

impl Config {
    pub fn new(rows: usize, columns: usize, inarow: usize, depth: usize) -> Result<Self> {
        if rows == 0 || columns == 0 || inarow == 0 {
            return Err(anyhow!(
                "rows, columns and inarow must be at least 1 (got {}x{}, inarow {})",
                rows,
                columns,
                inarow
            ));
        }
        let config = Self {
            rows,
            columns,
            inarow,
            depth,
        };
        if !config.winnable() {
            log::warn!(
                "{} in a row cannot be reached on a {}x{} board",
                inarow,
                rows,
                columns
            );
        }
        Ok(config)
    }

    /// Whether a run of `inarow` fits on the board at all
    pub fn winnable(&self) -> bool {
        self.inarow <= self.rows.max(self.columns)
    }

    pub fn num_cells(&self) -> usize {
        self.rows * self.columns
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            inarow: DEFAULT_INAROW,
            depth: DEFAULT_DEPTH,
        }
    }
}

/// Weights applied to window counts by the [`Evaluator`]
///
/// `win` doubles as the search's win threshold: any evaluation at or beyond
/// `±win` ends a branch immediately.
///
/// [`Evaluator`]: crate::eval::Evaluator
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Weights {
    pub win: i64,
    pub three: i64,
    pub two: i64,
    pub two_opp: i64,
    pub three_opp: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            win: WIN,
            three: THREE,
            two: TWO,
            two_opp: TWO_OPP,
            three_opp: THREE_OPP,
        }
    }
}
