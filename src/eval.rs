//! Heuristic evaluation of a position from one player's point of view

use crate::{
    board::{Board, Mark},
    config::{Config, Weights},
    window::WindowCounts,
};

/// Scores boards by counting the open windows of both players
///
/// The weights are injected so that alternative tables can be compared
/// without touching the search.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Evaluator {
    weights: Weights,
}

impl Evaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Scores `board` for `mark`, positive values favour `mark`
    ///
    /// A completed run decides the score outright: `-win` if the opponent
    /// has one (checked first), `+win` if `mark` has one.
    pub fn score(&self, board: &Board, config: &Config, mark: Mark) -> i64 {
        let w = &self.weights;
        let counts = WindowCounts::scan(board, config.inarow);
        let opponent = mark.opponent();

        if counts.get(opponent, config.inarow) > 0 {
            return -w.win;
        }
        let fours = counts.get(mark, config.inarow);
        if fours > 0 {
            return w.win;
        }

        w.win * fours as i64
            + w.three * counts.get(mark, 3) as i64
            + w.two * counts.get(mark, 2) as i64
            + w.two_opp * counts.get(opponent, 2) as i64
            + w.three_opp * counts.get(opponent, 3) as i64
    }
}
