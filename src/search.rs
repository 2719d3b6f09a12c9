//! Fixed-depth minimax search with alpha-beta pruning

use crate::{
    board::{Board, Mark},
    config::Config,
    eval::Evaluator,
    movegen::valid_moves,
};

/// Lower bound of every search window, also the score of a node with no playable move
pub const NEG_INFINITY: i64 = i64::MIN;
/// Upper bound of every search window
pub const INFINITY: i64 = i64::MAX;

/// Score of a node and the column that achieves it
///
/// `column` is `None` at leaves and when no column could be played.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SearchResult {
    pub score: i64,
    pub column: Option<usize>,
}

impl SearchResult {
    fn leaf(score: i64) -> Self {
        Self {
            score,
            column: None,
        }
    }
}

/// A minimax agent for a single position at a time
///
/// # Position Scoring
/// Every node, whoever is to move, is scored from the searching player's
/// point of view by the [`Evaluator`]. MAX nodes play the searching
/// player's discs and keep the highest child score, MIN nodes play the
/// opponent's discs and keep the lowest. A move that completes a run ends
/// its branch at once with `±win`, without searching deeper.
#[derive(Clone, Debug)]
pub struct Searcher {
    config: Config,
    evaluator: Evaluator,

    /// The number of nodes searched by this `Searcher` so far (for diagnostics only)
    pub node_count: usize,
}

impl Searcher {
    /// Creates a new `Searcher` with the default weights
    pub fn new(config: Config) -> Self {
        Self::with_evaluator(config, Evaluator::default())
    }

    pub fn with_evaluator(config: Config, evaluator: Evaluator) -> Self {
        Self {
            config,
            evaluator,
            node_count: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Searches `board` to the configured depth for the best column for `mark`
    ///
    /// Returns no column when the board is full or the depth is zero; the
    /// caller decides what to play then.
    pub fn search(&mut self, board: &Board, mark: Mark) -> SearchResult {
        debug_assert!(board.is_settled());
        let start = self.node_count;
        let result = self.minimax(board, self.config.depth, true, mark, NEG_INFINITY, INFINITY);
        log::debug!(
            "searched {} nodes at depth {}: score {}, column {:?}",
            self.node_count - start,
            self.config.depth,
            result.score,
            result.column
        );
        result
    }

    /// Performs game tree search from a single node
    ///
    /// `alpha` and `beta` are the scores the MAX and MIN players can already
    /// guarantee elsewhere in the tree.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        maximizing: bool,
        mark: Mark,
        mut alpha: i64,
        mut beta: i64,
    ) -> SearchResult {
        self.node_count += 1;

        let mut moves = valid_moves(board).peekable();
        if depth == 0 || moves.peek().is_none() {
            return SearchResult::leaf(self.evaluator.score(board, &self.config, mark));
        }

        let win = self.evaluator.weights().win;

        if maximizing {
            let mut best = SearchResult::leaf(NEG_INFINITY);
            for column in moves {
                let next = match board.drop_piece(column, mark) {
                    Ok(next) => next,
                    Err(_) => continue,
                };
                // a winning drop needs no further search
                if self.evaluator.score(&next, &self.config, mark) >= win {
                    return SearchResult {
                        score: win,
                        column: Some(column),
                    };
                }

                let score = self.minimax(&next, depth - 1, false, mark, alpha, beta).score;
                if score > best.score {
                    best = SearchResult {
                        score,
                        column: Some(column),
                    };
                }
                alpha = alpha.max(score);
                // the MIN player will never allow this branch
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let opponent = mark.opponent();
            let mut best = SearchResult::leaf(INFINITY);
            for column in moves {
                let next = match board.drop_piece(column, opponent) {
                    Ok(next) => next,
                    Err(_) => continue,
                };
                // scored for `mark`, not for the opponent who just moved
                if self.evaluator.score(&next, &self.config, mark) <= -win {
                    return SearchResult {
                        score: -win,
                        column: Some(column),
                    };
                }

                let score = self.minimax(&next, depth - 1, true, mark, alpha, beta).score;
                if score < best.score {
                    best = SearchResult {
                        score,
                        column: Some(column),
                    };
                }
                beta = beta.min(score);
                // the MAX player already has something better
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}
