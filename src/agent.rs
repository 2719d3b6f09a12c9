//! Validated entry points for callers holding a raw, flattened board

use anyhow::{anyhow, Result};
use rayon::prelude::*;

use std::convert::TryFrom;

use crate::{
    board::{Board, Mark},
    config::Config,
    eval::Evaluator,
    movegen::valid_moves,
    search::{SearchResult, Searcher},
};

/// A request for a move as received from a caller
///
/// Omitted dimensions fall back to [`Config::default`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MoveRequest {
    /// Row-major cells, top row first: 0 = empty, 1 or 2 = a player's disc
    pub board: Vec<u8>,
    /// The player to move, 1 or 2
    pub mark: u8,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub inarow: Option<usize>,
    pub depth: Option<usize>,
}

impl MoveRequest {
    pub fn new(board: Vec<u8>, mark: u8) -> Self {
        Self {
            board,
            mark,
            rows: None,
            columns: None,
            inarow: None,
            depth: None,
        }
    }

    pub fn with_dimensions(mut self, rows: usize, columns: usize, inarow: usize) -> Self {
        self.rows = Some(rows);
        self.columns = Some(columns);
        self.inarow = Some(inarow);
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Checks the request shape and builds the engine's inputs
    pub fn validate(&self) -> Result<(Board, Mark, Config)> {
        let mark = Mark::try_from(self.mark)?;
        let defaults = Config::default();
        let config = Config::new(
            self.rows.unwrap_or(defaults.rows),
            self.columns.unwrap_or(defaults.columns),
            self.inarow.unwrap_or(defaults.inarow),
            self.depth.unwrap_or(defaults.depth),
        )?;
        let board = Board::from_values(&self.board, config.rows, config.columns)?;
        if !board.is_settled() {
            return Err(anyhow!("board has floating discs"));
        }
        Ok((board, mark, config))
    }
}

/// Searches for `mark`'s move, falling back to the lowest playable column
///
/// The fallback covers searches that end without a move, such as a zero
/// depth. The column stays `None` only when every column is full.
pub fn choose_move(
    board: &Board,
    mark: Mark,
    config: &Config,
    evaluator: Evaluator,
) -> SearchResult {
    let mut searcher = Searcher::with_evaluator(*config, evaluator);
    let mut result = searcher.search(board, mark);
    if result.column.is_none() {
        result.column = valid_moves(board).next();
        log::warn!(
            "search at depth {} returned no move, falling back to column {:?}",
            config.depth,
            result.column
        );
    }
    result
}

/// Picks a column for `mark`, `None` only when the board is full
pub fn choose_column(
    board: &Board,
    mark: Mark,
    config: &Config,
    evaluator: Evaluator,
) -> Option<usize> {
    choose_move(board, mark, config, evaluator).column
}

/// Validates a request and answers it with a column index
pub fn get_ai_move(request: &MoveRequest) -> Result<usize> {
    let (board, mark, config) = request.validate()?;
    choose_column(&board, mark, &config, Evaluator::default())
        .ok_or_else(|| anyhow!("game already over, no playable column"))
}

/// Answers independent requests in parallel, one result per request in order
pub fn select_columns(requests: &[MoveRequest]) -> Vec<Result<usize>> {
    requests.par_iter().map(get_ai_move).collect()
}
