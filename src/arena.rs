//! Self-play matches between two weight tables
//!
//! Both searches are deterministic, so a match replays every legal opening
//! of a fixed length instead of drawing random positions. Each opening is
//! played twice, once with each table moving first.

use indicatif::*;
use rayon::prelude::*;

use std::time::Instant;

use crate::{
    agent::choose_column,
    board::{Board, Mark},
    config::{Config, Weights},
    eval::Evaluator,
    movegen::valid_moves,
    window::has_won,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Won(Mark),
    Draw,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ArenaReport {
    pub challenger_wins: usize,
    pub incumbent_wins: usize,
    pub draws: usize,
}

impl ArenaReport {
    pub fn games(&self) -> usize {
        self.challenger_wins + self.incumbent_wins + self.draws
    }

    /// The challenger's share of the points, a draw counting as half a win
    pub fn score(&self) -> f64 {
        if self.games() == 0 {
            return 0.5;
        }
        (self.challenger_wins as f64 + self.draws as f64 / 2.0) / self.games() as f64
    }
}

#[derive(Clone, Debug)]
pub struct Arena {
    pub config: Config,
    pub challenger: Weights,
    pub incumbent: Weights,
    /// Number of moves played before the searches take over
    pub opening_plies: usize,
    silent: bool,
}

impl Arena {
    pub fn new(config: Config, challenger: Weights, incumbent: Weights) -> Self {
        Self {
            config,
            challenger,
            incumbent,
            opening_plies: 2,
            silent: true,
        }
    }

    pub fn with_opening_plies(mut self, opening_plies: usize) -> Self {
        self.opening_plies = opening_plies;
        self
    }

    /// Shows a progress bar while the match is played
    pub fn verbose(mut self) -> Self {
        self.silent = false;
        self
    }

    /// Every position reachable in `opening_plies` moves without a winner,
    /// ordered by the columns played
    pub fn openings(&self) -> Vec<Board> {
        let mut openings = Vec::new();
        self.extend_opening(
            &Board::new(self.config.rows, self.config.columns),
            Mark::PlayerOne,
            self.opening_plies,
            &mut openings,
        );
        openings
    }

    fn extend_opening(&self, board: &Board, to_move: Mark, plies: usize, out: &mut Vec<Board>) {
        if plies == 0 {
            out.push(board.clone());
            return;
        }
        for column in valid_moves(board) {
            if let Ok(next) = board.drop_piece(column, to_move) {
                // the searches only play out unfinished games
                if has_won(&next, self.config.inarow, to_move) {
                    continue;
                }
                self.extend_opening(&next, to_move.opponent(), plies - 1, out);
            }
        }
    }

    /// Plays every opening out twice and tallies the results
    pub fn play(&self) -> ArenaReport {
        let start = Instant::now();
        let games: Vec<(Board, bool)> = self
            .openings()
            .into_iter()
            .flat_map(|board| vec![(board.clone(), true), (board, false)])
            .collect();

        let progress = if self.silent {
            ProgressBar::hidden()
        } else {
            let progress = ProgressBar::new(games.len() as u64);
            progress.set_style(
                ProgressStyle::default_bar()
                    .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                    .progress_chars("█▓▒░  "),
            );
            progress
        };

        let outcomes: Vec<(bool, Outcome)> = games
            .par_iter()
            .map(|(board, challenger_first)| {
                let outcome = self.play_out(board, *challenger_first);
                progress.inc(1);
                (*challenger_first, outcome)
            })
            .collect();
        progress.finish();

        let mut report = ArenaReport::default();
        for (challenger_first, outcome) in outcomes {
            let challenger_mark = if challenger_first {
                Mark::PlayerOne
            } else {
                Mark::PlayerTwo
            };
            match outcome {
                Outcome::Won(mark) if mark == challenger_mark => report.challenger_wins += 1,
                Outcome::Won(_) => report.incumbent_wins += 1,
                Outcome::Draw => report.draws += 1,
            }
        }

        log::info!(
            "arena finished {} games in {}: {} challenger wins, {} incumbent wins, {} draws",
            report.games(),
            HumanDuration(start.elapsed()),
            report.challenger_wins,
            report.incumbent_wins,
            report.draws
        );
        report
    }

    /// Plays a single game from an opening position to its end
    pub fn play_out(&self, opening: &Board, challenger_first: bool) -> Outcome {
        let (first, second) = if challenger_first {
            (self.challenger, self.incumbent)
        } else {
            (self.incumbent, self.challenger)
        };

        let mut board = opening.clone();
        let mut to_move = if self.opening_plies % 2 == 0 {
            Mark::PlayerOne
        } else {
            Mark::PlayerTwo
        };

        loop {
            let weights = match to_move {
                Mark::PlayerOne => first,
                Mark::PlayerTwo => second,
            };
            let column =
                match choose_column(&board, to_move, &self.config, Evaluator::new(weights)) {
                    Some(column) => column,
                    None => return Outcome::Draw,
                };
            board = match board.drop_piece(column, to_move) {
                Ok(next) => next,
                Err(_) => return Outcome::Draw,
            };
            if has_won(&board, self.config.inarow, to_move) {
                return Outcome::Won(to_move);
            }
            to_move = to_move.opponent();
        }
    }
}
