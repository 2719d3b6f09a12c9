//! Enumeration and classification of the fixed-length runs of cells
//! ("windows") that a player could complete

use crate::board::{Board, Cell, Mark};

use std::ops::Range;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    DiagonalDownRight,
    DiagonalDownLeft,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
    ];

    /// (row, column) step between consecutive cells, rows grow downwards
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }

    /// Row and column ranges of every origin whose window fits on the board
    fn origins(self, rows: usize, columns: usize, inarow: usize) -> (Range<usize>, Range<usize>) {
        let row_span = span(rows, inarow);
        let column_span = span(columns, inarow);
        match self {
            Direction::Horizontal => (0..rows, 0..column_span),
            Direction::Vertical => (0..row_span, 0..columns),
            Direction::DiagonalDownRight => (0..row_span, 0..column_span),
            Direction::DiagonalDownLeft => {
                let first = inarow.saturating_sub(1);
                (0..row_span, first..first + column_span)
            }
        }
    }
}

// number of window origins along a line of `len` cells
fn span(len: usize, inarow: usize) -> usize {
    (len + 1).saturating_sub(inarow)
}

/// A view of `len` consecutive cells, never stored
#[derive(Copy, Clone, Debug)]
pub struct Window<'a> {
    board: &'a Board,
    pub row: usize,
    pub column: usize,
    pub direction: Direction,
    len: usize,
}

impl<'a> Window<'a> {
    pub fn cells(&self) -> impl Iterator<Item = Cell> + 'a {
        let Window {
            board,
            row,
            column,
            direction,
            len,
        } = *self;
        let (dy, dx) = direction.step();
        (0..len as isize).map(move |i| {
            board.get(
                (row as isize + i * dy) as usize,
                (column as isize + i * dx) as usize,
            )
        })
    }

    /// Number of (empty, player one, player two) cells in the window
    pub fn tally(&self) -> [usize; 3] {
        let mut tally = [0; 3];
        for cell in self.cells() {
            tally[cell.value() as usize] += 1;
        }
        tally
    }

    /// Holds exactly `num_discs` of `mark` with every other cell empty
    pub fn is_open(&self, num_discs: usize, mark: Mark) -> bool {
        if num_discs > self.len {
            return false;
        }
        let tally = self.tally();
        tally[mark.value() as usize] == num_discs && tally[0] == self.len - num_discs
    }
}

/// Every window of `inarow` cells, in all four directions
pub fn windows(board: &Board, inarow: usize) -> impl Iterator<Item = Window<'_>> {
    let directions: &'static [Direction; 4] = &Direction::ALL;
    directions.iter().flat_map(move |&direction| {
        let (rows, columns) = direction.origins(board.rows(), board.columns(), inarow);
        rows.flat_map(move |row| {
            columns.clone().map(move |column| Window {
                board,
                row,
                column,
                direction,
                len: inarow,
            })
        })
    })
}

/// Counts the windows holding exactly `num_discs` of `mark` and nothing else
///
/// A single opposing disc disqualifies a window, so only shapes that can
/// still grow into a full run are counted.
pub fn count_windows(board: &Board, inarow: usize, num_discs: usize, mark: Mark) -> usize {
    windows(board, inarow)
        .filter(|window| window.is_open(num_discs, mark))
        .count()
}

/// Open window counts for both players, gathered in a single scan
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WindowCounts {
    // indexed by mark, then by number of discs in the window
    counts: [Vec<usize>; 2],
}

impl WindowCounts {
    pub fn scan(board: &Board, inarow: usize) -> Self {
        // no window holds more discs than the longest line on the board
        let len = inarow.min(board.rows().max(board.columns())) + 1;
        let mut counts = [vec![0; len], vec![0; len]];
        for window in windows(board, inarow) {
            let [_, one, two] = window.tally();
            if two == 0 {
                counts[0][one] += 1;
            }
            if one == 0 {
                counts[1][two] += 1;
            }
        }
        Self { counts }
    }

    /// Same value as [`count_windows`] for the scanned board
    pub fn get(&self, mark: Mark, num_discs: usize) -> usize {
        let counts = match mark {
            Mark::PlayerOne => &self.counts[0],
            Mark::PlayerTwo => &self.counts[1],
        };
        counts.get(num_discs).copied().unwrap_or(0)
    }
}

/// Whether `mark` has completed a run of `inarow`
pub fn has_won(board: &Board, inarow: usize, mark: Mark) -> bool {
    windows(board, inarow).any(|window| window.is_open(inarow, mark))
}
