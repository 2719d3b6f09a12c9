use anyhow::{anyhow, Result};

use std::convert::TryFrom;
use std::fmt;

/// One of the two players
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Mark {
    PlayerOne,
    PlayerTwo,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::PlayerOne => Mark::PlayerTwo,
            Mark::PlayerTwo => Mark::PlayerOne,
        }
    }

    /// The numeric identifier used on the wire, 1 or 2
    pub fn value(self) -> u8 {
        match self {
            Mark::PlayerOne => 1,
            Mark::PlayerTwo => 2,
        }
    }
}

impl TryFrom<u8> for Mark {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Mark::PlayerOne),
            2 => Ok(Mark::PlayerTwo),
            _ => Err(anyhow!("mark must be 1 or 2")),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn value(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => 2,
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::PlayerOne => Cell::PlayerOne,
            Mark::PlayerTwo => Cell::PlayerTwo,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::PlayerOne),
            2 => Ok(Cell::PlayerTwo),
            _ => Err(anyhow!("invalid cell value {}, expected 0, 1 or 2", value)),
        }
    }
}

/// Returned by [`Board::drop_piece`] when the column has no empty cell left
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ColumnFull {
    pub column: usize,
}

impl fmt::Display for ColumnFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid move, column {} full", self.column + 1)
    }
}

impl std::error::Error for ColumnFull {}

/// A grid of cells subject to gravity
///
/// Boards are never modified once built: [`Board::drop_piece`] returns a new
/// board so that sibling search branches cannot see each other's moves.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: Vec<Cell>, // cells are stored left-to-right, top-to-bottom
    rows: usize,
    columns: usize,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; rows * columns],
            rows,
            columns,
        }
    }

    /// Reshapes a row-major cell sequence, top row first
    ///
    /// The length must be exactly `rows * columns`.
    pub fn from_flat(cells: Vec<Cell>, rows: usize, columns: usize) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        Self {
            cells,
            rows,
            columns,
        }
    }

    /// Like [`Board::from_flat`] but from the numeric encoding `0 = empty, 1, 2`
    pub fn from_values(values: &[u8], rows: usize, columns: usize) -> Result<Self> {
        if values.len() != rows * columns {
            return Err(anyhow!("board length must be {}", rows * columns));
        }
        let cells = values
            .iter()
            .map(|&value| Cell::try_from(value))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_flat(cells, rows, columns))
    }

    pub fn to_values(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.value()).collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row 0 is the top of the board
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row * self.columns + column]
    }

    /// A column is playable while its top cell is empty
    pub fn is_playable(&self, column: usize) -> bool {
        column < self.columns && self.cells[column].is_empty()
    }

    pub fn is_full(&self) -> bool {
        (0..self.columns).all(|column| !self.is_playable(column))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Drops `mark` into `column`, landing on the lowest empty cell
    pub fn drop_piece(&self, column: usize, mark: Mark) -> Result<Board, ColumnFull> {
        if column >= self.columns {
            return Err(ColumnFull { column });
        }
        for row in (0..self.rows).rev() {
            let idx = row * self.columns + column;
            if self.cells[idx].is_empty() {
                let mut next = self.clone();
                next.cells[idx] = mark.into();
                return Ok(next);
            }
        }
        Err(ColumnFull { column })
    }

    /// Checks the gravity rule: no disc sits above an empty cell
    pub fn is_settled(&self) -> bool {
        (0..self.columns).all(|column| {
            let mut seen_disc = false;
            (0..self.rows).all(|row| {
                let empty = self.get(row, column).is_empty();
                if !empty {
                    seen_disc = true;
                }
                !(seen_disc && empty)
            })
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let symbol = match self.get(row, column) {
                    Cell::Empty => '.',
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
