use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connectx_ai::{
    board::{Board, Cell, Mark},
    config::Config,
    window::has_won,
};

/// Greeting naming the game after its run length
pub fn title(config: &Config) -> String {
    format!("Welcome to Connect {}", config.inarow)
}

// terminal line of a board row when the bottom row is drawn on `bottom`,
// clamped to the top of the screen for boards taller than the terminal
fn screen_row(bottom: u16, rows: usize, row: usize) -> u16 {
    let above = (rows - 1 - row).min(u16::MAX as usize) as u16;
    bottom.saturating_sub(above)
}

#[derive(Copy, Clone, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

pub struct Game {
    pub board: Board,
    pub config: Config,
    pub to_move: Mark,
    pub state: GameState,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Self {
            board: Board::new(config.rows, config.columns),
            config,
            to_move: Mark::PlayerOne,
            state: GameState::Playing,
        }
    }

    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        if column_one_indexed < 1 || column_one_indexed > self.config.columns {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                self.config.columns
            ));
        }
        self.board = self.board.drop_piece(column_one_indexed - 1, self.to_move)?;

        self.state = if has_won(&self.board, self.config.inarow, self.to_move) {
            match self.to_move {
                Mark::PlayerOne => GameState::PlayerOneWin,
                Mark::PlayerTwo => GameState::PlayerTwoWin,
            }
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = self.to_move.opponent();

        Ok(self.state)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();
        let (rows, columns) = (self.config.rows, self.config.columns);

        let cols: String = (1..=columns).map(|x| (x % 10).to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..rows {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        // the cursor now sits on the bottom row
        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for (idx, cell) in self.board.cells().iter().enumerate() {
            let (pos_x, pos_y) = (
                origin_x + (idx % columns) as u16,
                screen_row(origin_y, rows, idx / columns),
            );

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
        stdout
            .queue(MoveTo(origin_x + columns as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}
