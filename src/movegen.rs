use crate::board::Board;

/// Iterator over the playable columns of a board, in ascending order
///
/// Cloning the iterator restarts the scan from its current position, and
/// [`valid_moves`] can always be called again for a fresh pass.
#[derive(Clone)]
pub struct ValidMoves<'a> {
    board: &'a Board,
    column: usize,
}

impl<'a> Iterator for ValidMoves<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.column < self.board.columns() {
            let column = self.column;
            self.column += 1;
            if self.board.is_playable(column) {
                return Some(column);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.board.columns() - self.column))
    }
}

/// Every column a disc can still be dropped into
///
/// An empty iterator means the board is full.
pub fn valid_moves(board: &Board) -> ValidMoves<'_> {
    ValidMoves { board, column: 0 }
}
