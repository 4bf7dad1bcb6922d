use super::types::{GRID_SIZE, Mark, Position, Winner};
use super::win_detector::{Grid, check_win};
use crate::error::EngineError;

/// A single 3x3 grid. Once decided it accepts no further moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubBoard {
    cells: Grid,
    winner: Winner,
    free_cells: usize,
}

impl Default for SubBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SubBoard {
    pub fn new() -> Self {
        Self {
            cells: [[Mark::Empty; GRID_SIZE]; GRID_SIZE],
            winner: Winner::Undecided,
            free_cells: GRID_SIZE * GRID_SIZE,
        }
    }

    /// Builds a grid directly from cell marks. Winner and free cells are derived, so the
    /// result may be a position no game could reach.
    pub fn from_cells(cells: Grid) -> Self {
        let free_cells = cells.iter().flatten().filter(|&&cell| cell == Mark::Empty).count();
        let mut board = Self {
            cells,
            winner: Winner::Undecided,
            free_cells,
        };
        board.update_winner();
        board
    }

    pub fn apply_move(&mut self, position: Position, mark: Mark) -> Result<(), EngineError> {
        if position.x >= GRID_SIZE || position.y >= GRID_SIZE || mark == Mark::Empty {
            return Err(EngineError::IllegalMove { position });
        }
        if self.is_terminal() {
            return Err(EngineError::BoardTerminal);
        }
        if self.cells[position.y][position.x] != Mark::Empty {
            return Err(EngineError::CellOccupied { position });
        }

        self.cells[position.y][position.x] = mark;
        self.free_cells -= 1;
        self.update_winner();
        Ok(())
    }

    /// Copy of this grid with one more move played.
    pub fn with_move(&self, position: Position, mark: Mark) -> Result<Self, EngineError> {
        let mut next = self.clone();
        next.apply_move(position, mark)?;
        Ok(next)
    }

    fn update_winner(&mut self) {
        self.winner = match check_win(&self.cells) {
            Some(mark) => Winner::WonBy(mark),
            None if self.free_cells == 0 => Winner::Drawn,
            None => Winner::Undecided,
        };
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_decided() || self.free_cells == 0
    }

    pub fn winner(&self) -> Winner {
        self.winner
    }

    pub fn cell(&self, position: Position) -> Mark {
        self.cells[position.y][position.x]
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub fn free_cell_count(&self) -> usize {
        self.free_cells
    }

    /// Empty cells in row-major order. A decided grid has none to offer.
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let open = !self.winner.is_decided();
        (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
            .filter(move |position| open && self.cell(*position) == Mark::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_open() {
        let board = SubBoard::new();

        assert_eq!(board.winner(), Winner::Undecided);
        assert_eq!(board.free_cell_count(), 9);
        assert!(!board.is_terminal());
        assert_eq!(board.free_cells().count(), 9);
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut board = SubBoard::new();
        board.apply_move(Position::new(1, 1), Mark::PlayerOne).unwrap();

        let result = board.apply_move(Position::new(1, 1), Mark::PlayerTwo);

        assert_eq!(result, Err(EngineError::CellOccupied { position: Position::new(1, 1) }));
        assert_eq!(board.cell(Position::new(1, 1)), Mark::PlayerOne);
        assert_eq!(board.free_cell_count(), 8);
    }

    #[test]
    fn test_main_diagonal_wins() {
        let mut board = SubBoard::new();
        for i in 0..3 {
            board.apply_move(Position::new(i, i), Mark::PlayerOne).unwrap();
        }

        assert_eq!(board.winner(), Winner::WonBy(Mark::PlayerOne));
        assert!(board.is_terminal());
        assert_eq!(board.free_cells().count(), 0);
    }

    #[test]
    fn test_decided_board_rejects_moves_and_keeps_winner() {
        let mut board = SubBoard::new();
        for x in 0..3 {
            board.apply_move(Position::new(x, 0), Mark::PlayerTwo).unwrap();
        }

        let result = board.apply_move(Position::new(0, 2), Mark::PlayerOne);

        assert_eq!(result, Err(EngineError::BoardTerminal));
        assert_eq!(board.winner(), Winner::WonBy(Mark::PlayerTwo));
    }

    #[test]
    fn test_full_board_without_line_is_drawn() {
        let x = Mark::PlayerOne;
        let o = Mark::PlayerTwo;
        let order = [
            (0, 0, x),
            (1, 0, o),
            (2, 0, x),
            (1, 1, o),
            (0, 1, x),
            (2, 1, o),
            (1, 2, x),
            (0, 2, o),
            (2, 2, x),
        ];
        let mut board = SubBoard::new();
        for (px, py, mark) in order {
            board.apply_move(Position::new(px, py), mark).unwrap();
        }

        assert_eq!(board.winner(), Winner::Drawn);
        assert!(board.is_terminal());
    }

    #[test]
    fn test_from_cells_derives_state() {
        let e = Mark::Empty;
        let x = Mark::PlayerOne;
        let board = SubBoard::from_cells([[x, x, x], [e, e, e], [e, e, e]]);

        assert_eq!(board.winner(), Winner::WonBy(x));
        assert_eq!(board.free_cell_count(), 6);
    }
}
