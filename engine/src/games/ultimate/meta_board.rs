use super::sub_board::SubBoard;
use super::types::{GRID_SIZE, Mark, Winner};

/// The 3x3 grid of sub-board outcomes. Drawn sub-boards count as empty cells.
///
/// Rebuilt from scratch whenever a sub-board is decided, and scored with the same line
/// detection as any sub-board.
pub fn derive_meta_board(sub_boards: &[[SubBoard; GRID_SIZE]; GRID_SIZE]) -> SubBoard {
    let mut cells = [[Mark::Empty; GRID_SIZE]; GRID_SIZE];
    for (y, row) in sub_boards.iter().enumerate() {
        for (x, board) in row.iter().enumerate() {
            cells[y][x] = board.winner().meta_mark();
        }
    }
    SubBoard::from_cells(cells)
}

/// Winner of the whole game as decided by the meta-board lines alone.
pub fn meta_winner(meta_board: &SubBoard) -> Option<Mark> {
    match meta_board.winner() {
        Winner::WonBy(mark) => Some(mark),
        Winner::Undecided | Winner::Drawn => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ultimate::Position;

    fn won_by(mark: Mark) -> SubBoard {
        let mut board = SubBoard::new();
        for x in 0..GRID_SIZE {
            board.apply_move(Position::new(x, 0), mark).unwrap();
        }
        board
    }

    #[test]
    fn test_meta_board_mirrors_sub_board_winners() {
        let mut sub_boards: [[SubBoard; 3]; 3] = Default::default();
        sub_boards[0][0] = won_by(Mark::PlayerTwo);
        sub_boards[1][2] = won_by(Mark::PlayerOne);

        let meta = derive_meta_board(&sub_boards);

        assert_eq!(meta.cell(Position::new(0, 0)), Mark::PlayerTwo);
        assert_eq!(meta.cell(Position::new(2, 1)), Mark::PlayerOne);
        assert_eq!(meta.free_cell_count(), 7);
        assert_eq!(meta_winner(&meta), None);
    }

    #[test]
    fn test_top_row_of_wins_decides_game() {
        let mut sub_boards: [[SubBoard; 3]; 3] = Default::default();
        for board in sub_boards[0].iter_mut() {
            *board = won_by(Mark::PlayerTwo);
        }

        let meta = derive_meta_board(&sub_boards);

        assert_eq!(meta_winner(&meta), Some(Mark::PlayerTwo));
    }
}
