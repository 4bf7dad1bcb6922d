use std::fmt;

use super::meta_board::{derive_meta_board, meta_winner};
use super::sub_board::SubBoard;
use super::types::{ActiveSubBoard, BOARD_SIZE, GRID_SIZE, GameStatus, Mark, Position};
use crate::error::EngineError;

/// Nine sub-boards plus the active sub-board constraint.
///
/// `legal_moves` is recomputed after every move and is kept in sub-board-major order:
/// sub-boards row by row, cells row by row inside each sub-board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltimateBoard {
    sub_boards: [[SubBoard; GRID_SIZE]; GRID_SIZE],
    meta_board: SubBoard,
    active: ActiveSubBoard,
    legal_moves: Vec<Position>,
    done: bool,
}

impl Default for UltimateBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl UltimateBoard {
    pub fn new() -> Self {
        Self::from_sub_boards(Default::default())
    }

    /// Builds a board from arbitrary sub-boards with free choice of the next sub-board.
    pub fn from_sub_boards(sub_boards: [[SubBoard; GRID_SIZE]; GRID_SIZE]) -> Self {
        let mut board = Self {
            sub_boards,
            meta_board: SubBoard::new(),
            active: ActiveSubBoard::Any,
            legal_moves: Vec::new(),
            done: false,
        };
        board.update_outcome();
        board.update_legal_moves();
        board
    }

    pub fn apply_move(&mut self, position: Position, mark: Mark) -> Result<(), EngineError> {
        if !self.is_legal(position) {
            return Err(EngineError::IllegalMove { position });
        }

        let slot = position.sub_board();
        let inner = position.inner();
        let target = &mut self.sub_boards[slot.y][slot.x];
        target.apply_move(inner, mark)?;

        if target.is_terminal() {
            self.update_outcome();
        }

        self.active = if self.sub_board(inner).is_terminal() {
            ActiveSubBoard::Any
        } else {
            ActiveSubBoard::Fixed(inner)
        };
        self.update_legal_moves();
        Ok(())
    }

    /// Copy of this board with one more move played; `self` is left untouched.
    pub fn with_move(&self, position: Position, mark: Mark) -> Result<Self, EngineError> {
        let mut next = self.clone();
        next.apply_move(position, mark)?;
        Ok(next)
    }

    fn update_outcome(&mut self) {
        self.meta_board = derive_meta_board(&self.sub_boards);
        let all_terminal = self.sub_boards.iter().flatten().all(SubBoard::is_terminal);
        self.done = meta_winner(&self.meta_board).is_some() || all_terminal;
    }

    fn update_legal_moves(&mut self) {
        self.legal_moves.clear();
        if self.done {
            return;
        }

        if let ActiveSubBoard::Fixed(slot) = self.active {
            let free = self.sub_boards[slot.y][slot.x].free_cells();
            self.legal_moves.extend(free.map(|inner| Position::global(slot, inner)));
        }

        if self.legal_moves.is_empty() {
            self.active = ActiveSubBoard::Any;
            for y in 0..GRID_SIZE {
                for x in 0..GRID_SIZE {
                    let slot = Position::new(x, y);
                    let board = &self.sub_boards[y][x];
                    if board.is_terminal() {
                        continue;
                    }
                    self.legal_moves
                        .extend(board.free_cells().map(|inner| Position::global(slot, inner)));
                }
            }
        }
    }

    pub fn is_legal(&self, position: Position) -> bool {
        self.legal_moves.contains(&position)
    }

    pub fn legal_moves(&self) -> &[Position] {
        &self.legal_moves
    }

    pub fn active_sub_board(&self) -> ActiveSubBoard {
        self.active
    }

    pub fn sub_board(&self, slot: Position) -> &SubBoard {
        &self.sub_boards[slot.y][slot.x]
    }

    pub fn sub_boards(&self) -> &[[SubBoard; GRID_SIZE]; GRID_SIZE] {
        &self.sub_boards
    }

    pub fn meta_board(&self) -> &SubBoard {
        &self.meta_board
    }

    pub fn cell(&self, position: Position) -> Mark {
        self.sub_board(position.sub_board()).cell(position.inner())
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn outcome(&self) -> GameStatus {
        if !self.done {
            return GameStatus::InProgress;
        }
        match meta_winner(&self.meta_board) {
            Some(mark) => GameStatus::Won(mark),
            None => GameStatus::Draw,
        }
    }
}

impl fmt::Display for UltimateBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            if y > 0 && y % GRID_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for x in 0..BOARD_SIZE {
                if x > 0 && x % GRID_SIZE == 0 {
                    write!(f, "| ")?;
                }
                let position = Position::new(x, y);
                let symbol = if self.is_legal(position) {
                    '*'
                } else {
                    self.cell(position).symbol()
                };
                write!(f, "{}", symbol)?;
                if x + 1 < BOARD_SIZE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ultimate::Winner;

    fn drawn_sub_board() -> SubBoard {
        let x = Mark::PlayerOne;
        let o = Mark::PlayerTwo;
        SubBoard::from_cells([[x, o, x], [x, o, o], [o, x, x]])
    }

    fn won_sub_board(mark: Mark) -> SubBoard {
        let e = Mark::Empty;
        SubBoard::from_cells([[mark, mark, mark], [e, e, e], [e, e, e]])
    }

    #[test]
    fn test_empty_board_allows_every_cell() {
        let board = UltimateBoard::new();

        assert_eq!(board.legal_moves().len(), 81);
        assert_eq!(board.active_sub_board(), ActiveSubBoard::Any);
        assert_eq!(board.outcome(), GameStatus::InProgress);
    }

    #[test]
    fn test_legal_moves_are_sub_board_major() {
        let board = UltimateBoard::new();
        let moves = board.legal_moves();

        assert_eq!(moves[0], Position::new(0, 0));
        assert_eq!(moves[1], Position::new(1, 0));
        assert_eq!(moves[3], Position::new(0, 1));
        assert_eq!(moves[9], Position::new(3, 0));
        assert_eq!(moves[80], Position::new(8, 8));
    }

    #[test]
    fn test_first_move_in_corner_restricts_to_corner_sub_board() {
        let mut board = UltimateBoard::new();

        board.apply_move(Position::new(0, 0), Mark::PlayerOne).unwrap();

        assert_eq!(board.active_sub_board(), ActiveSubBoard::Fixed(Position::new(0, 0)));
        assert_eq!(board.legal_moves().len(), 8);
        assert!(board.legal_moves().iter().all(|p| p.sub_board() == Position::new(0, 0)));
        assert!(!board.is_legal(Position::new(0, 0)));
    }

    #[test]
    fn test_inner_position_selects_next_sub_board() {
        let mut board = UltimateBoard::new();

        board.apply_move(Position::new(5, 1), Mark::PlayerOne).unwrap();

        assert_eq!(board.active_sub_board(), ActiveSubBoard::Fixed(Position::new(2, 1)));
        assert!(board.legal_moves().iter().all(|p| p.sub_board() == Position::new(2, 1)));
        assert_eq!(board.legal_moves().len(), 9);
    }

    #[test]
    fn test_illegal_move_leaves_board_unchanged() {
        let mut board = UltimateBoard::new();
        board.apply_move(Position::new(0, 0), Mark::PlayerOne).unwrap();
        let before = board.clone();

        let wrong_sub_board = board.apply_move(Position::new(4, 4), Mark::PlayerTwo);
        let off_board = board.apply_move(Position::new(9, 0), Mark::PlayerTwo);
        let occupied = board.apply_move(Position::new(0, 0), Mark::PlayerTwo);

        assert_eq!(wrong_sub_board, Err(EngineError::IllegalMove { position: Position::new(4, 4) }));
        assert_eq!(off_board, Err(EngineError::IllegalMove { position: Position::new(9, 0) }));
        assert_eq!(occupied, Err(EngineError::IllegalMove { position: Position::new(0, 0) }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_centre_diagonal_win_frees_next_player_from_centre() {
        let e = Mark::Empty;
        let x = Mark::PlayerOne;
        let o = Mark::PlayerTwo;
        let mut sub_boards: [[SubBoard; 3]; 3] = Default::default();
        sub_boards[1][1] = SubBoard::from_cells([[x, o, e], [e, x, e], [e, e, e]]);
        let mut board = UltimateBoard::from_sub_boards(sub_boards);

        board.apply_move(Position::new(5, 5), x).unwrap();

        let centre = board.sub_board(Position::new(1, 1));
        assert_eq!(centre.winner(), Winner::WonBy(Mark::PlayerOne));
        assert!(centre.is_terminal());
        assert_eq!(board.active_sub_board(), ActiveSubBoard::Fixed(Position::new(2, 2)));

        // Inner (1, 1) would target the decided centre sub-board.
        board.apply_move(Position::new(7, 7), Mark::PlayerTwo).unwrap();

        assert_eq!(board.active_sub_board(), ActiveSubBoard::Any);
        assert!(board.legal_moves().iter().all(|p| p.sub_board() != Position::new(1, 1)));
        assert!(!board.legal_moves().is_empty());
    }

    #[test]
    fn test_all_sub_boards_drawn_is_a_draw() {
        let sub_boards = std::array::from_fn(|_| std::array::from_fn(|_| drawn_sub_board()));

        let board = UltimateBoard::from_sub_boards(sub_boards);

        assert!(board.is_done());
        assert_eq!(board.outcome(), GameStatus::Draw);
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_player_two_top_row_wins_game() {
        let sub_boards = std::array::from_fn(|y| {
            std::array::from_fn(|x| match (x, y) {
                (_, 0) => won_sub_board(Mark::PlayerTwo),
                _ if (x + y) % 2 == 0 => won_sub_board(Mark::PlayerOne),
                _ => drawn_sub_board(),
            })
        });

        let board = UltimateBoard::from_sub_boards(sub_boards);

        assert_eq!(board.outcome(), GameStatus::Won(Mark::PlayerTwo));
    }

    #[test]
    fn test_winning_sub_board_move_updates_meta_board() {
        let mut sub_boards: [[SubBoard; 3]; 3] = Default::default();
        let e = Mark::Empty;
        let o = Mark::PlayerTwo;
        sub_boards[0][0] = won_sub_board(o);
        sub_boards[0][1] = won_sub_board(o);
        sub_boards[0][2] = SubBoard::from_cells([[o, o, e], [e, e, e], [e, e, e]]);
        let mut board = UltimateBoard::from_sub_boards(sub_boards);

        board.apply_move(Position::new(8, 0), o).unwrap();

        assert_eq!(board.outcome(), GameStatus::Won(o));
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_random_playouts_keep_legal_moves_non_empty() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;
        use rand::seq::IndexedRandom;

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut board = UltimateBoard::new();
            let mut mark = Mark::PlayerOne;
            while !board.is_done() {
                assert!(!board.legal_moves().is_empty());
                if let ActiveSubBoard::Fixed(slot) = board.active_sub_board() {
                    assert!(!board.sub_board(slot).is_terminal());
                }
                let position = *board.legal_moves().choose(&mut rng).unwrap();
                board.apply_move(position, mark).unwrap();
                mark = mark.opponent().unwrap();
            }
            assert_ne!(board.outcome(), GameStatus::InProgress);
        }
    }
}
