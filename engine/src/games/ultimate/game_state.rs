use super::board::UltimateBoard;
use super::types::{ActiveSubBoard, GameStatus, Mark, Position};
use crate::error::EngineError;

/// Turn order and game status on top of the board. Player one always moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltimateGameState {
    pub board: UltimateBoard,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<Position>,
}

impl Default for UltimateGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl UltimateGameState {
    pub fn new() -> Self {
        Self::from_board(UltimateBoard::new(), Mark::PlayerOne)
    }

    pub fn from_board(board: UltimateBoard, current_mark: Mark) -> Self {
        let status = board.outcome();
        Self {
            board,
            current_mark,
            status,
            last_move: None,
        }
    }

    pub fn place_mark(&mut self, position: Position) -> Result<(), EngineError> {
        if self.status != GameStatus::InProgress {
            return Err(EngineError::NotInProgress);
        }

        self.board.apply_move(position, self.current_mark)?;
        self.last_move = Some(position);
        self.status = self.board.outcome();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_mark = match self.current_mark {
            Mark::PlayerOne => Mark::PlayerTwo,
            _ => Mark::PlayerOne,
        };
    }

    pub fn legal_moves(&self) -> &[Position] {
        self.board.legal_moves()
    }

    pub fn active_sub_board(&self) -> Option<Position> {
        match self.board.active_sub_board() {
            ActiveSubBoard::Fixed(slot) if self.status.is_in_progress() => Some(slot),
            _ => None,
        }
    }

    pub fn get_winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::Won(mark) => Some(mark),
            _ => None,
        }
    }
}
