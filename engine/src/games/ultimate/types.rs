use std::fmt;

use serde::{Deserialize, Serialize};

pub const GRID_SIZE: usize = 3;
pub const BOARD_SIZE: usize = GRID_SIZE * GRID_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    #[default]
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::PlayerOne => Some(Mark::PlayerTwo),
            Mark::PlayerTwo => Some(Mark::PlayerOne),
            Mark::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::PlayerOne => 'X',
            Mark::PlayerTwo => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => write!(f, "nobody"),
            Mark::PlayerOne => write!(f, "player one"),
            Mark::PlayerTwo => write!(f, "player two"),
        }
    }
}

/// Column/row pair. Used for global cells (0..9), sub-board slots and inner cells (0..3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Builds a global position from a sub-board slot and a cell inside it.
    pub fn global(sub_board: Position, inner: Position) -> Self {
        Self {
            x: sub_board.x * GRID_SIZE + inner.x,
            y: sub_board.y * GRID_SIZE + inner.y,
        }
    }

    pub fn sub_board(&self) -> Position {
        Position::new(self.x / GRID_SIZE, self.y / GRID_SIZE)
    }

    pub fn inner(&self) -> Position {
        Position::new(self.x % GRID_SIZE, self.y % GRID_SIZE)
    }

    pub fn is_on_board(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winner {
    #[default]
    Undecided,
    WonBy(Mark),
    Drawn,
}

impl Winner {
    pub fn is_decided(&self) -> bool {
        !matches!(self, Winner::Undecided)
    }

    /// The mark a decided grid contributes to the meta-board. Draws count as empty.
    pub fn meta_mark(&self) -> Mark {
        match self {
            Winner::WonBy(mark) => *mark,
            Winner::Undecided | Winner::Drawn => Mark::Empty,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Mark),
    Draw,
}

impl GameStatus {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won(mark) => write!(f, "{} won", mark),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

/// The sub-board the next move must go to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSubBoard {
    #[default]
    Any,
    Fixed(Position),
}

impl ActiveSubBoard {
    pub fn position(&self) -> Option<Position> {
        match self {
            ActiveSubBoard::Any => None,
            ActiveSubBoard::Fixed(position) => Some(*position),
        }
    }
}
