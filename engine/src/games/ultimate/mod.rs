mod board;
mod bot_controller;
mod evaluator;
mod game_state;
mod meta_board;
mod sub_board;
mod types;
mod win_detector;

pub use board::UltimateBoard;
pub use bot_controller::{BotInput, BotType, calculate_heuristic_move, calculate_move};
pub use evaluator::{
    DEFAULT_PLY_LIMIT, DEFAULT_WEIGHTING_PLY_LIMIT, Evaluator, REFERENCE_MARK, SubBoardWeights,
};
pub use game_state::UltimateGameState;
pub use meta_board::derive_meta_board;
pub use sub_board::SubBoard;
pub use types::{ActiveSubBoard, BOARD_SIZE, GRID_SIZE, GameStatus, Mark, Position, Winner};
pub use win_detector::{Grid, check_win};
