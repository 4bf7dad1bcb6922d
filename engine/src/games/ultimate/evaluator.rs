use super::board::UltimateBoard;
use super::sub_board::SubBoard;
use super::types::{GRID_SIZE, Mark, Winner};

/// All values are player two's chance of winning: 1.0 is a sure win, 0.0 a sure loss.
pub const REFERENCE_MARK: Mark = Mark::PlayerTwo;
pub const DEFAULT_PLY_LIMIT: usize = 2;
pub const DEFAULT_WEIGHTING_PLY_LIMIT: usize = 1;

/// Per sub-board win probabilities, indexed `[y][x]`.
pub type SubBoardWeights = [[f64; GRID_SIZE]; GRID_SIZE];

/// Heuristic scoring of ultimate boards.
///
/// Every sub-board is scored with a shallow look at its own continuations. Those scores then
/// weight the continuations of the meta-board, whose score is the value of the whole position.
/// Decided positions collapse to infinities so a forced result always dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    ply_limit: usize,
    weighting_ply_limit: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_PLY_LIMIT, DEFAULT_WEIGHTING_PLY_LIMIT)
    }
}

impl Evaluator {
    pub fn new(ply_limit: usize, weighting_ply_limit: usize) -> Self {
        Self {
            ply_limit,
            weighting_ply_limit,
        }
    }

    pub fn evaluate(&self, board: &UltimateBoard) -> f64 {
        let weights = self.sub_board_weights(board);
        let probability = self.win_probability(board.meta_board(), Some(&weights), self.ply_limit);

        if probability == 0.0 {
            f64::NEG_INFINITY
        } else if probability == 1.0 {
            f64::INFINITY
        } else {
            probability
        }
    }

    pub fn sub_board_weights(&self, board: &UltimateBoard) -> SubBoardWeights {
        let mut weights = [[0.0; GRID_SIZE]; GRID_SIZE];
        for (y, row) in board.sub_boards().iter().enumerate() {
            for (x, sub_board) in row.iter().enumerate() {
                weights[y][x] = self.win_probability(sub_board, None, self.weighting_ply_limit);
            }
        }
        weights
    }

    /// Average outcome of every continuation, starting with player two to move.
    pub fn win_probability(
        &self,
        board: &SubBoard,
        weights: Option<&SubBoardWeights>,
        ply_limit: usize,
    ) -> f64 {
        probability(board, REFERENCE_MARK, weights, 0, ply_limit)
    }
}

fn probability(
    board: &SubBoard,
    on_turn: Mark,
    weights: Option<&SubBoardWeights>,
    depth: usize,
    ply_limit: usize,
) -> f64 {
    if depth >= ply_limit {
        return 0.5;
    }
    if board.is_terminal() {
        return outcome_value(board.winner());
    }

    let next_turn = on_turn.opponent().unwrap_or(REFERENCE_MARK);
    let mut total = 0.0;
    let mut count = 0usize;

    for position in board.free_cells() {
        let Ok(child) = board.with_move(position, on_turn) else {
            continue;
        };
        let value = probability(&child, next_turn, weights, depth + 1, ply_limit);
        let weight = weights.map_or(1.0, |w| w[position.y][position.x]);
        total += value * weight;
        count += 1;
    }

    if count == 0 {
        return 0.0;
    }
    total / count as f64
}

fn outcome_value(winner: Winner) -> f64 {
    match winner {
        Winner::WonBy(mark) if mark == REFERENCE_MARK => 1.0,
        Winner::WonBy(_) => 0.0,
        Winner::Drawn | Winner::Undecided => 0.5,
    }
}
