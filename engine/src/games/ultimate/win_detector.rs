use super::types::{GRID_SIZE, Mark};

pub type Grid = [[Mark; GRID_SIZE]; GRID_SIZE];

/// Returns the mark owning a completed line, if any.
///
/// Rows and columns are checked together for each index, then the two diagonals. The first
/// completed line found wins. During regular play a single move cannot complete lines for
/// both marks, so the order only matters for synthetic grids.
pub fn check_win(grid: &Grid) -> Option<Mark> {
    for i in 0..GRID_SIZE {
        if let Some(mark) = line_owner([grid[i][0], grid[i][1], grid[i][2]]) {
            return Some(mark);
        }
        if let Some(mark) = line_owner([grid[0][i], grid[1][i], grid[2][i]]) {
            return Some(mark);
        }
    }

    line_owner([grid[0][0], grid[1][1], grid[2][2]])
        .or_else(|| line_owner([grid[0][2], grid[1][1], grid[2][0]]))
}

fn line_owner(line: [Mark; GRID_SIZE]) -> Option<Mark> {
    let first = line[0];
    if first != Mark::Empty && line.iter().all(|&cell| cell == first) {
        Some(first)
    } else {
        None
    }
}
