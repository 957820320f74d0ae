use crate::core::Board;
use crate::types::Cell;

/// Read-only view of a game for presentation layers.
/// Built by `GameState::snapshot`; never aliases live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major copy of the grid
    pub cells: Vec<Cell>,
    pub score: u64,
    pub expansion_target: u32,
    pub expansion_pending: bool,
    pub seed: u32,
}

impl GridSnapshot {
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub(crate) fn capture(
        board: &Board,
        score: u64,
        expansion_target: u32,
        expansion_pending: bool,
        seed: u32,
    ) -> Self {
        Self {
            rows: board.rows(),
            cols: board.cols(),
            cells: board.cells().to_vec(),
            score,
            expansion_target,
            expansion_pending,
            seed,
        }
    }
}
