//! Board module - manages the game grid
//!
//! The grid starts at 4x4 and grows one row or column at a time as
//! expansion milestones are reached. Cells are stored row-major in a
//! flat vector; all coordinates are (row, col).

use std::collections::BTreeSet;

use crate::core::SimpleRng;
use crate::types::{Cell, Direction, TileKind};

/// The game grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![Cell::EMPTY; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if signed coordinates are within bounds
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Get the cell at (row, col), or None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Set the cell at (row, col). Returns false if out of bounds.
    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = cell;
            true
        } else {
            false
        }
    }

    pub(crate) fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn at_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * self.cols + col]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Coordinates of empty cells, skipping the excluded set
    pub fn empty_cells(&self, excluded: &BTreeSet<(usize, usize)>) -> Vec<(usize, usize)> {
        let mut result = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.at(row, col).is_empty() && !excluded.contains(&(row, col)) {
                    result.push((row, col));
                }
            }
        }
        result
    }

    /// Spawn a number tile on a random empty cell outside the excluded set.
    /// Returns the chosen coordinates, or None if no cell qualifies.
    pub(crate) fn spawn_number(
        &mut self,
        rng: &mut SimpleRng,
        value: u32,
        excluded: &BTreeSet<(usize, usize)>,
    ) -> Option<(usize, usize)> {
        let candidates = self.empty_cells(excluded);
        if candidates.is_empty() {
            return None;
        }
        let (row, col) = *rng.pick(&candidates);
        self.set(row, col, Cell::number(value));
        Some((row, col))
    }

    /// Spawn a snail on a random empty cell
    pub(crate) fn spawn_snail(&mut self, rng: &mut SimpleRng) -> Option<(usize, usize)> {
        let candidates = self.empty_cells(&BTreeSet::new());
        if candidates.is_empty() {
            return None;
        }
        let (row, col) = *rng.pick(&candidates);
        self.set(
            row,
            col,
            Cell {
                kind: TileKind::Snail,
                passive: None,
                frozen: false,
            },
        );
        Some((row, col))
    }

    /// Capture the frozen-flag set and clear every flag.
    /// Freezes last exactly one turn, so the resolver takes them here.
    pub(crate) fn take_frozen(&mut self) -> BTreeSet<(usize, usize)> {
        let mut frozen = BTreeSet::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.at_mut(row, col);
                if cell.frozen {
                    cell.frozen = false;
                    frozen.insert((row, col));
                }
            }
        }
        frozen
    }

    /// Coordinates of every snail on the board
    pub fn snail_positions(&self) -> Vec<(usize, usize)> {
        let mut result = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.at(row, col).kind.is_snail() {
                    result.push((row, col));
                }
            }
        }
        result
    }

    pub fn has_snail(&self) -> bool {
        self.cells.iter().any(|c| c.kind.is_snail())
    }

    /// Grow the board by one line on the edge the direction points at.
    /// Existing content keeps its distance from the opposite edge, so
    /// growing Up or Left shifts every tile by one.
    pub(crate) fn grow(&mut self, direction: Direction) {
        match direction {
            Direction::Up => {
                let mut cells = vec![Cell::EMPTY; (self.rows + 1) * self.cols];
                cells[self.cols..].copy_from_slice(&self.cells);
                self.cells = cells;
                self.rows += 1;
            }
            Direction::Down => {
                self.cells.extend(std::iter::repeat(Cell::EMPTY).take(self.cols));
                self.rows += 1;
            }
            Direction::Left => {
                let mut cells = Vec::with_capacity(self.rows * (self.cols + 1));
                for row in 0..self.rows {
                    cells.push(Cell::EMPTY);
                    cells.extend_from_slice(&self.cells[row * self.cols..(row + 1) * self.cols]);
                }
                self.cells = cells;
                self.cols += 1;
            }
            Direction::Right => {
                let mut cells = Vec::with_capacity(self.rows * (self.cols + 1));
                for row in 0..self.rows {
                    cells.extend_from_slice(&self.cells[row * self.cols..(row + 1) * self.cols]);
                    cells.push(Cell::EMPTY);
                }
                self.cells = cells;
                self.cols += 1;
            }
        }
    }

    /// Midpoint cell of the edge created by the most recent grow in
    /// the given direction
    pub(crate) fn new_edge_midpoint(&self, direction: Direction) -> (usize, usize) {
        match direction {
            Direction::Up => (0, self.cols / 2),
            Direction::Down => (self.rows - 1, self.cols / 2),
            Direction::Left => (self.rows / 2, 0),
            Direction::Right => (self.rows / 2, self.cols - 1),
        }
    }

    /// Build a board from rows of cells (testing only)
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert!(!rows.is_empty() && !rows[0].is_empty());
        let cols = rows[0].len();
        assert!(rows.iter().all(|r| r.len() == cols));
        let row_count = rows.len();
        Self {
            rows: row_count,
            cols,
            cells: rows.into_iter().flatten().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4, 4);
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 4);
        assert!(board.cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    #[should_panic]
    fn test_zero_dimension_panics() {
        Board::new(0, 4);
    }

    #[test]
    fn test_get_set() {
        let mut board = Board::new(4, 4);
        assert!(board.set(1, 2, Cell::number(4)));
        assert_eq!(board.get(1, 2).unwrap().kind, TileKind::Number(4));
        assert!(board.get(4, 0).is_none());
        assert!(!board.set(0, 4, Cell::number(2)));
    }

    #[test]
    fn test_empty_cells_respects_exclusions() {
        let mut board = Board::new(2, 2);
        board.set(0, 0, Cell::number(2));
        let mut excluded = BTreeSet::new();
        excluded.insert((0, 1));
        let empties = board.empty_cells(&excluded);
        assert_eq!(empties, vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn test_spawn_number_fills_empty_cell() {
        let mut board = Board::new(2, 2);
        board.set(0, 0, Cell::number(2));
        board.set(0, 1, Cell::number(4));
        board.set(1, 0, Cell::number(8));
        let mut rng = SimpleRng::new(1);
        let spawned = board.spawn_number(&mut rng, 2, &BTreeSet::new()).unwrap();
        assert_eq!(spawned, (1, 1));
        assert_eq!(board.at(1, 1).kind, TileKind::Number(2));
    }

    #[test]
    fn test_spawn_number_full_board() {
        let mut board = Board::new(1, 1);
        board.set(0, 0, Cell::number(2));
        let mut rng = SimpleRng::new(1);
        assert!(board.spawn_number(&mut rng, 2, &BTreeSet::new()).is_none());
    }

    #[test]
    fn test_take_frozen_clears_flags() {
        let mut board = Board::new(2, 2);
        let mut cell = Cell::number(2);
        cell.frozen = true;
        board.set(0, 1, cell);
        let frozen = board.take_frozen();
        assert!(frozen.contains(&(0, 1)));
        assert!(!board.at(0, 1).frozen);
        assert!(board.take_frozen().is_empty());
    }

    #[test]
    fn test_grow_up_shifts_content() {
        let mut board = Board::new(2, 2);
        board.set(0, 0, Cell::number(2));
        board.grow(Direction::Up);
        assert_eq!(board.rows(), 3);
        assert!(board.at(0, 0).is_empty());
        assert_eq!(board.at(1, 0).kind, TileKind::Number(2));
    }

    #[test]
    fn test_grow_right_keeps_content() {
        let mut board = Board::new(2, 2);
        board.set(1, 1, Cell::number(8));
        board.grow(Direction::Right);
        assert_eq!(board.cols(), 3);
        assert_eq!(board.at(1, 1).kind, TileKind::Number(8));
        assert!(board.at(0, 2).is_empty());
        assert!(board.at(1, 2).is_empty());
    }

    #[test]
    fn test_new_edge_midpoint() {
        let mut board = Board::new(4, 4);
        board.grow(Direction::Down);
        assert_eq!(board.new_edge_midpoint(Direction::Down), (4, 2));
        board.grow(Direction::Left);
        assert_eq!(board.new_edge_midpoint(Direction::Left), (2, 0));
    }
}
