//! Expansion module - grid growth
//!
//! When a milestone merge flags an expansion, the host applies it
//! between turns: the board gains one row or column on a random edge,
//! content keeps its relative layout, and the first expansion of a
//! game seeds a wall tile on the new edge. Snails enter the game
//! through expansions once their milestone is unlocked.

use crate::core::{Board, SimpleRng};
use crate::types::{Cell, Direction, Expansion, TileKind};

/// Grow the board one line in a random direction.
/// `prior_expansions` counts expansions already applied this game;
/// `spawn_snail` asks for a snail if the board has none.
pub(crate) fn apply(
    board: &mut Board,
    rng: &mut SimpleRng,
    prior_expansions: u32,
    spawn_snail: bool,
) -> Expansion {
    let direction = *rng.pick(&Direction::ALL);
    board.grow(direction);

    if prior_expansions == 0 {
        let (row, col) = board.new_edge_midpoint(direction);
        board.set(
            row,
            col,
            Cell {
                kind: TileKind::Wall,
                passive: None,
                frozen: false,
            },
        );
    }

    if spawn_snail && !board.has_snail() {
        board.spawn_snail(rng);
    }

    Expansion {
        new_rows: board.rows(),
        new_cols: board.cols(),
        direction,
    }
}
