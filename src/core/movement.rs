//! Movement module - line compaction
//!
//! One direction-agnostic pass handles all four move directions: each
//! line is walked as a list of coordinates ordered front-to-back (the
//! front is the wall tiles slide toward), split into segments at
//! immobile cells, and each segment is compacted with a single-scan
//! write cursor. A tile produced by a merge never merges again in the
//! same turn.

use std::collections::BTreeSet;

use crate::core::Board;
use crate::types::{Cell, Direction, MergeEvent, MoveEvent, TileKind};

/// Outcome of compacting the whole board in one direction
#[derive(Debug, Clone, Default)]
pub struct LineResult {
    pub moves: Vec<MoveEvent>,
    pub merges: Vec<MergeEvent>,
    /// Collision cells where a bomb destroyed a tile pair
    pub destroyed: BTreeSet<(usize, usize)>,
    pub changed: bool,
}

/// A tile being carried through a segment scan
#[derive(Debug, Clone, Copy)]
struct Entry {
    cell: Cell,
    orig: (usize, usize),
}

/// Cells that split a line into independent segments: frozen tiles,
/// walls, snails, and slow-advance tiles all sit out the compaction.
fn is_boundary(cell: &Cell, coord: (usize, usize), frozen: &BTreeSet<(usize, usize)>) -> bool {
    if cell.is_empty() {
        return false;
    }
    if frozen.contains(&coord) {
        return true;
    }
    match cell.kind {
        TileKind::Snail | TileKind::Wall => true,
        TileKind::Number(_) => cell.is_slow(),
        TileKind::Empty | TileKind::Bomb => false,
    }
}

/// Every line of the board as front-to-back coordinate lists
fn line_coords(board: &Board, direction: Direction) -> Vec<Vec<(usize, usize)>> {
    let rows = board.rows();
    let cols = board.cols();
    match direction {
        Direction::Left => (0..rows)
            .map(|r| (0..cols).map(|c| (r, c)).collect())
            .collect(),
        Direction::Right => (0..rows)
            .map(|r| (0..cols).rev().map(|c| (r, c)).collect())
            .collect(),
        Direction::Up => (0..cols)
            .map(|c| (0..rows).map(|r| (r, c)).collect())
            .collect(),
        Direction::Down => (0..cols)
            .map(|c| (0..rows).rev().map(|r| (r, c)).collect())
            .collect(),
    }
}

/// Compact every line of the board toward `direction`.
/// `frozen` holds the coordinates immobilized for this turn.
pub fn compact(
    board: &mut Board,
    direction: Direction,
    frozen: &BTreeSet<(usize, usize)>,
) -> LineResult {
    let mut result = LineResult::default();

    for line in line_coords(board, direction) {
        let mut segment: Vec<(usize, usize)> = Vec::with_capacity(line.len());
        for &coord in &line {
            let cell = board.at(coord.0, coord.1);
            if is_boundary(&cell, coord, frozen) {
                compact_segment(board, &segment, &mut result);
                segment.clear();
            } else {
                segment.push(coord);
            }
        }
        compact_segment(board, &segment, &mut result);
    }

    result.changed =
        !result.moves.is_empty() || !result.merges.is_empty() || !result.destroyed.is_empty();
    result
}

/// Compact one segment of movable coordinates, front first
fn compact_segment(board: &mut Board, segment: &[(usize, usize)], result: &mut LineResult) {
    if segment.is_empty() {
        return;
    }

    let entries: Vec<Entry> = segment
        .iter()
        .filter_map(|&(r, c)| {
            let cell = board.at(r, c);
            (!cell.is_empty()).then_some(Entry { cell, orig: (r, c) })
        })
        .collect();

    for &(r, c) in segment {
        board.set(r, c, Cell::EMPTY);
    }

    let mut write = 0;
    let mut i = 0;
    while i < entries.len() {
        let cur = entries[i];
        let next = entries.get(i + 1).copied();

        // Bomb collisions take priority over merges. A bomb destroys
        // whatever it pairs with, another bomb included; segments only
        // ever hold numbers and bombs.
        if let Some(next) = next {
            let bomb_hit = cur.cell.kind.is_bomb() || next.cell.kind.is_bomb();
            if bomb_hit {
                // Both tiles converge on the write cursor and die there;
                // the cursor does not advance
                let dest = segment[write];
                if cur.orig != dest {
                    result.moves.push(MoveEvent {
                        from: cur.orig,
                        to: dest,
                        kind: cur.cell.kind,
                    });
                }
                result.moves.push(MoveEvent {
                    from: next.orig,
                    to: dest,
                    kind: next.cell.kind,
                });
                result.destroyed.insert(dest);
                i += 2;
                continue;
            }

            if let (TileKind::Number(a), TileKind::Number(b)) = (cur.cell.kind, next.cell.kind) {
                if a == b {
                    let dest = segment[write];
                    let merged = Cell {
                        kind: TileKind::Number(a * 2),
                        passive: cur.cell.passive.or(next.cell.passive),
                        frozen: false,
                    };
                    board.set(dest.0, dest.1, merged);
                    if cur.orig != dest {
                        result.moves.push(MoveEvent {
                            from: cur.orig,
                            to: dest,
                            kind: cur.cell.kind,
                        });
                    }
                    result.moves.push(MoveEvent {
                        from: next.orig,
                        to: dest,
                        kind: next.cell.kind,
                    });
                    result.merges.push(MergeEvent {
                        at: dest,
                        new_value: a * 2,
                    });
                    write += 1;
                    i += 2;
                    continue;
                }
            }
        }

        // Plain slide
        let dest = segment[write];
        board.set(dest.0, dest.1, cur.cell);
        if cur.orig != dest {
            result.moves.push(MoveEvent {
                from: cur.orig,
                to: dest,
                kind: cur.cell.kind,
            });
        }
        write += 1;
        i += 1;
    }
}
