//! Passives module - candidate selection for passive assignment
//!
//! The engine never assigns a passive on its own. Each turn it rolls
//! for candidate tiles and reports them; the caller decides which of
//! them (if any) actually receives a tag via `assign_passive`.

use std::collections::BTreeSet;

use crate::core::{Board, SimpleRng};
use crate::types::{MergeEvent, PassiveCandidate};

/// Rule deciding which tiles become passive candidates after a turn's
/// merges. Injected at construction so hosts can swap the policy.
pub trait PassiveEligibility {
    fn candidates(
        &self,
        board: &Board,
        merges: &[MergeEvent],
        excluded: &BTreeSet<(usize, usize)>,
        rng: &mut SimpleRng,
    ) -> Vec<PassiveCandidate>;
}

/// Default rule: every merge rolls with probability `new_value`
/// permille. Whole thousands are guaranteed picks, the remainder is a
/// fractional roll. Each successful roll picks a uniformly random
/// untagged Number tile outside the excluded set.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeChanceEligibility;

impl PassiveEligibility for MergeChanceEligibility {
    fn candidates(
        &self,
        board: &Board,
        merges: &[MergeEvent],
        excluded: &BTreeSet<(usize, usize)>,
        rng: &mut SimpleRng,
    ) -> Vec<PassiveCandidate> {
        let mut picked: BTreeSet<(usize, usize)> = BTreeSet::new();
        let mut result = Vec::new();

        for merge in merges {
            let mut rolls = merge.new_value / 1000;
            if rng.next_range(1000) < merge.new_value % 1000 {
                rolls += 1;
            }

            for _ in 0..rolls {
                let eligible = eligible_cells(board, excluded, &picked);
                if eligible.is_empty() {
                    break;
                }
                let (row, col) = *rng.pick(&eligible);
                picked.insert((row, col));
                let value = board
                    .get(row, col)
                    .and_then(|c| c.kind.value())
                    .unwrap_or(0);
                result.push(PassiveCandidate { row, col, value });
            }
        }

        result
    }
}

fn eligible_cells(
    board: &Board,
    excluded: &BTreeSet<(usize, usize)>,
    picked: &BTreeSet<(usize, usize)>,
) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let coord = (row, col);
            if excluded.contains(&coord) || picked.contains(&coord) {
                continue;
            }
            let cell = board.at(row, col);
            if cell.kind.is_number() && cell.passive.is_none() {
                cells.push(coord);
            }
        }
    }
    cells
}
