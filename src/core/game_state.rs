//! Game state module - turn resolution and player abilities
//!
//! `GameState` owns the board, the RNG, and the score ledger, and
//! resolves one turn at a time. A turn runs as four phases on a
//! working copy of the board: line compaction, autonomous movers,
//! slow-advance steps, then spawn-and-settle. Either the whole turn
//! commits or nothing does; a rejected turn leaves the state (and the
//! RNG) untouched, apart from frozen flags which always expire.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::core::{expansion, movement, scoring};
use crate::core::{Board, GridSnapshot, MergeChanceEligibility, PassiveEligibility, ScoreLedger, SimpleRng};
use crate::types::{
    Cell, Direction, Expansion, MergeEvent, MoveEvent, MoverUpdate, PassiveCandidate, PassiveKind,
    TileKind, BASE_SPAWN_VALUE, INITIAL_EXPANSION_TARGET, SNAIL_RESPAWN_DELAY,
    SNAIL_UNLOCK_TARGET,
};

/// Everything that happened during one resolved turn
#[derive(Debug, Clone, Default)]
pub struct TurnResult {
    /// False means the turn was rejected and nothing below applies
    pub board_changed: bool,
    pub moves: Vec<MoveEvent>,
    pub merges: Vec<MergeEvent>,
    /// Cells where a collision destroyed tiles this turn
    pub destroyed: BTreeSet<(usize, usize)>,
    pub mover_updates: Vec<MoverUpdate>,
    /// Snail-onto-bomb collisions (from = snail, to = bomb); both died
    pub mover_kills: Vec<MoverUpdate>,
    pub slow_moves: Vec<MoveEvent>,
    pub slow_merges: Vec<MergeEvent>,
    pub spawned_tile: Option<(usize, usize)>,
    pub spawned_snail: Option<(usize, usize)>,
    pub passive_candidates: Vec<PassiveCandidate>,
    pub points_gained: u32,
    pub expansion_pending: bool,
}

/// Complete engine state for one game
pub struct GameState {
    board: Board,
    rng: SimpleRng,
    ledger: ScoreLedger,
    expansion_target: u32,
    expansion_pending: bool,
    expansion_count: u32,
    snail_respawn_timer: Option<u8>,
    eligibility: Box<dyn PassiveEligibility>,
}

impl GameState {
    /// Create a new game with two base tiles already on the board
    pub fn new(rows: usize, cols: usize, seed: u32) -> Self {
        Self::with_eligibility(rows, cols, seed, Box::new(MergeChanceEligibility))
    }

    /// Create a new game with a custom passive-candidate rule
    pub fn with_eligibility(
        rows: usize,
        cols: usize,
        seed: u32,
        eligibility: Box<dyn PassiveEligibility>,
    ) -> Self {
        let mut state = Self {
            board: Board::new(rows, cols),
            rng: SimpleRng::new(seed),
            ledger: ScoreLedger::new(),
            expansion_target: INITIAL_EXPANSION_TARGET,
            expansion_pending: false,
            expansion_count: 0,
            snail_respawn_timer: None,
            eligibility,
        };
        let empty = BTreeSet::new();
        state.board.spawn_number(&mut state.rng, BASE_SPAWN_VALUE, &empty);
        state.board.spawn_number(&mut state.rng, BASE_SPAWN_VALUE, &empty);
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    pub fn score(&self) -> u64 {
        self.ledger.total()
    }

    pub fn expansion_target(&self) -> u32 {
        self.expansion_target
    }

    pub fn expansion_pending(&self) -> bool {
        self.expansion_pending
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(
            &self.board,
            self.ledger.total(),
            self.expansion_target,
            self.expansion_pending,
            self.rng.seed(),
        )
    }

    /// Resolve one player move. Returns a rejected result (nothing
    /// committed, `board_changed == false`) when neither compaction
    /// nor a slow-advance step would change the grid.
    pub fn resolve_turn(&mut self, direction: Direction) -> TurnResult {
        // Freezes last one turn and expire even on rejected moves
        let frozen = self.board.take_frozen();

        let mut work = self.board.clone();
        let line = movement::compact(&mut work, direction, &frozen);

        // Validity is settled before any RNG draw so rejected turns
        // never advance the random sequence. Snail movement alone
        // never makes a turn valid.
        if !line.changed && !slow_pass_would_change(&work, direction, &frozen) {
            return TurnResult::default();
        }

        let mut result = TurnResult {
            board_changed: true,
            moves: line.moves,
            merges: line.merges,
            destroyed: line.destroyed,
            ..TurnResult::default()
        };

        self.run_mover_pass(&mut work, &frozen, &mut result);
        run_slow_pass(&mut work, direction, &frozen, &mut result);
        self.spawn_and_settle(&mut work, &mut result);

        self.board = work;
        result.expansion_pending = self.expansion_pending;
        result
    }

    /// Each surviving snail relocates to a random adjacent cell that
    /// is empty or holds a bomb; stepping onto a bomb destroys both.
    fn run_mover_pass(
        &mut self,
        work: &mut Board,
        frozen: &BTreeSet<(usize, usize)>,
        result: &mut TurnResult,
    ) {
        for (row, col) in work.snail_positions() {
            if frozen.contains(&(row, col)) {
                continue;
            }
            let mut candidates: ArrayVec<(usize, usize), 4> = ArrayVec::new();
            for (dr, dc) in [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
                let (nr, nc) = (row as isize + dr, col as isize + dc);
                if !work.in_bounds(nr, nc) {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                let kind = work.at(nr, nc).kind;
                if kind.is_empty() || kind.is_bomb() {
                    candidates.push((nr, nc));
                }
            }
            if candidates.is_empty() {
                continue;
            }
            let (tr, tc) = *self.rng.pick(&candidates);
            if work.at(tr, tc).kind.is_bomb() {
                work.set(row, col, Cell::EMPTY);
                work.set(tr, tc, Cell::EMPTY);
                result.destroyed.insert((tr, tc));
                result.mover_kills.push(MoverUpdate {
                    from: (row, col),
                    to: (tr, tc),
                });
            } else {
                let snail = work.at(row, col);
                work.set(row, col, Cell::EMPTY);
                work.set(tr, tc, snail);
                result.mover_updates.push(MoverUpdate {
                    from: (row, col),
                    to: (tr, tc),
                });
            }
        }
    }

    /// Spawn, milestone bookkeeping, snail respawn countdown, and the
    /// passive-candidate roll
    fn spawn_and_settle(&mut self, work: &mut Board, result: &mut TurnResult) {
        // Respawn countdown ticks on valid turns only
        if let Some(timer) = self.snail_respawn_timer {
            if timer <= 1 {
                self.snail_respawn_timer = None;
                if !work.has_snail() {
                    result.spawned_snail = work.spawn_snail(&mut self.rng);
                }
            } else {
                self.snail_respawn_timer = Some(timer - 1);
            }
        }

        result.spawned_tile = work.spawn_number(&mut self.rng, BASE_SPAWN_VALUE, &result.destroyed);

        let mut points: u32 = 0;
        let mut milestone = false;
        for merge in result.merges.iter().chain(result.slow_merges.iter()) {
            points = points.saturating_add(scoring::merge_points(merge.new_value));
            if scoring::reached_milestone(merge.new_value, self.expansion_target) {
                milestone = true;
            }
        }
        if result.spawned_tile.is_some()
            && scoring::reached_milestone(BASE_SPAWN_VALUE, self.expansion_target)
        {
            points = points.saturating_add(BASE_SPAWN_VALUE);
            milestone = true;
        }
        result.points_gained = self.ledger.credit(points);

        if milestone {
            self.expansion_pending = true;
            self.expansion_target = self.expansion_target.saturating_mul(2);
        }

        // A turn that killed the last snail arms the respawn countdown
        let snail_died = !result.mover_kills.is_empty();
        if snail_died && !work.has_snail() && self.snails_unlocked() {
            self.snail_respawn_timer = Some(SNAIL_RESPAWN_DELAY);
        }

        let mut excluded: BTreeSet<(usize, usize)> = result
            .merges
            .iter()
            .chain(result.slow_merges.iter())
            .map(|m| m.at)
            .collect();
        if let Some(coord) = result.spawned_tile {
            excluded.insert(coord);
        }
        result.passive_candidates =
            self.eligibility
                .candidates(work, &all_merges(result), &excluded, &mut self.rng);
    }

    /// Apply a pending expansion between turns. No-op without one.
    pub fn apply_expansion(&mut self) -> Option<Expansion> {
        if !self.expansion_pending {
            return None;
        }
        self.expansion_pending = false;
        let spawn_snail = self.snails_unlocked();
        let applied = expansion::apply(
            &mut self.board,
            &mut self.rng,
            self.expansion_count,
            spawn_snail,
        );
        self.expansion_count += 1;
        Some(applied)
    }

    fn snails_unlocked(&self) -> bool {
        self.expansion_target > SNAIL_UNLOCK_TARGET
    }

    /// Place a bomb on an empty cell. Returns false if the cell is
    /// out of bounds or occupied.
    pub fn place_bomb(&mut self, row: usize, col: usize) -> bool {
        match self.board.get(row, col) {
            Some(cell) if cell.is_empty() => self.board.set(row, col, Cell::bomb()),
            _ => false,
        }
    }

    /// Freeze a number tile or snail for the next turn. Returns false
    /// for other tile kinds or an already frozen cell.
    pub fn freeze_cell(&mut self, row: usize, col: usize) -> bool {
        match self.board.get(row, col) {
            Some(cell)
                if !cell.frozen && (cell.kind.is_number() || cell.kind.is_snail()) =>
            {
                self.board.at_mut(row, col).frozen = true;
                true
            }
            _ => false,
        }
    }

    /// Give an untagged number tile a passive. Returns false for
    /// non-number cells and cells that already carry a tag.
    pub fn assign_passive(&mut self, row: usize, col: usize, passive: PassiveKind) -> bool {
        match self.board.get(row, col) {
            Some(cell) if cell.kind.is_number() && cell.passive.is_none() => {
                self.board.at_mut(row, col).passive = Some(passive);
                true
            }
            _ => false,
        }
    }

    /// Overwrite a cell directly (setup and debugging)
    pub fn set_tile(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        self.board.set(row, col, cell)
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

fn all_merges(result: &TurnResult) -> Vec<MergeEvent> {
    result
        .merges
        .iter()
        .chain(result.slow_merges.iter())
        .copied()
        .collect()
}

/// Slow tiles processed front-most first so a column of them can all
/// advance in one turn
fn slow_positions(board: &Board, direction: Direction) -> Vec<(usize, usize)> {
    let mut positions: Vec<(usize, usize)> = Vec::new();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            if board.at(row, col).is_slow() {
                positions.push((row, col));
            }
        }
    }
    match direction {
        Direction::Up => positions.sort_by_key(|&(r, _)| r),
        Direction::Down => positions.sort_by_key(|&(r, _)| std::cmp::Reverse(r)),
        Direction::Left => positions.sort_by_key(|&(_, c)| c),
        Direction::Right => positions.sort_by_key(|&(_, c)| std::cmp::Reverse(c)),
    }
    positions
}

/// What a slow tile at (row, col) would do this turn
enum SlowStep {
    Blocked,
    MoveTo(usize, usize),
    MergeInto(usize, usize, u32),
    BombAt(usize, usize),
}

fn slow_step(board: &Board, row: usize, col: usize, direction: Direction) -> SlowStep {
    let (dr, dc) = direction.delta();
    let (nr, nc) = (row as isize + dr, col as isize + dc);
    if !board.in_bounds(nr, nc) {
        return SlowStep::Blocked;
    }
    let (nr, nc) = (nr as usize, nc as usize);
    let target = board.at(nr, nc);
    let value = match board.at(row, col).kind.value() {
        Some(v) => v,
        None => return SlowStep::Blocked,
    };
    match target.kind {
        TileKind::Empty => SlowStep::MoveTo(nr, nc),
        TileKind::Number(t) if t == value && !target.is_slow() => {
            SlowStep::MergeInto(nr, nc, value * 2)
        }
        TileKind::Bomb => SlowStep::BombAt(nr, nc),
        _ => SlowStep::Blocked,
    }
}

/// Deterministic dry run used for turn validity
fn slow_pass_would_change(
    board: &Board,
    direction: Direction,
    frozen: &BTreeSet<(usize, usize)>,
) -> bool {
    slow_positions(board, direction)
        .into_iter()
        .filter(|coord| !frozen.contains(coord))
        .any(|(r, c)| !matches!(slow_step(board, r, c, direction), SlowStep::Blocked))
}

/// Slow-advance phase: every unfrozen slow tile steps exactly one
/// cell in the turn direction
fn run_slow_pass(
    work: &mut Board,
    direction: Direction,
    frozen: &BTreeSet<(usize, usize)>,
    result: &mut TurnResult,
) {
    for (row, col) in slow_positions(work, direction) {
        if frozen.contains(&(row, col)) {
            continue;
        }
        match slow_step(work, row, col, direction) {
            SlowStep::Blocked => {}
            SlowStep::MoveTo(nr, nc) => {
                let cell = work.at(row, col);
                work.set(row, col, Cell::EMPTY);
                work.set(nr, nc, cell);
                result.slow_moves.push(MoveEvent {
                    from: (row, col),
                    to: (nr, nc),
                    kind: cell.kind,
                });
            }
            SlowStep::MergeInto(nr, nc, new_value) => {
                // The tag survives the merge
                work.set(row, col, Cell::EMPTY);
                work.set(
                    nr,
                    nc,
                    Cell {
                        kind: TileKind::Number(new_value),
                        passive: Some(PassiveKind::SlowAdvance),
                        frozen: false,
                    },
                );
                result.slow_moves.push(MoveEvent {
                    from: (row, col),
                    to: (nr, nc),
                    kind: TileKind::Number(new_value / 2),
                });
                result.slow_merges.push(MergeEvent {
                    at: (nr, nc),
                    new_value,
                });
            }
            SlowStep::BombAt(nr, nc) => {
                let kind = work.at(row, col).kind;
                work.set(row, col, Cell::EMPTY);
                work.set(nr, nc, Cell::EMPTY);
                result.slow_moves.push(MoveEvent {
                    from: (row, col),
                    to: (nr, nc),
                    kind,
                });
                result.destroyed.insert((nr, nc));
            }
        }
    }
}
