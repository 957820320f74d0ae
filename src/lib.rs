//! Deterministic turn-resolution engine for a 2048 variant with
//! bombs, frozen tiles, and a board that grows as milestones fall.
//!
//! The crate is a pure core: no I/O, no timing, no rendering. A host
//! drives it by calling [`GameState::resolve_turn`] with a direction
//! and reading the returned [`TurnResult`] event log; a fixed seed
//! reproduces a whole game.

pub mod core;
pub mod types;

pub use crate::core::{
    Board, GameState, GridSnapshot, MergeChanceEligibility, PassiveEligibility, ScoreLedger,
    SimpleRng, TurnResult,
};
pub use crate::types::{
    Cell, Direction, Expansion, MergeEvent, MoveEvent, MoverUpdate, PassiveCandidate, PassiveKind,
    TileKind,
};
