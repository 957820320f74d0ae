//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, networking, or I/O.

pub mod board;
pub mod expansion;
pub mod game_state;
pub mod movement;
pub mod passives;
pub mod rng;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use game_state::{GameState, TurnResult};
pub use movement::{compact, LineResult};
pub use passives::{MergeChanceEligibility, PassiveEligibility};
pub use rng::SimpleRng;
pub use scoring::ScoreLedger;
pub use snapshot::GridSnapshot;
