//! Scoring module - merge points and milestone checks
//!
//! Points come from one source: every merge credits the merged tile's
//! new value, and a spawn that itself completes a milestone credits
//! its value too. The ledger only ever goes up within a turn.

/// Running score for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreLedger {
    total: u64,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add points to the ledger and return the amount credited
    pub fn credit(&mut self, points: u32) -> u32 {
        self.total = self.total.saturating_add(points as u64);
        points
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Points awarded for a merge producing `new_value`
pub fn merge_points(new_value: u32) -> u32 {
    new_value
}

/// Whether a tile value reaches the current expansion target
pub fn reached_milestone(value: u32, target: u32) -> bool {
    value >= target
}
