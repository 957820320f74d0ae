//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Default starting board dimensions
pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLS: usize = 4;

/// Value of a freshly spawned tile
pub const BASE_SPAWN_VALUE: u32 = 2;

/// First numeric value whose merge triggers grid growth; doubles each time it is reached
pub const INITIAL_EXPANSION_TARGET: u32 = 2048;

/// Snails appear once the expansion target has passed this value
pub const SNAIL_UNLOCK_TARGET: u32 = 4096;

/// Turns between a snail's death and its replacement spawning
pub const SNAIL_RESPAWN_DELAY: u8 = 3;

/// Cardinal move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Per-step row/column delta in the direction of travel
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

}

/// Passive ability tags a Number tile can carry (at most one per tile)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassiveKind {
    /// Tile sits out the main compaction and advances one cell per turn instead
    SlowAdvance,
}

/// What occupies a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Empty,
    /// Mergeable tile; values are always positive powers of two
    Number(u32),
    /// Destroys the tile it collides with during compaction
    Bomb,
    /// Autonomous mover ("snail") that relocates itself each turn
    Snail,
    /// Inert tile; never moves, merges, or is destroyed
    Wall,
}

impl TileKind {
    pub fn is_empty(&self) -> bool {
        matches!(self, TileKind::Empty)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, TileKind::Number(_))
    }

    pub fn is_bomb(&self) -> bool {
        matches!(self, TileKind::Bomb)
    }

    pub fn is_snail(&self) -> bool {
        matches!(self, TileKind::Snail)
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, TileKind::Wall)
    }

    /// Numeric value for Number tiles, None otherwise
    pub fn value(&self) -> Option<u32> {
        match self {
            TileKind::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// One board position: tile kind plus per-cell metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub kind: TileKind,
    /// Optional passive tag; only meaningful on Number tiles
    pub passive: Option<PassiveKind>,
    /// One-turn immobilization flag, cleared at the start of the next turn
    pub frozen: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        kind: TileKind::Empty,
        passive: None,
        frozen: false,
    };

    pub fn number(value: u32) -> Self {
        Cell {
            kind: TileKind::Number(value),
            passive: None,
            frozen: false,
        }
    }

    pub fn bomb() -> Self {
        Cell {
            kind: TileKind::Bomb,
            passive: None,
            frozen: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    pub fn is_slow(&self) -> bool {
        self.kind.is_number() && self.passive == Some(PassiveKind::SlowAdvance)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// A tile relocating from one cell to another during a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvent {
    pub from: (usize, usize),
    pub to: (usize, usize),
    /// Kind of the tile as it moved (pre-merge value for merging tiles)
    pub kind: TileKind,
}

/// Two tiles combining into a doubled value at a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeEvent {
    pub at: (usize, usize),
    pub new_value: u32,
}

/// A snail relocating itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoverUpdate {
    pub from: (usize, usize),
    pub to: (usize, usize),
}

/// A merged tile offered to the caller for passive assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassiveCandidate {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// Outcome of one applied grid growth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expansion {
    pub new_rows: usize,
    pub new_cols: usize,
    pub direction: Direction,
}
