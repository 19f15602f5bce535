//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Cells per side of the square grid
pub const GRID_SIZE: i8 = 4;

/// Tiles seeded onto a fresh board
pub const START_TILES: usize = 2;

/// Probability (percent) that an inserted tile is a 4 instead of a 2
pub const FOUR_TILE_PERCENT: u32 = 10;

/// Delay between a resolved move and the deferred tile insertion (milliseconds)
pub const SETTLE_DELAY_MS: u64 = 100;

/// Input poll granularity for the event loop (milliseconds)
pub const TICK_MS: u64 = 16;

/// Key under which the high score is persisted
pub const HIGH_SCORE_KEY: &str = "highScore";

/// A cell coordinate. (0, 0) is the top-left corner; x grows rightward,
/// y grows downward. Out-of-range coordinates are representable and read
/// as absent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// The position one step along `(dx, dy)`.
    pub fn offset(self, (dx, dy): (i8, i8)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A numbered tile. `merged` marks a tile that was the destination of a
/// merge during the current move pass and must not merge again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub value: u32,
    pub merged: bool,
}

impl Tile {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            merged: false,
        }
    }
}

/// Cell on the grid (None = empty, Some = occupied by a tile)
pub type Cell = Option<Tile>;

/// Move directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit vector for this direction.
    pub fn vector(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Parse a direction token (case-insensitive). Unknown tokens are
    /// rejected rather than defaulted.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Result of the synchronous half of a move. `NoOp` is an explicit signal:
/// nothing slid or merged, so no tile insertion follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    NoOp,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved)
    }
}

/// Player commands delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    NewGame,
    Quit,
}
