//! Core module - game rules and state
//!
//! Everything here is deterministic given a seed; the only I/O is the
//! high-score store, which is injected as a capability.

pub mod game;
pub mod grid;
pub mod rng;
pub mod score;

// Re-export commonly used types
pub use game::Game;
pub use grid::{Grid, NextPosition, Traversal};
pub use rng::SimpleRng;
pub use score::{HighScoreStore, JsonFileStore, MemoryStore};
