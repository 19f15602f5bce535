//! Terminal 2048.
//!
//! `core` holds the deterministic game logic (grid, move resolution,
//! scoring, persistence capability); `input` and `term` are thin keyboard
//! and rendering layers around it.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
