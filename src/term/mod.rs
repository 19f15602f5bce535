//! Terminal rendering module.
//!
//! Rendering happens in two stages: `game_view` projects the game state into
//! a plain framebuffer (pure, unit-testable), and `renderer` flushes that
//! framebuffer to the real terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
