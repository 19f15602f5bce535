//! Terminal 2048 runner.
//!
//! Owns the event loop: keyboard input, the synchronous move resolution,
//! and the deferred settle step that inserts the post-move tile.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_2048::core::{Game, JsonFileStore, SimpleRng};
use tui_2048::input::map_key;
use tui_2048::term::{GameView, TerminalRenderer, Viewport};
use tui_2048::types::{Command, SETTLE_DELAY_MS, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let store = JsonFileStore::new(JsonFileStore::default_location());
    let mut game = Game::new(seed_from_env(), Box::new(store));
    game.new_game();

    let view = GameView::default();
    let settle_delay = Duration::from_millis(SETTLE_DELAY_MS);
    let mut settle_at: Option<Instant> = None;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with a short poll timeout so pending settles stay timely.
        if event::poll(Duration::from_millis(TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match map_key(key) {
                        Some(Command::Quit) => return Ok(()),
                        Some(Command::NewGame) => {
                            settle_at = None;
                            game.new_game();
                        }
                        Some(Command::Move(direction)) => {
                            // A move arriving inside the delay window settles
                            // the previous move first, preserving move order.
                            if settle_at.take().is_some() {
                                game.settle();
                            }
                            if game.resolve_move(direction).moved() {
                                settle_at = Some(Instant::now() + settle_delay);
                            }
                        }
                        None => {}
                    }
                }
            }
        }

        // Deferred settle: insert the new tile and re-check game over.
        if let Some(deadline) = settle_at {
            if Instant::now() >= deadline {
                settle_at = None;
                game.settle();
            }
        }
    }
}

/// Seed from `TUI_2048_SEED` when set (replayable games), otherwise from
/// the clock.
fn seed_from_env() -> u32 {
    std::env::var("TUI_2048_SEED")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| {
            let mut rng = SimpleRng::from_time();
            rng.next_u32()
        })
}
