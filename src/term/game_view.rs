//! GameView: maps `core::Game` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Game;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 gives room for a centered value up to 6 digits and keeps the
        // board roughly square on typical terminal glyphs.
        Self {
            cell_w: 7,
            cell_h: 3,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current game state into a framebuffer.
    pub fn render(&self, game: &Game, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_px_w = (GRID_SIZE as u16) * self.cell_w;
        let board_px_h = (GRID_SIZE as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle {
            fg: Rgb::new(187, 173, 160),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let value = game
                    .grid()
                    .tile_at(Position::new(x, y))
                    .map(|tile| tile.value)
                    .unwrap_or(0);
                self.draw_tile(&mut fb, start_x, start_y, x as u16, y as u16, value);
            }
        }

        self.draw_side_panel(&mut fb, game, viewport, start_x, start_y, frame_w);
        self.draw_help_line(&mut fb, viewport, start_y, frame_h);

        if game.game_over() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        value: u32,
    ) {
        let style = tile_style(value);
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;

        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        if value == 0 {
            // Center dot marks an empty cell.
            fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
            return;
        }

        let text = value.to_string();
        let text_w = text.chars().count() as u16;
        let tx = px + (self.cell_w.saturating_sub(text_w)) / 2;
        let ty = py + self.cell_h / 2;
        fb.put_str(tx, ty, &text, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        game: &Game,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        if viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", game.score()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", game.high_score()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TILE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", game.grid().highest_tile()), value);
    }

    fn draw_help_line(&self, fb: &mut FrameBuffer, viewport: Viewport, start_y: u16, frame_h: u16) {
        let help = "arrows/hjkl: move   n: new game   q: quit";
        let y = start_y.saturating_add(frame_h).saturating_add(1);
        if y >= viewport.height {
            return;
        }
        let style = CellStyle {
            fg: Rgb::new(130, 130, 130),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };
        let x = viewport.width.saturating_sub(help.chars().count() as u16) / 2;
        fb.put_str(x, y, help, style);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(120, 30, 30),
            bold: true,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Tile colors loosely follow the familiar 2048 palette; values past 2048
/// share the gold style.
fn tile_style(value: u32) -> CellStyle {
    let (fg, bg) = match value {
        0 => (Rgb::new(110, 100, 95), Rgb::new(45, 42, 38)),
        2 => (Rgb::new(119, 110, 101), Rgb::new(238, 228, 218)),
        4 => (Rgb::new(119, 110, 101), Rgb::new(237, 224, 200)),
        8 => (Rgb::new(249, 246, 242), Rgb::new(242, 177, 121)),
        16 => (Rgb::new(249, 246, 242), Rgb::new(245, 149, 99)),
        32 => (Rgb::new(249, 246, 242), Rgb::new(246, 124, 95)),
        64 => (Rgb::new(249, 246, 242), Rgb::new(246, 94, 59)),
        128 => (Rgb::new(249, 246, 242), Rgb::new(237, 207, 114)),
        256 => (Rgb::new(249, 246, 242), Rgb::new(237, 204, 97)),
        512 => (Rgb::new(249, 246, 242), Rgb::new(237, 200, 80)),
        1024 => (Rgb::new(249, 246, 242), Rgb::new(237, 197, 63)),
        _ => (Rgb::new(249, 246, 242), Rgb::new(237, 194, 46)),
    };
    CellStyle {
        fg,
        bg,
        bold: value >= 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Game, MemoryStore};

    fn fb_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_contains_seeded_tiles_and_panel() {
        let mut game = Game::new(12345, Box::new(MemoryStore::new(0)));
        game.new_game();

        let view = GameView::default();
        let fb = view.render(&game, Viewport::new(80, 24));
        let text = fb_text(&fb);

        assert!(text.contains("SCORE"));
        assert!(text.contains("BEST"));
        // Two starting tiles, each a 2 or 4.
        assert!(text.contains('2') || text.contains('4'));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_render_game_over_overlay() {
        let mut game = Game::new(1, Box::new(MemoryStore::new(0)));
        game.new_game();

        // Drive the game to completion with a generous loop guard.
        let mut guard = 0;
        while !game.game_over() && guard < 10_000 {
            for direction in crate::types::Direction::ALL {
                if game.resolve_move(direction).moved() {
                    game.settle();
                    break;
                }
            }
            guard += 1;
        }

        assert!(game.game_over(), "seeded game should reach game over");
        let view = GameView::default();
        let fb = view.render(&game, Viewport::new(80, 24));
        assert!(fb_text(&fb).contains("GAME OVER"));
    }

    #[test]
    fn test_render_fits_tiny_viewport_without_panic() {
        let mut game = Game::new(7, Box::new(MemoryStore::new(0)));
        game.new_game();

        let view = GameView::default();
        let fb = view.render(&game, Viewport::new(10, 5));
        assert_eq!(fb.width(), 10);
        assert_eq!(fb.height(), 5);
    }
}
