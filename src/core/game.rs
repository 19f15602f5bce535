//! Game module - move resolution, scoring, and terminal state
//!
//! `Game` owns the grid, the RNG, and both scores; collaborators reach it
//! through explicit methods rather than shared state. A move runs in two
//! phases: `resolve_move` slides and merges synchronously, then the caller
//! invokes `settle` after its animation delay to insert the new tile and
//! re-evaluate game over.

use crate::core::grid::{Grid, NextPosition};
use crate::core::rng::SimpleRng;
use crate::core::score::HighScoreStore;
use crate::types::{Direction, MoveOutcome, Position, Tile, GRID_SIZE};

/// Complete game state
pub struct Game {
    grid: Grid,
    rng: SimpleRng,
    score: u32,
    high_score: u32,
    store: Box<dyn HighScoreStore>,
    game_over: bool,
    settle_pending: bool,
}

impl Game {
    /// Create a game with the given RNG seed and persistence store.
    ///
    /// The board starts empty; call `new_game` to seed the starting tiles.
    pub fn new(seed: u32, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = store.load();
        Self {
            grid: Grid::new(),
            rng: SimpleRng::new(seed),
            score: 0,
            high_score,
            store,
            game_over: false,
            settle_pending: false,
        }
    }

    /// Reset to a fresh playable state: empty board, starting tiles, score 0.
    /// The high score carries over.
    pub fn new_game(&mut self) {
        self.game_over = false;
        self.settle_pending = false;
        self.score = 0;
        self.grid.clear();
        self.grid.seed_starting_tiles(&mut self.rng);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// True between a resolved move and its deferred `settle`.
    pub fn settle_pending(&self) -> bool {
        self.settle_pending
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Synchronous half of a move: slide every tile along `direction`,
    /// merging equal neighbors once each.
    ///
    /// Returns `Moved` iff any tile changed position or merged; the caller
    /// is then expected to invoke `settle` after its delay. Returns `NoOp`
    /// when nothing changed, when the game is over, or while a settle is
    /// still pending.
    pub fn resolve_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.game_over || self.settle_pending {
            return MoveOutcome::NoOp;
        }

        let traversal = self.grid.traversal_order(direction);
        self.grid.prepare_tiles();

        let mut moved = false;
        for &x in traversal.xs.iter() {
            for &y in traversal.ys.iter() {
                let pos = Position::new(x, y);
                let Some(tile) = self.grid.tile_at(pos) else {
                    continue;
                };

                let NextPosition { new_position, next } =
                    self.grid.next_position(pos, direction);

                let merge_target = next
                    .and_then(|p| self.grid.tile_at(p).map(|t| (p, t)))
                    .filter(|(_, t)| t.value == tile.value && !t.merged);

                if let Some((target_pos, target)) = merge_target {
                    // Merge: remove the source, double the destination in
                    // place, and mark it so it cannot merge again this pass.
                    self.grid.take(pos);
                    let merged_value = target.value * 2;
                    self.grid.set(
                        target_pos,
                        Some(Tile {
                            value: merged_value,
                            merged: true,
                        }),
                    );
                    self.update_score(self.score + merged_value);
                    moved = true;
                } else if self.grid.move_tile(pos, new_position) {
                    moved = true;
                }
            }
        }

        if moved {
            self.settle_pending = true;
            MoveOutcome::Moved
        } else {
            MoveOutcome::NoOp
        }
    }

    /// Deferred half of a move: insert one random tile, then check for the
    /// terminal condition. Returns false when no settle was pending.
    pub fn settle(&mut self) -> bool {
        if !self.settle_pending {
            return false;
        }
        self.settle_pending = false;

        self.grid.insert_random_tile(&mut self.rng);
        if !self.moves_available() {
            self.game_over = true;
        }
        true
    }

    /// True while the player can still act: an empty cell exists or some
    /// adjacent pair can merge.
    pub fn moves_available(&self) -> bool {
        self.grid.cells_available() || self.tile_matches_available()
    }

    /// Scan every occupied cell against its four orthogonal neighbors,
    /// returning on the first equal-valued pair.
    pub fn tile_matches_available(&self) -> bool {
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                let pos = Position::new(x, y);
                let Some(tile) = self.grid.tile_at(pos) else {
                    continue;
                };

                for direction in Direction::ALL {
                    let neighbor = pos.offset(direction.vector());
                    if let Some(other) = self.grid.tile_at(neighbor) {
                        if other.value == tile.value {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// Set the current score, raising and persisting the high score when
    /// exceeded.
    pub fn update_score(&mut self, new_score: u32) {
        self.score = new_score;
        if self.score > self.high_score {
            self.high_score = self.score;
            // A failed write costs the record, not the game.
            let _ = self.store.save(self.high_score);
        }
    }
}
