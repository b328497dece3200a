//! Scratch-card reveal engine.
//!
//! Maps continuous drag coordinates onto a 6x6 tile grid covering a
//! hidden quote. Tiles are uncovered by touch; once the uncovered
//! fraction crosses the reveal threshold the card transitions to
//! `Revealed` exactly once and ignores further input for the session.
//!
//! The engine is a plain synchronous state machine fed one coordinate
//! event at a time -- drag events may arrive in rapid bursts with
//! duplicate or out-of-order hits for the same tile, and set insertion
//! plus the one-time `Revealed` latch make both harmless.

use std::collections::HashSet;

/// Tiles per side of the scratch grid.
pub const GRID_SIZE: usize = 6;

/// Total tile count (36).
pub const TILE_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Fraction of tiles that must be uncovered before the card reveals.
/// 0.65 * 36 = 23.4, so the 24th distinct tile triggers the reveal.
pub const REVEAL_THRESHOLD: f64 = 0.65;

/// Session state of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// Accepting scratch events.
    Covered,
    /// Terminal for the session; further input is ignored.
    Revealed,
}

/// Haptic feedback cue emitted by a scratch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    /// Light tap: first tile of the session, then every third tile.
    Light,
    /// Success pulse: the reveal threshold was just crossed.
    Success,
}

/// Result of feeding one coordinate event to the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScratchOutcome {
    /// Tile index newly uncovered by this event, if any.
    pub tile: Option<usize>,
    /// Feedback cue to play, if any.
    pub pulse: Option<Pulse>,
    /// True exactly once per session, on the event that crossed the
    /// reveal threshold.
    pub just_revealed: bool,
}

/// A scratch card session over a surface of the given dimensions.
///
/// One instance per mount of the reveal surface; remounting means a
/// fresh card with an empty coverage set.
#[derive(Debug, Clone)]
pub struct ScratchCard {
    tile_width: f64,
    tile_height: f64,
    scratched: HashSet<usize>,
    state: CardState,
}

impl ScratchCard {
    /// Create a covered card for a surface of `width` x `height` points.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            tile_width: width / GRID_SIZE as f64,
            tile_height: height / GRID_SIZE as f64,
            scratched: HashSet::new(),
            state: CardState::Covered,
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    /// Number of distinct tiles uncovered this session.
    pub fn scratched_count(&self) -> usize {
        self.scratched.len()
    }

    /// Uncovered fraction in `0.0..=1.0`.
    pub fn coverage(&self) -> f64 {
        self.scratched.len() as f64 / TILE_COUNT as f64
    }

    pub fn is_scratched(&self, tile: usize) -> bool {
        self.scratched.contains(&tile)
    }

    /// Feed one drag event with surface-local coordinates.
    ///
    /// No-ops (empty outcome) when the card is already revealed, the
    /// coordinates fall outside the grid, or the hit tile is already
    /// uncovered. The coverage set only ever grows during a session.
    pub fn scratch(&mut self, x: f64, y: f64) -> ScratchOutcome {
        if self.state == CardState::Revealed {
            return ScratchOutcome::default();
        }

        let col = (x / self.tile_width).floor();
        let row = (y / self.tile_height).floor();
        if col < 0.0 || row < 0.0 || col >= GRID_SIZE as f64 || row >= GRID_SIZE as f64 {
            return ScratchOutcome::default();
        }

        let tile = row as usize * GRID_SIZE + col as usize;
        if !self.scratched.insert(tile) {
            return ScratchOutcome::default();
        }

        let count = self.scratched.len();
        let mut outcome = ScratchOutcome {
            tile: Some(tile),
            ..Default::default()
        };

        if count == 1 || count % 3 == 0 {
            outcome.pulse = Some(Pulse::Light);
        }

        if count as f64 > TILE_COUNT as f64 * REVEAL_THRESHOLD {
            self.state = CardState::Revealed;
            outcome.pulse = Some(Pulse::Success);
            outcome.just_revealed = true;
        }

        outcome
    }
}
