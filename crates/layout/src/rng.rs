//! Deterministic randomness and id stamps.
//!
//! The only random choice the layout makes is the colour of a hand-drawn
//! link; it comes from a seeded `ChaCha8Rng` so replays of the same commands
//! produce the same world. Generated ids are stamped with `LayoutClock`.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::PALETTE_SIZE;
use crate::palette::palette_color;

/// Default seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

#[derive(Resource)]
pub struct LayoutRng(pub ChaCha8Rng);

impl Default for LayoutRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl LayoutRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// A palette colour picked uniformly at random.
    pub fn palette_color(&mut self) -> String {
        palette_color(self.0.gen_range(0..PALETTE_SIZE))
    }
}

/// Source of id stamps and creation times, in milliseconds since the Unix
/// epoch.
///
/// Stamps strictly increase, even when several are taken within the same
/// millisecond. A manual clock ignores wall time entirely, which keeps ids
/// predictable in tests and replays.
#[derive(Resource, Debug, Clone)]
pub struct LayoutClock {
    next: u64,
    wall_time: bool,
}

impl Default for LayoutClock {
    fn default() -> Self {
        Self {
            next: 0,
            wall_time: true,
        }
    }
}

impl LayoutClock {
    /// A clock that yields `start`, `start + 1`, ...
    pub fn manual(start: u64) -> Self {
        Self {
            next: start,
            wall_time: false,
        }
    }

    pub fn stamp(&mut self) -> u64 {
        let now = if self.wall_time { now_millis() } else { 0 };
        let stamp = now.max(self.next);
        self.next = stamp + 1;
        stamp
    }
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
