//! Golden-angle colour palette used for buildings and links that arrive
//! without a colour of their own.
//!
//! Consecutive entries are 137.5 degrees apart in hue, so any run of entries
//! stays visually distinct no matter how many are drawn.

use crate::config::{PALETTE_HUE_STEP, PALETTE_SIZE};

/// Hue in degrees of palette entry `index` (wraps at `PALETTE_SIZE`).
pub fn palette_hue(index: usize) -> f32 {
    ((index % PALETTE_SIZE) as f32 * PALETTE_HUE_STEP) % 360.0
}

/// CSS colour string of palette entry `index` (wraps at `PALETTE_SIZE`).
pub fn palette_color(index: usize) -> String {
    format!("hsl({}, 70%, 60%)", palette_hue(index))
}

/// The full palette, in index order.
pub fn unique_palette() -> Vec<String> {
    (0..PALETTE_SIZE).map(palette_color).collect()
}
