//! Finger Stars - falling stars that pour out of your index fingertip
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, falling rule, spawner, score clock)
//! - `input`: Hand detections and the newest-wins hands slot
//! - `renderer`: WebGPU star rendering
//! - `hud`: Score and end-of-game text
//! - `demo`: Scripted headless session for native builds

pub mod demo;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod sim;

pub use hud::HudText;
pub use input::{Hand, HandFrame, LatestHands};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions in pixels
    pub const CANVAS_WIDTH: u32 = 640;
    pub const CANVAS_HEIGHT: u32 = 480;

    /// Edge length of one grid cell in pixels (also the star size)
    pub const CELL_SIZE: u32 = 10;

    /// Grid dimensions derived from the canvas
    pub const GRID_COLS: usize = (CANVAS_WIDTH / CELL_SIZE) as usize;
    pub const GRID_ROWS: usize = (CANVAS_HEIGHT / CELL_SIZE) as usize;

    /// Stars fall one cell every this many frames
    pub const FALL_EVERY_FRAMES: u64 = 5;

    /// Score awarded once per interval (milliseconds)
    pub const SCORE_INTERVAL_MS: f64 = 5000.0;
    /// Reaching this score ends the game
    pub const SCORE_CAP: u8 = 5;

    /// Spawn intensity is `(frame % INTENSITY_CYCLE) + INTENSITY_FLOOR`
    pub const INTENSITY_CYCLE: u64 = 205;
    pub const INTENSITY_FLOOR: u8 = 50;

    /// Hand pose model layout
    pub const KEYPOINTS_PER_HAND: usize = 21;
    pub const INDEX_FINGERTIP: usize = 8;
}

/// Clamp a pixel coordinate into a cell index in `[0, len)`.
///
/// NaN maps to 0; negative and oversized values are pinned to the edges.
#[inline]
pub fn pixel_to_cell(px: f32, cell_size: u32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let cell = (px / cell_size as f32).floor();
    if cell.is_nan() || cell < 0.0 {
        0
    } else {
        (cell as usize).min(len - 1)
    }
}

/// Pixel-space center of cell `(i, j)`
#[inline]
pub fn cell_center(i: usize, j: usize, cell_size: u32) -> Vec2 {
    let size = cell_size as f32;
    Vec2::new(i as f32 * size + size / 2.0, j as f32 * size + size / 2.0)
}
