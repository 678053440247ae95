//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-counted throttling only
//! - Seeded RNG only
//! - Stable iteration order (column-major over the grid)
//! - No rendering or platform dependencies

pub mod fall;
pub mod grid;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use fall::{ConflictPolicy, step};
pub use grid::{EMPTY, Grid};
pub use score::{GameEvent, GamePhase, ScoreClock};
pub use spawn::{spawn, spawn_intensity};
pub use state::{GameState, RngState};
pub use tick::{TickInput, TickOutcome, is_fall_frame, tick};
