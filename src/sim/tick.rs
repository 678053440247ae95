//! Per-frame simulation tick
//!
//! Order within a frame: score clock, spawner, fall step (throttled).
//! The score clock runs first so the frame that ends the game spawns nothing.

use glam::Vec2;

use super::fall::step;
use super::score::GameEvent;
use super::spawn::spawn;
use super::state::GameState;
use crate::consts::FALL_EVERY_FRAMES;

/// Inputs for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock time of this frame in milliseconds
    pub now_ms: f64,
    /// Index fingertips in canvas pixels, one per detected hand
    pub fingertips: Vec<Vec2>,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Score transition, if any
    pub event: Option<GameEvent>,
    /// Stars placed this frame
    pub spawned: usize,
    /// True when the fall step ran
    pub fell: bool,
}

/// True on frames where stars fall
#[inline]
pub fn is_fall_frame(frame: u64) -> bool {
    frame % FALL_EVERY_FRAMES == 0
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    state.frame += 1;
    let mut outcome = TickOutcome {
        event: state.score.update(input.now_ms),
        ..Default::default()
    };

    if state.is_game_over() {
        return outcome;
    }

    for &tip in &input.fingertips {
        spawn(&mut state.grid, tip, state.cell_size, state.frame, false);
        outcome.spawned += 1;
    }

    if is_fall_frame(state.frame) {
        let mut rng = state.rng_state.next_rng();
        state.grid = step(&state.grid, &mut rng, state.policy);
        outcome.fell = true;
    }

    outcome
}
