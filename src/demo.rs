//! Scripted headless session
//!
//! Drives the simulation with synthetic hands on a simulated 60 Hz clock.
//! Used by the native binary, where there is no camera or canvas.

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, INDEX_FINGERTIP, KEYPOINTS_PER_HAND};
use crate::input::{Hand, HandFrame, Keypoint, LatestHands};
use crate::sim::{EMPTY, GameEvent, GameState, Grid, TickInput, tick};

/// Simulated display refresh rate
pub const DEMO_FPS: f64 = 60.0;

/// A hand whose index fingertip is at `tip`; the other keypoints trail below it
pub fn synthetic_hand(tip: Vec2) -> Hand {
    let keypoints = (0..KEYPOINTS_PER_HAND)
        .map(|k| {
            let drop = if k == INDEX_FINGERTIP { 0.0 } else { 40.0 + k as f32 };
            Keypoint {
                x: tip.x,
                y: tip.y + drop,
            }
        })
        .collect();
    Hand { keypoints }
}

/// Detections for a given frame: one hand sweeping across the upper third,
/// a second hand holding still on alternate seconds
pub fn scripted_hands(frame: u64) -> HandFrame {
    let t = frame as f32 / DEMO_FPS as f32;
    let width = CANVAS_WIDTH as f32;
    let sweep_x = width / 2.0 + (t * 1.3).sin() * width * 0.45;
    let sweep_y = CANVAS_HEIGHT as f32 * 0.2 + (t * 3.1).cos() * 20.0;

    let mut hands = vec![synthetic_hand(Vec2::new(sweep_x, sweep_y))];
    if (frame / DEMO_FPS as u64) % 2 == 1 {
        hands.push(synthetic_hand(Vec2::new(width * 0.8, 30.0)));
    }
    HandFrame { hands }
}

/// Result of a headless run
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub frames: u64,
    pub events: Vec<(u64, GameEvent)>,
    pub state: GameState,
}

/// Tick until the game ends or `max_frames` elapse
pub fn run_session(seed: u64, max_frames: u64) -> SessionSummary {
    let hands = LatestHands::new();
    let mut state = GameState::new(seed, 0.0);
    let mut events = Vec::new();

    while state.frame < max_frames && !state.is_game_over() {
        // Detection callback lands between frames
        hands.publish(scripted_hands(state.frame + 1));

        let snapshot = hands.snapshot();
        let input = TickInput {
            now_ms: (state.frame + 1) as f64 * 1000.0 / DEMO_FPS,
            fingertips: snapshot.fingertips(),
        };
        let outcome = tick(&mut state, &input);
        if let Some(event) = outcome.event {
            log::info!(
                "frame {}: {:?} ({} stars)",
                state.frame,
                event,
                state.grid.particle_count()
            );
            events.push((state.frame, event));
        }
    }

    SessionSummary {
        frames: state.frame,
        events,
        state,
    }
}

/// Text picture of the grid: `*` for a star, `.` for empty
pub fn ascii_grid(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.cols() + 1) * grid.rows());
    for j in 0..grid.rows() {
        for i in 0..grid.cols() {
            out.push(if grid.get(i, j) == Some(EMPTY) { '.' } else { '*' });
        }
        out.push('\n');
    }
    out
}
