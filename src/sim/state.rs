//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]; nothing in the
//! simulation reads ambient globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fall::ConflictPolicy;
use super::grid::Grid;
use super::score::{GamePhase, ScoreClock};
use crate::consts::*;

/// RNG state wrapper for serialization.
///
/// Each fall step draws from its own generator, derived from the run seed
/// and the number of steps already taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Generator for the current stream
    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Generator for the current stream; moves on to the next one
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = self.to_rng();
        self.stream += 1;
        rng
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Frames ticked so far; the first tick is frame 1
    pub frame: u64,
    /// Star intensities
    pub grid: Grid,
    /// Score and phase
    pub score: ScoreClock,
    /// How simultaneous landings are resolved
    pub policy: ConflictPolicy,
    /// Pixel edge length of one cell
    pub cell_size: u32,
    /// Tie-break source for diagonal slides
    pub rng_state: RngState,
}

impl GameState {
    /// Standard 640x480 game whose score clock starts at `start_ms`
    pub fn new(seed: u64, start_ms: f64) -> Self {
        Self::with_grid(
            Grid::for_canvas(CANVAS_WIDTH, CANVAS_HEIGHT, CELL_SIZE),
            seed,
            start_ms,
        )
    }

    /// Game over an arbitrary grid
    pub fn with_grid(grid: Grid, seed: u64, start_ms: f64) -> Self {
        Self {
            seed,
            frame: 0,
            grid,
            score: ScoreClock::new(start_ms),
            policy: ConflictPolicy::default(),
            cell_size: CELL_SIZE,
            rng_state: RngState::new(seed),
        }
    }

    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.score.phase()
    }

    pub fn is_game_over(&self) -> bool {
        self.score.is_game_over()
    }

    /// Canvas size covered by the grid, in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.grid.cols() as u32 * self.cell_size,
            self.grid.rows() as u32 * self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345, 0.0);
        assert_eq!(state.frame, 0);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.score.score(), 0);
        assert_eq!(state.grid.particle_count(), 0);
        assert_eq!(state.canvas_size(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(state.policy, ConflictPolicy::FirstClaimWins);
    }

    #[test]
    fn test_snapshot_serializes_rng_state() {
        let state = GameState::new(7, 0.0).with_policy(ConflictPolicy::LastWriterWins);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["seed"], 7);
        assert_eq!(json["policy"], "LastWriterWins");
        assert_eq!(json["rng_state"]["stream"], 0);
    }

    #[test]
    fn test_rng_streams_advance() {
        let mut rng_state = RngState::new(5);
        let first = rng_state.next_rng();
        assert_eq!(rng_state.stream, 1);
        assert_ne!(first, rng_state.to_rng());
        assert_eq!(first, RngState::new(5).to_rng());
    }

    #[test]
    fn test_restored_snapshot_continues_identically() {
        use crate::sim::{TickInput, tick};
        use glam::Vec2;

        let input = |frame: u64| TickInput {
            now_ms: frame as f64 * 16.0,
            fingertips: vec![Vec2::new((frame * 13 % 640) as f32, 0.0)],
        };

        let mut original = GameState::new(2024, 0.0);
        for frame in 1..=120 {
            tick(&mut original, &input(frame));
        }

        let json = serde_json::to_string(&original).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.grid, original.grid);
        assert_eq!(restored.rng_state, original.rng_state);

        for frame in 121..=300 {
            tick(&mut original, &input(frame));
            tick(&mut restored, &input(frame));
        }
        assert_eq!(restored.frame, original.frame);
        assert_eq!(restored.grid, original.grid);
        assert_eq!(restored.score.score(), original.score.score());
    }

    #[test]
    fn test_corrupt_snapshot_is_rejected() {
        let mut json = serde_json::to_value(GameState::new(1, 0.0)).unwrap();
        json["grid"]["cells"] = serde_json::json!([0, 0, 0]);
        assert!(serde_json::from_value::<GameState>(json).is_err());
    }
}
