//! Star field: one star per occupied grid cell
//!
//! Colors are re-rolled on every draw, which gives the field its twinkle.
//! The painter has its own RNG so drawing never perturbs the simulation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes::star;
use super::vertex::Vertex;
use crate::cell_center;
use crate::sim::GameState;

/// Points per star
pub const STAR_POINTS: u32 = 5;

/// Builds star geometry from the game state
#[derive(Debug, Clone)]
pub struct StarPainter {
    rng: Pcg32,
}

impl StarPainter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Random opaque RGB with the cell intensity as alpha
    fn star_color(&mut self, intensity: u8) -> [f32; 4] {
        [
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
            f32::from(intensity) / 255.0,
        ]
    }

    /// Triangle-list vertices in canvas pixels. Empty once the game is over.
    pub fn vertices(&mut self, state: &GameState) -> Vec<Vertex> {
        if state.is_game_over() {
            return Vec::new();
        }

        let size = state.cell_size as f32;
        let mut vertices = Vec::with_capacity(
            state.grid.particle_count() * STAR_POINTS as usize * 6,
        );
        for (i, j, intensity) in state.grid.occupied() {
            let color = self.star_color(intensity);
            let center = cell_center(i, j, state.cell_size);
            vertices.extend(star(center, size / 4.0, size / 2.0, STAR_POINTS, color));
        }
        vertices
    }
}
