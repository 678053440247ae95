//! Fingertip spawner

use glam::Vec2;

use super::grid::Grid;
use crate::consts::{INTENSITY_CYCLE, INTENSITY_FLOOR};

/// Brightness of a star spawned on `frame`; cycles through `50..255`
#[inline]
pub fn spawn_intensity(frame: u64) -> u8 {
    (frame % INTENSITY_CYCLE) as u8 + INTENSITY_FLOOR
}

/// Place a star under a pixel-space pointer.
///
/// The position is clamped onto the grid. Does nothing once the game is
/// over. Returns the cell that was (or would have been) written.
pub fn spawn(
    grid: &mut Grid,
    pos: Vec2,
    cell_size: u32,
    frame: u64,
    game_over: bool,
) -> (usize, usize) {
    let (i, j) = grid.cell_at_pixel(pos.x, pos.y, cell_size);
    if !game_over {
        grid.set(i, j, spawn_intensity(frame));
    }
    (i, j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CELL_SIZE;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_intensity_cycle() {
        assert_eq!(spawn_intensity(0), 50);
        assert_eq!(spawn_intensity(1), 51);
        assert_eq!(spawn_intensity(204), 254);
        assert_eq!(spawn_intensity(205), 50);
        assert_eq!(spawn_intensity(u64::MAX), (u64::MAX % 205) as u8 + 50);
    }

    #[test]
    fn test_spawn_writes_only_target_cell() {
        let mut grid = Grid::new(64, 48);
        let cell = spawn(&mut grid, Vec2::new(123.0, 45.0), CELL_SIZE, 10, false);
        assert_eq!(cell, (12, 4));
        assert_eq!(grid.get(12, 4), Some(60));
        assert_eq!(grid.particle_count(), 1);
    }

    #[test]
    fn test_spawn_overwrites_existing_star() {
        let mut grid = Grid::new(64, 48);
        spawn(&mut grid, Vec2::new(5.0, 5.0), CELL_SIZE, 0, false);
        spawn(&mut grid, Vec2::new(5.0, 5.0), CELL_SIZE, 100, false);
        assert_eq!(grid.get(0, 0), Some(150));
        assert_eq!(grid.particle_count(), 1);
    }

    #[test]
    fn test_spawn_noop_when_game_over() {
        let mut grid = Grid::new(64, 48);
        let before = grid.clone();
        spawn(&mut grid, Vec2::new(320.0, 240.0), CELL_SIZE, 7, true);
        assert_eq!(grid, before);
    }

    proptest! {
        #[test]
        fn prop_spawn_always_lands_on_grid(
            x in prop::num::f32::ANY,
            y in prop::num::f32::ANY,
            frame in any::<u64>(),
        ) {
            let mut grid = Grid::new(64, 48);
            let (i, j) = spawn(&mut grid, Vec2::new(x, y), CELL_SIZE, frame, false);
            prop_assert!(i < grid.cols());
            prop_assert!(j < grid.rows());
            prop_assert_eq!(grid.get(i, j), Some(spawn_intensity(frame)));
            prop_assert_eq!(grid.particle_count(), 1);
        }

        #[test]
        fn prop_spawn_game_over_never_mutates(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            frame in any::<u64>(),
        ) {
            let mut grid = Grid::new(64, 48);
            grid.set(10, 10, 99);
            let before = grid.clone();
            spawn(&mut grid, Vec2::new(x, y), CELL_SIZE, frame, true);
            prop_assert_eq!(grid, before);
        }
    }
}
