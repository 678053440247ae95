//! Star intensity grid
//!
//! Cells are stored column-major so that iterating the backing slice visits
//! cells in the same `(i, j)` order the fall step processes them.

use serde::{Deserialize, Serialize};

use crate::pixel_to_cell;

/// Intensity value meaning "no star here"
pub const EMPTY: u8 = 0;

/// Fixed-size 2D grid of star intensities (0 = empty)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

/// Unchecked wire form of [`Grid`]
#[derive(Deserialize)]
struct GridRepr {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = String;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let expected = repr.cols.checked_mul(repr.rows);
        if expected != Some(repr.cells.len()) {
            return Err(format!(
                "grid is {}x{} but has {} cells",
                repr.cols,
                repr.rows,
                repr.cells.len()
            ));
        }
        Ok(Self {
            cols: repr.cols,
            rows: repr.rows,
            cells: repr.cells,
        })
    }
}

impl Grid {
    /// Create an empty grid
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols * rows],
        }
    }

    /// Create an empty grid covering a canvas
    pub fn for_canvas(width: u32, height: u32, cell_size: u32) -> Self {
        Self::new((width / cell_size) as usize, (height / cell_size) as usize)
    }

    /// Empty grid with the same dimensions
    pub fn empty_like(&self) -> Self {
        Self::new(self.cols, self.rows)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        i * self.rows + j
    }

    /// Intensity at `(i, j)`, `None` when out of bounds
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<u8> {
        if i < self.cols && j < self.rows {
            Some(self.cells[self.index(i, j)])
        } else {
            None
        }
    }

    /// Write intensity at `(i, j)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: u8) {
        if i < self.cols && j < self.rows {
            let idx = self.index(i, j);
            self.cells[idx] = value;
        }
    }

    /// True when `(i, j)` is inside the grid and holds no star
    #[inline]
    pub fn is_empty(&self, i: usize, j: usize) -> bool {
        self.get(i, j) == Some(EMPTY)
    }

    /// Map a canvas pixel position to a cell, clamping to the grid edges
    pub fn cell_at_pixel(&self, x: f32, y: f32, cell_size: u32) -> (usize, usize) {
        (
            pixel_to_cell(x, cell_size, self.cols),
            pixel_to_cell(y, cell_size, self.rows),
        )
    }

    /// Iterate occupied cells as `(i, j, intensity)` in column-major order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let rows = self.rows;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != EMPTY)
            .map(move |(idx, v)| (idx / rows, idx % rows, *v))
    }

    /// Number of stars on the grid
    pub fn particle_count(&self) -> usize {
        self.cells.iter().filter(|v| **v != EMPTY).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::for_canvas(640, 480, 10);
        assert_eq!(grid.cols(), 64);
        assert_eq!(grid.rows(), 48);
        assert_eq!(grid.particle_count(), 0);
        assert!(grid.is_empty(0, 0));
        assert!(grid.is_empty(63, 47));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::new(3, 3);
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert!(!grid.is_empty(3, 0));

        grid.set(5, 5, 100);
        assert_eq!(grid.particle_count(), 0);
    }

    #[test]
    fn test_deserialize_rejects_mismatched_cells() {
        let short = serde_json::from_str::<Grid>(r#"{"cols":4,"rows":4,"cells":[0]}"#);
        assert!(short.is_err());

        let long = serde_json::from_str::<Grid>(r#"{"cols":1,"rows":1,"cells":[0,0]}"#);
        assert!(long.is_err());
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut grid = Grid::new(4, 3);
        grid.set(3, 2, 77);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
        assert_eq!(back.get(3, 2), Some(77));
    }

    #[test]
    fn test_occupied_order_is_column_major() {
        let mut grid = Grid::new(3, 3);
        grid.set(2, 0, 70);
        grid.set(0, 2, 90);
        grid.set(0, 1, 80);

        let cells: Vec<_> = grid.occupied().collect();
        assert_eq!(cells, vec![(0, 1, 80), (0, 2, 90), (2, 0, 70)]);
    }

    #[test]
    fn test_cell_at_pixel() {
        let grid = Grid::new(64, 48);
        assert_eq!(grid.cell_at_pixel(325.0, 118.0, 10), (32, 11));
        assert_eq!(grid.cell_at_pixel(-1.0, 10_000.0, 10), (0, 47));
    }
}
