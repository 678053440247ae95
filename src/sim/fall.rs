//! Falling-star cellular automaton
//!
//! Every move is decided against the previous grid and written into a fresh
//! one, so processing order never lets a star fall twice in one step.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{EMPTY, Grid};

/// What happens when two stars pick the same empty cell in one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConflictPolicy {
    /// The first star to claim a cell gets it; later claimants stay put.
    /// Star count is conserved.
    #[default]
    FirstClaimWins,
    /// Later writes overwrite earlier ones and the overwritten star is lost.
    LastWriterWins,
}

/// Random horizontal direction for the diagonal slide: +1 or -1
#[inline]
fn pick_side<R: Rng + ?Sized>(rng: &mut R) -> isize {
    if rng.random_bool(0.5) { 1 } else { -1 }
}

/// Where the star at `(i, j)` wants to go, judged against `grid`
fn target_cell<R: Rng + ?Sized>(grid: &Grid, i: usize, j: usize, rng: &mut R) -> (usize, usize) {
    let below = j + 1;
    if below >= grid.rows() {
        return (i, j);
    }
    if grid.is_empty(i, below) {
        return (i, below);
    }

    let side = i as isize + pick_side(rng);
    // Off the edge: no fallback to the other side
    if side < 0 || side as usize >= grid.cols() {
        return (i, j);
    }
    let side = side as usize;
    if grid.is_empty(side, below) {
        (side, below)
    } else {
        (i, j)
    }
}

/// Advance every star by at most one cell and return the next grid
pub fn step<R: Rng + ?Sized>(grid: &Grid, rng: &mut R, policy: ConflictPolicy) -> Grid {
    let mut next = grid.empty_like();

    for (i, j, intensity) in grid.occupied() {
        let (ti, tj) = target_cell(grid, i, j, rng);
        let moving = (ti, tj) != (i, j);

        if moving && policy == ConflictPolicy::FirstClaimWins && next.get(ti, tj) != Some(EMPTY) {
            // Own cell was occupied in the snapshot so no mover can target it
            next.set(i, j, intensity);
        } else {
            next.set(ti, tj, intensity);
        }
    }

    next
}
