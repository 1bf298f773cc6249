//! Game of Life transition rules

use super::{Grid, NeighborCounts};
use crate::error::{LifeError, LifeResult};

/// Which rule decides a cell's next value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Live cell with fewer than two or more than three neighbors
    Dies,
    /// Live cell with two or three neighbors
    Survives,
    /// Dead cell with exactly three neighbors
    Birth,
    /// Dead cell with any other neighbor count
    Unchanged,
}

impl Transition {
    pub fn classify(alive: bool, neighbors: u8) -> Self {
        match (alive, neighbors) {
            (true, 2) | (true, 3) => Transition::Survives,
            (true, _) => Transition::Dies,
            (false, 3) => Transition::Birth,
            (false, _) => Transition::Unchanged,
        }
    }

    /// Next value of a cell whose current value is `current`
    pub fn apply(self, current: bool) -> bool {
        match self {
            Transition::Dies => false,
            Transition::Survives | Transition::Birth => true,
            Transition::Unchanged => current,
        }
    }
}

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Alive-neighbor count of every cell, zero-padded at the edges
    pub fn compute_neighbor_counts(grid: &Grid) -> NeighborCounts {
        grid.neighbor_counts()
    }

    /// Build the next generation from a grid and its neighbor counts
    pub fn compute_next_state(grid: &Grid, neighbors: &NeighborCounts) -> LifeResult<Grid> {
        if neighbors.shape() != grid.shape() {
            return Err(LifeError::shape(grid.shape(), neighbors.shape()));
        }
        Ok(Self::apply_rules(grid, neighbors))
    }

    fn apply_rules(grid: &Grid, neighbors: &NeighborCounts) -> Grid {
        let cells = grid
            .cells
            .iter()
            .zip(&neighbors.counts)
            .map(|(&alive, &count)| Transition::classify(alive, count).apply(alive))
            .collect();

        Grid {
            rows: grid.rows,
            cols: grid.cols,
            cells,
        }
    }

    /// Advance the grid one generation
    pub fn evolve(current: &Grid) -> Grid {
        let neighbors = Self::compute_neighbor_counts(current);
        Self::apply_rules(current, &neighbors)
    }

    /// Advance the grid several generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::evolve(&grid);
        }
        grid
    }

    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        Transition::classify(current_state, neighbor_count).apply(current_state)
    }

    /// Maximum neighbor count in the Moore neighborhood
    pub fn max_neighbor_count() -> u8 {
        8
    }
}
