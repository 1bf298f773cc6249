//! Grid representation and neighbor counting for Game of Life

use crate::error::{LifeError, LifeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One generation: a dense row-major matrix of dead/alive cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<bool>,
}

/// Alive-neighbor count for every cell of a grid, each in `0..=8`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborCounts {
    pub rows: usize,
    pub cols: usize,
    pub counts: Vec<u8>,
}

/// The eight Moore neighborhood offsets
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Create a grid from nested rows
    pub fn from_rows(rows: Vec<Vec<bool>>) -> LifeResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if height == 0 {
            return Err(LifeError::InvalidParameter { name: "rows", value: 0 });
        }
        if width == 0 {
            return Err(LifeError::InvalidParameter { name: "cols", value: 0 });
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LifeError::Parse {
                    line: i + 1,
                    message: format!("row has {} cells, expected {}", row.len(), width),
                });
            }
        }

        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Create a grid from 0/1 values, anything non-zero is alive
    pub fn from_values(rows: &[&[u8]]) -> LifeResult<Self> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|&v| v != 0).collect())
                .collect(),
        )
    }

    /// Create a dead grid with the given cells set alive
    pub fn with_living(rows: usize, cols: usize, living: &[(usize, usize)]) -> LifeResult<Self> {
        let mut grid = Self::new(rows, cols);
        for &(row, col) in living {
            grid.set(row, col, true)?;
        }
        Ok(grid)
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Shape as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell value, cells outside the grid are dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) -> LifeResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Count living neighbors of a cell; out-of-bounds neighbors are dead
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| self.is_neighbor_alive(row as isize + dr, col as isize + dc))
            .count() as u8
    }

    fn is_neighbor_alive(&self, row: isize, col: isize) -> bool {
        row >= 0
            && col >= 0
            && (row as usize) < self.rows
            && (col as usize) < self.cols
            && self.cells[self.index(row as usize, col as usize)]
    }

    /// Neighbor counts for the whole grid, equal to a zero-padded 3x3
    /// convolution with a ring kernel
    pub fn neighbor_counts(&self) -> NeighborCounts {
        let mut counts = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                counts.push(self.count_neighbors(row, col));
            }
        }
        NeighborCounts {
            rows: self.rows,
            cols: self.cols,
            counts,
        }
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Fraction of living cells
    pub fn density(&self) -> f64 {
        if self.cells.is_empty() {
            0.0
        } else {
            self.living_count() as f64 / self.cells.len() as f64
        }
    }
}

impl NeighborCounts {
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.counts[row * self.cols + col]
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn max(&self) -> u8 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = if self.get(row, col) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
