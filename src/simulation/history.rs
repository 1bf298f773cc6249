//! History buffer of computed generations and its flat text codec

use crate::error::{LifeError, LifeResult};
use crate::game_of_life::Grid;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Every computed generation of one run, step 0 being the first generation
/// after the initial state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    rows: usize,
    cols: usize,
    steps: Vec<Grid>,
}

/// History stacked into a 2D buffer: `steps * rows` rows by `cols` columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatHistory {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<u8>,
}

/// Shape and population data kept next to a text dump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMetadata {
    pub rows: usize,
    pub cols: usize,
    pub steps: usize,
    pub seed: Option<u64>,
    pub populations: Vec<usize>,
}

impl History {
    /// Allocate `steps` dead grids of the given shape
    pub fn zeroed(steps: usize, rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            steps: vec![Grid::new(rows, cols); steps],
        }
    }

    /// Build a history from grids that all share one shape
    pub fn from_grids(steps: Vec<Grid>) -> LifeResult<Self> {
        let (rows, cols) = steps.first().map_or((0, 0), Grid::shape);
        if let Some(odd) = steps.iter().find(|g| g.shape() != (rows, cols)) {
            return Err(LifeError::shape((rows, cols), odd.shape()));
        }
        Ok(Self { rows, cols, steps })
    }

    pub(crate) fn set(&mut self, step: usize, grid: Grid) {
        debug_assert_eq!(grid.shape(), (self.rows, self.cols));
        self.steps[step] = grid;
    }

    pub fn get(&self, step: usize) -> Option<&Grid> {
        self.steps.get(step)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Shape of every grid as `(rows, cols)`
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Grid> {
        self.steps.iter()
    }

    pub fn grids(&self) -> &[Grid] {
        &self.steps
    }

    /// Living cell count of every step
    pub fn populations(&self) -> Vec<usize> {
        self.steps.iter().map(Grid::living_count).collect()
    }

    pub fn metadata(&self, seed: Option<u64>) -> HistoryMetadata {
        HistoryMetadata {
            rows: self.rows,
            cols: self.cols,
            steps: self.steps.len(),
            seed,
            populations: self.populations(),
        }
    }

    /// Stack every step's rows in step order
    pub fn flatten(&self) -> FlatHistory {
        let values = self
            .steps
            .iter()
            .flat_map(|grid| grid.cells.iter().map(|&alive| u8::from(alive)))
            .collect();

        FlatHistory {
            rows: self.steps.len() * self.rows,
            cols: self.cols,
            values,
        }
    }

    /// Reshape a flat buffer into `steps` grids of `flat.rows / steps` rows
    pub fn restore(flat: &FlatHistory, steps: usize) -> LifeResult<Self> {
        if steps == 0 || flat.rows % steps != 0 {
            return Err(LifeError::InvalidReshape {
                total_rows: flat.rows,
                steps,
            });
        }
        if flat.values.len() != flat.rows * flat.cols {
            return Err(LifeError::CellCount {
                expected: flat.rows * flat.cols,
                actual: flat.values.len(),
            });
        }

        let rows = flat.rows / steps;
        let cells_per_step = rows * flat.cols;
        let grids = (0..steps)
            .map(|step| {
                let start = step * cells_per_step;
                Grid {
                    rows,
                    cols: flat.cols,
                    cells: flat.values[start..start + cells_per_step]
                        .iter()
                        .map(|&v| v != 0)
                        .collect(),
                }
            })
            .collect();

        Ok(Self {
            rows,
            cols: flat.cols,
            steps: grids,
        })
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Grid;
    type IntoIter = std::slice::Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl FlatHistory {
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.cols;
        &self.values[start..start + self.cols]
    }

    /// One row per line, space-separated integers
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.values.len() * 2);
        for row in 0..self.rows {
            out.push_str(&self.row(row).iter().join(" "));
            out.push('\n');
        }
        out
    }

    /// Parse a text dump; blank lines are skipped, every row must have the
    /// same number of `0`/`1` values
    pub fn parse(content: &str) -> LifeResult<Self> {
        let mut cols = None;
        let mut rows = 0;
        let mut values = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let start = values.len();
            for token in line.split_whitespace() {
                values.push(parse_value(token).ok_or_else(|| LifeError::Parse {
                    line: line_no,
                    message: format!("expected 0 or 1, found `{}`", token),
                })?);
            }

            let width = values.len() - start;
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(LifeError::Parse {
                        line: line_no,
                        message: format!("row has {} values, expected {}", width, expected),
                    });
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let cols = cols.ok_or_else(|| LifeError::Parse {
            line: 0,
            message: "no rows found".to_string(),
        })?;

        Ok(Self { rows, cols, values })
    }
}

/// Accepts `0`/`1`, and float spellings such as `1.0` or `0.000000e+00`
fn parse_value(token: &str) -> Option<u8> {
    match token {
        "0" => Some(0),
        "1" => Some(1),
        _ => match token.parse::<f64>().ok()? {
            v if v == 0.0 => Some(0),
            v if v == 1.0 => Some(1),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::GameOfLifeRules;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_history(steps: usize, size: usize, seed: u64) -> History {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grids = (0..steps)
            .map(|_| Grid {
                rows: size,
                cols: size,
                cells: (0..size * size).map(|_| rng.gen_bool(0.5)).collect(),
            })
            .collect();
        History::from_grids(grids).unwrap()
    }

    #[test]
    fn test_flatten_shape() {
        let history = random_history(5, 10, 1);
        let flat = history.flatten();

        assert_eq!(flat.rows, 50);
        assert_eq!(flat.cols, 10);
        assert_eq!(flat.values.len(), 500);
        // Row 12 is the third row of the second step
        let expected: Vec<u8> = history.get(1).unwrap().row(2).iter().map(|&c| c as u8).collect();
        assert_eq!(flat.row(12), expected.as_slice());
    }

    #[test]
    fn test_restore_round_trip() {
        for steps in [1, 5, 20] {
            for size in [1, 10] {
                let history = random_history(steps, size, (steps * 100 + size) as u64);
                let text = history.flatten().to_text();
                let parsed = FlatHistory::parse(&text).unwrap();
                let restored = History::restore(&parsed, steps).unwrap();
                assert_eq!(restored, history, "steps={} size={}", steps, size);
            }
        }
    }

    #[test]
    fn test_restore_rejects_uneven_rows() {
        let flat = random_history(3, 4, 7).flatten();
        assert!(matches!(
            History::restore(&flat, 5),
            Err(LifeError::InvalidReshape { total_rows: 12, steps: 5 })
        ));
        assert!(matches!(
            History::restore(&flat, 0),
            Err(LifeError::InvalidReshape { .. })
        ));
    }

    #[test]
    fn test_restore_rejects_short_buffer() {
        let flat = FlatHistory {
            rows: 4,
            cols: 2,
            values: vec![0, 1],
        };
        assert!(matches!(
            History::restore(&flat, 2),
            Err(LifeError::CellCount { expected: 8, actual: 2 })
        ));
    }

    #[test]
    fn test_restore_with_divisor_changes_shape() {
        // 12 rows also divide into 6 steps of 2 rows; the dump cannot tell
        let flat = random_history(3, 4, 7).flatten();
        let restored = History::restore(&flat, 6).unwrap();
        assert_eq!(restored.len(), 6);
        assert_eq!(restored.grid_shape(), (2, 4));
    }

    #[test]
    fn test_text_format() {
        let blinker = Grid::from_values(&[&[0, 0, 0], &[1, 1, 1], &[0, 0, 0]]).unwrap();
        let next = GameOfLifeRules::evolve(&blinker);
        let history = History::from_grids(vec![next, blinker]).unwrap();

        assert_eq!(
            history.flatten().to_text(),
            "0 1 0\n0 1 0\n0 1 0\n0 0 0\n1 1 1\n0 0 0\n"
        );
    }

    #[test]
    fn test_parse_accepts_float_values() {
        let flat = FlatHistory::parse("1.0 0.0\n0.000000000000000000e+00 1\n").unwrap();
        assert_eq!(flat.values, vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            FlatHistory::parse("0 1\n0 1 1\n"),
            Err(LifeError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            FlatHistory::parse("0 2\n"),
            Err(LifeError::Parse { line: 1, .. })
        ));
        assert!(FlatHistory::parse("\n\n").is_err());
    }

    #[test]
    fn test_from_grids_rejects_mixed_shapes() {
        let result = History::from_grids(vec![Grid::new(2, 2), Grid::new(3, 2)]);
        assert!(matches!(result, Err(LifeError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_metadata() {
        let block = Grid::with_living(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]).unwrap();
        let history = History::from_grids(vec![block.clone(), block]).unwrap();
        let metadata = history.metadata(Some(0));

        assert_eq!(metadata.steps, 2);
        assert_eq!((metadata.rows, metadata.cols), (4, 4));
        assert_eq!(metadata.populations, vec![4, 4]);
    }
}
