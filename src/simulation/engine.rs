//! Simulation engine: owns the initial state and the history of one run

use super::history::{History, HistoryMetadata};
use crate::config::SimulationConfig;
use crate::error::{LifeError, LifeResult};
use crate::export::{self, AnimationOptions};
use crate::game_of_life::{GameOfLifeRules, Grid};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;

/// Seed used for the random initial state when none is given
pub const DEFAULT_SEED: u64 = 0;

/// A Game of Life run over a fixed `rows x cols` grid for `n_steps` steps.
///
/// The engine is single-owner: `simulate` needs `&mut self`, so sharing one
/// across threads requires wrapping it in a lock.
#[derive(Debug, Clone)]
pub struct Simulation {
    rows: usize,
    cols: usize,
    n_steps: usize,
    seed: Option<u64>,
    initial_state: Grid,
    history: History,
    finished: bool,
}

impl Simulation {
    /// Create an engine; without an initial state a random grid seeded
    /// with [`DEFAULT_SEED`] is used
    pub fn new(
        rows: usize,
        cols: usize,
        n_steps: usize,
        initial_state: Option<Grid>,
    ) -> LifeResult<Self> {
        Self::with_seed(rows, cols, n_steps, initial_state, DEFAULT_SEED)
    }

    /// Like [`Simulation::new`] with an explicit seed for the random state
    pub fn with_seed(
        rows: usize,
        cols: usize,
        n_steps: usize,
        initial_state: Option<Grid>,
        seed: u64,
    ) -> LifeResult<Self> {
        for (name, value) in [("rows", rows), ("cols", cols), ("n_steps", n_steps)] {
            if value == 0 {
                return Err(LifeError::InvalidParameter { name, value });
            }
        }

        let seed = initial_state.is_none().then_some(seed);
        let initial_state =
            resolve_initial_state(initial_state, rows, cols, seed.unwrap_or(DEFAULT_SEED))?;

        Ok(Self {
            rows,
            cols,
            n_steps,
            seed,
            initial_state,
            history: History::zeroed(n_steps, rows, cols),
            finished: false,
        })
    }

    /// Create an engine from the `simulation` section of the settings
    pub fn from_config(config: &SimulationConfig, initial_state: Option<Grid>) -> LifeResult<Self> {
        Self::with_seed(
            config.rows,
            config.cols,
            config.steps,
            initial_state,
            config.seed,
        )
    }

    /// Run every step, overwriting the history
    pub fn simulate(&mut self) {
        let mut state = self.initial_state.clone();

        for step in 0..self.n_steps {
            let next = GameOfLifeRules::evolve(&state);
            debug!("step {}: {} living cells", step, next.living_count());
            self.history.set(step, next.clone());
            state = next;
        }

        self.finished = true;
        info!(
            "Simulated {} steps on a {}x{} grid",
            self.n_steps, self.rows, self.cols
        );
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Seed of the random initial state, `None` when a grid was supplied
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn initial_state(&self) -> &Grid {
        &self.initial_state
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// History buffer; zero-filled until `simulate` has run
    pub fn history(&self) -> &History {
        &self.history
    }

    /// History of a completed run
    pub fn finished_history(&self) -> LifeResult<&History> {
        if self.finished {
            Ok(&self.history)
        } else {
            Err(LifeError::NotFinished)
        }
    }

    pub fn metadata(&self) -> LifeResult<HistoryMetadata> {
        Ok(self.finished_history()?.metadata(self.seed))
    }

    /// Write the flattened history as a `.txt` dump
    pub fn save_as_txt<P: AsRef<Path>>(&self, path: P) -> LifeResult<()> {
        export::save_history_txt(self.finished_history()?, path)
    }

    /// Write the shape metadata sidecar as `.json`
    pub fn save_metadata<P: AsRef<Path>>(&self, path: P) -> LifeResult<()> {
        export::save_metadata_json(&self.metadata()?, path)
    }

    /// Render the first `frames` steps as a `.gif` animation
    pub fn save_as_gif<P: AsRef<Path>>(&self, path: P, fps: u32, frames: usize) -> LifeResult<()> {
        self.save_as_gif_with(path, &AnimationOptions::new(fps, frames))
    }

    pub fn save_as_gif_with<P: AsRef<Path>>(
        &self,
        path: P,
        options: &AnimationOptions,
    ) -> LifeResult<()> {
        export::save_history_gif(self.finished_history()?, path, options)
    }

    /// Read a dump written by [`Simulation::save_as_txt`]
    pub fn load_from_txt<P: AsRef<Path>>(path: P, n_steps: usize) -> LifeResult<History> {
        export::load_history_txt(path, n_steps)
    }
}

/// Use the provided grid if its shape is `rows x cols`, otherwise fill a
/// grid with fair coin flips from a generator seeded with `seed`
pub fn resolve_initial_state(
    provided: Option<Grid>,
    rows: usize,
    cols: usize,
    seed: u64,
) -> LifeResult<Grid> {
    match provided {
        Some(grid) if grid.shape() != (rows, cols) => {
            Err(LifeError::shape((rows, cols), grid.shape()))
        }
        Some(grid) if grid.cells.len() != rows * cols => Err(LifeError::CellCount {
            expected: rows * cols,
            actual: grid.cells.len(),
        }),
        Some(grid) => Ok(grid),
        None => Ok(random_grid(rows, cols, seed)),
    }
}

fn random_grid(rows: usize, cols: usize, seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Grid {
        rows,
        cols,
        cells: (0..rows * cols).map(|_| rng.gen_bool(0.5)).collect(),
    }
}
