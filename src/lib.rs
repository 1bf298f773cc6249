//! Game of Life simulator
//!
//! Runs Conway's Game of Life on a bounded grid with dead edges, keeps every
//! computed generation, and exports the history as a flat text dump or an
//! animated GIF.

pub mod config;
pub mod error;
pub mod export;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, LifeResult};
pub use game_of_life::Grid;
pub use simulation::{History, Simulation};

use anyhow::{Context, Result};

/// Build, run and export a simulation as described by the settings
pub fn run_simulation(settings: &Settings) -> Result<Simulation> {
    let initial_state = settings.load_initial_state()?;
    let mut simulation = Simulation::from_config(&settings.simulation, initial_state)
        .context("Failed to create simulation")?;

    simulation.simulate();

    let history_path = settings.history_path();
    simulation
        .save_as_txt(&history_path)
        .with_context(|| format!("Failed to save history to {}", history_path.display()))?;

    if settings.output.save_metadata {
        let metadata_path = settings.metadata_path();
        simulation
            .save_metadata(&metadata_path)
            .with_context(|| format!("Failed to save metadata to {}", metadata_path.display()))?;
    }

    if settings.output.animation.enabled {
        let animation_path = settings.animation_path();
        simulation
            .save_as_gif_with(&animation_path, &settings.animation_options())
            .with_context(|| format!("Failed to save animation to {}", animation_path.display()))?;
    }

    Ok(simulation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_run_simulation_writes_outputs() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.simulation.rows = 10;
        settings.simulation.cols = 10;
        settings.simulation.steps = 5;
        settings.output.output_directory = temp_dir.path().join("out");

        let simulation = run_simulation(&settings).unwrap();

        assert!(simulation.is_finished());
        assert!(settings.history_path().exists());
        assert!(settings.metadata_path().exists());
        assert!(settings.animation_path().exists());

        let metadata = export::load_metadata_json(settings.metadata_path()).unwrap();
        let restored =
            export::load_history_txt(settings.history_path(), metadata.steps).unwrap();
        assert_eq!(&restored, simulation.history());
        assert_eq!(metadata.seed, Some(0));
    }

    #[test]
    fn test_run_simulation_with_pattern() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("glider.txt");
        std::fs::write(&pattern, "010000\n001000\n111000\n000000\n000000\n000000\n").unwrap();

        let mut settings = Settings::default();
        settings.simulation.rows = 6;
        settings.simulation.cols = 6;
        settings.simulation.steps = 4;
        settings.input.initial_state_file = Some(pattern);
        settings.output.output_directory = temp_dir.path().join("out");
        settings.output.animation.enabled = false;

        let simulation = run_simulation(&settings).unwrap();
        let last = simulation.history().get(3).unwrap();
        assert_eq!(last.living_cells(), vec![(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
        assert!(!settings.animation_path().exists());
    }

    #[test]
    fn test_run_simulation_shape_mismatch() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("block.txt");
        std::fs::write(&pattern, "0000\n0110\n0110\n0000\n").unwrap();

        let mut settings = Settings::default();
        settings.input.initial_state_file = Some(pattern);
        settings.output.output_directory = temp_dir.path().join("out");

        let err = run_simulation(&settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LifeError>(),
            Some(LifeError::ShapeMismatch { .. })
        ));
        assert!(!settings.history_path().exists());
    }
}
