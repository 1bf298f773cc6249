//! Configuration settings for the simulator

use crate::export::AnimationOptions;
use crate::game_of_life::{load_grid_from_file, Grid};
use crate::simulation::DEFAULT_SEED;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub steps: usize,
    /// Seed for the random initial state, unused when a pattern file is given
    #[serde(default)]
    pub seed: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub initial_state_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_directory: PathBuf,
    pub history_file: PathBuf,
    /// Write a `.json` file with the history shape next to the dump
    pub save_metadata: bool,
    pub animation: AnimationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub file_name: PathBuf,
    pub fps: u32,
    /// Frames to render; all steps when unset
    #[serde(default)]
    pub frames: Option<usize>,
    pub cell_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                rows: 30,
                cols: 30,
                steps: 10,
                seed: DEFAULT_SEED,
            },
            input: InputConfig::default(),
            output: OutputConfig {
                output_directory: PathBuf::from("output"),
                history_file: PathBuf::from("history.txt"),
                save_metadata: true,
                animation: AnimationConfig {
                    enabled: true,
                    file_name: PathBuf::from("simulation.gif"),
                    fps: 1,
                    frames: None,
                    cell_size: crate::export::animation::DEFAULT_CELL_SIZE,
                },
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        if sim.rows == 0 || sim.cols == 0 {
            anyhow::bail!("Grid dimensions must be positive, got {}x{}", sim.rows, sim.cols);
        }
        if sim.steps == 0 {
            anyhow::bail!("Number of steps must be positive");
        }

        if let Some(ref file) = self.input.initial_state_file {
            if !file.exists() {
                anyhow::bail!("Initial state file does not exist: {}", file.display());
            }
        }

        if !has_extension(&self.output.history_file, "txt") {
            anyhow::bail!(
                "History file must have a .txt extension: {}",
                self.output.history_file.display()
            );
        }

        let animation = &self.output.animation;
        if animation.enabled {
            if !has_extension(&animation.file_name, "gif") {
                anyhow::bail!(
                    "Animation file must have a .gif extension: {}",
                    animation.file_name.display()
                );
            }
            if animation.fps == 0 {
                anyhow::bail!("Animation frame rate must be positive");
            }
            if animation.cell_size == 0 {
                anyhow::bail!("Animation cell size must be positive");
            }
            if let Some(frames) = animation.frames {
                if frames == 0 || frames > sim.steps {
                    anyhow::bail!(
                        "Animation frames must be between 1 and {}, got {}",
                        sim.steps,
                        frames
                    );
                }
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.simulation.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.simulation.cols = cols;
        }
        if let Some(steps) = cli_overrides.steps {
            self.simulation.steps = steps;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = seed;
        }
        if let Some(ref initial) = cli_overrides.initial_state_file {
            self.input.initial_state_file = Some(initial.clone());
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(fps) = cli_overrides.fps {
            self.output.animation.fps = fps;
        }
        if let Some(frames) = cli_overrides.frames {
            self.output.animation.frames = Some(frames);
        }
        if cli_overrides.no_animation {
            self.output.animation.enabled = false;
        }
    }

    /// Read the configured pattern file, if any
    pub fn load_initial_state(&self) -> Result<Option<Grid>> {
        self.input
            .initial_state_file
            .as_ref()
            .map(load_grid_from_file)
            .transpose()
    }

    pub fn history_path(&self) -> PathBuf {
        self.output.output_directory.join(&self.output.history_file)
    }

    /// Sidecar path: the history file with a `.json` extension
    pub fn metadata_path(&self) -> PathBuf {
        self.history_path().with_extension("json")
    }

    pub fn animation_path(&self) -> PathBuf {
        self.output
            .output_directory
            .join(&self.output.animation.file_name)
    }

    pub fn animation_options(&self) -> AnimationOptions {
        let animation = &self.output.animation;
        AnimationOptions::new(
            animation.fps,
            animation.frames.unwrap_or(self.simulation.steps),
        )
        .with_cell_size(animation.cell_size)
    }
}

fn has_extension(path: &Path, expected: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected))
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub steps: Option<usize>,
    pub seed: Option<u64>,
    pub initial_state_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub fps: Option<u32>,
    pub frames: Option<usize>,
    pub no_animation: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.animation_options().frames, 10);
        assert_eq!(settings.metadata_path(), PathBuf::from("output/history.json"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.simulation.rows = 12;
        settings.output.animation.frames = Some(4);
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.rows, 12);
        assert_eq!(loaded.output.animation.frames, Some(4));
        assert_eq!(loaded.animation_options().frames, 4);
    }

    #[test]
    fn test_seed_defaults_when_missing() {
        let yaml = "
simulation:
  rows: 5
  cols: 6
  steps: 3
input: {}
output:
  output_directory: out
  history_file: run.txt
  save_metadata: false
  animation:
    enabled: false
    file_name: run.gif
    fps: 2
    cell_size: 4
";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.simulation.seed, DEFAULT_SEED);
        assert!(settings.input.initial_state_file.is_none());
        assert!(settings.output.animation.frames.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.simulation.steps = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.output.history_file = PathBuf::from("history.csv");
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.output.animation.frames = Some(11);
        assert!(settings.validate().is_err());

        settings.output.animation.enabled = false;
        assert!(settings.validate().is_ok());

        let mut settings = Settings::default();
        settings.input.initial_state_file = Some(PathBuf::from("does/not/exist.txt"));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            rows: Some(8),
            steps: Some(4),
            fps: Some(5),
            no_animation: true,
            output_dir: Some(PathBuf::from("elsewhere")),
            ..CliOverrides::default()
        });

        assert_eq!(settings.simulation.rows, 8);
        assert_eq!(settings.simulation.cols, 30);
        assert_eq!(settings.simulation.steps, 4);
        assert_eq!(settings.output.animation.fps, 5);
        assert!(!settings.output.animation.enabled);
        assert_eq!(settings.history_path(), PathBuf::from("elsewhere/history.txt"));
    }

    #[test]
    fn test_load_initial_state() {
        let temp_dir = tempdir().unwrap();
        let pattern = temp_dir.path().join("block.txt");
        std::fs::write(&pattern, "0000\n0110\n0110\n0000\n").unwrap();

        let mut settings = Settings::default();
        assert!(settings.load_initial_state().unwrap().is_none());

        settings.input.initial_state_file = Some(pattern);
        let grid = settings.load_initial_state().unwrap().unwrap();
        assert_eq!(grid.living_count(), 4);
    }
}
