//! Command line front end for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_sim::{
    config::{CliOverrides, Settings},
    export::{load_history_txt, load_metadata_json},
    game_of_life::create_example_grids,
    run_simulation,
    utils::{ColorOutput, HistoryFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "game_of_life_sim")]
#[command(about = "Game of Life simulator with text and GIF export")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and export its history
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of grid rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Number of grid columns (overrides config)
        #[arg(long)]
        cols: Option<usize>,

        /// Number of steps to simulate (overrides config)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Seed for the random initial state (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Initial state pattern file (overrides config)
        #[arg(short, long)]
        initial: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Animation frame rate (overrides config)
        #[arg(long)]
        fps: Option<u32>,

        /// Number of animation frames (overrides config)
        #[arg(long)]
        frames: Option<usize>,

        /// Skip the GIF animation
        #[arg(long)]
        no_animation: bool,

        /// Print every generation
        #[arg(long)]
        show_evolution: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Restore a saved history and print it
    Inspect {
        /// History dump written by `run`
        #[arg(long)]
        history: PathBuf,

        /// Number of steps in the dump; read from the `.json` sidecar when omitted
        #[arg(short, long)]
        steps: Option<usize>,

        /// Print every generation
        #[arg(long)]
        show_evolution: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    init_logging(verbose);

    if let Err(err) = dispatch(cli.command) {
        eprintln!("{}", ColorOutput::error(&format!("❌ {:#}", err)));
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config,
            rows,
            cols,
            steps,
            seed,
            initial,
            output,
            fps,
            frames,
            no_animation,
            show_evolution,
            verbose,
        } => {
            let overrides = CliOverrides {
                rows,
                cols,
                steps,
                seed,
                initial_state_file: initial,
                output_dir: output,
                fps,
                frames,
                no_animation,
            };
            run_command(config, overrides, show_evolution, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Inspect { history, steps, show_evolution } => {
            inspect_command(history, steps, show_evolution)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    show_evolution: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🔄 Starting Game of Life simulation"));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Grid: {}x{}", settings.simulation.rows, settings.simulation.cols);
        println!("  Steps: {}", settings.simulation.steps);
        match settings.input.initial_state_file {
            Some(ref file) => println!("  Initial state: {}", file.display()),
            None => println!("  Initial state: random (seed {})", settings.simulation.seed),
        }
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    let start_time = Instant::now();
    let simulation = run_simulation(&settings)?;
    let total_time = start_time.elapsed();

    println!("{}", ColorOutput::success(&format!(
        "✅ Simulated {} steps in {:.3}s",
        simulation.n_steps(),
        total_time.as_secs_f64()
    )));
    println!("{}", HistoryFormatter::format_run_summary(&simulation));

    if show_evolution {
        println!("\nInitial state:");
        println!("{}", HistoryFormatter::format_grid_compact(simulation.initial_state()));
        println!("{}", HistoryFormatter::format_evolution(simulation.history()));
    } else {
        println!("\n{}", HistoryFormatter::format_population_table(simulation.history()));
    }

    println!("{}", ColorOutput::info("💾 Outputs:"));
    println!("  History: {}", settings.history_path().display());
    if settings.output.save_metadata {
        println!("  Metadata: {}", settings.metadata_path().display());
    }
    if settings.output.animation.enabled {
        println!("  Animation: {}", settings.animation_path().display());
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("input/patterns");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &patterns_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut glider_config = Settings::default();
    glider_config.simulation.rows = 10;
    glider_config.simulation.cols = 10;
    glider_config.simulation.steps = 28;
    glider_config.input.initial_state_file = Some(PathBuf::from("input/patterns/glider.txt"));
    glider_config.output.animation.fps = 4;
    glider_config.to_file(&examples_dir.join("glider.yaml"))?;

    let mut mixed_config = Settings::default();
    mixed_config.simulation.rows = 10;
    mixed_config.simulation.cols = 10;
    mixed_config.input.initial_state_file = Some(PathBuf::from("input/patterns/mixed.txt"));
    mixed_config.to_file(&examples_dir.join("mixed.yaml"))?;

    let mut random_config = Settings::default();
    random_config.simulation.rows = 64;
    random_config.simulation.cols = 64;
    random_config.simulation.steps = 100;
    random_config.output.animation.fps = 10;
    random_config.output.animation.cell_size = 4;
    random_config.to_file(&examples_dir.join("random.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own patterns to {}", patterns_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn inspect_command(
    history_path: PathBuf,
    steps: Option<usize>,
    show_evolution: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Inspecting saved history..."));

    let steps = match steps {
        Some(steps) => steps,
        None => {
            let metadata_path = history_path.with_extension("json");
            let metadata = load_metadata_json(&metadata_path).with_context(|| {
                format!(
                    "No --steps given and no readable metadata at {}",
                    metadata_path.display()
                )
            })?;
            metadata.steps
        }
    };

    let history = load_history_txt(&history_path, steps)
        .with_context(|| format!("Failed to restore history from {}", history_path.display()))?;

    let (rows, cols) = history.grid_shape();
    println!("History: {} steps of {}x{} grids", history.len(), rows, cols);

    if show_evolution {
        println!("\n{}", HistoryFormatter::format_evolution(&history));
    } else {
        println!("\n{}", HistoryFormatter::format_population_table(&history));
        if let Some(last) = history.grids().last() {
            println!("Final state:");
            println!("{}", HistoryFormatter::format_grid_with_coords(last));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life_sim",
            "run",
            "--config", "test.yaml",
            "--steps", "5",
            "--rows", "12",
            "--no-animation",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["game_of_life_sim", "inspect"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_dispatch_propagates_failures() {
        let temp_dir = tempdir().unwrap();
        let command = Commands::Inspect {
            history: temp_dir.path().join("missing.txt"),
            steps: Some(1),
            show_evolution: false,
        };
        assert!(dispatch(command).is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/glider.yaml").exists());
        assert!(temp_dir.path().join("input/patterns/glider.txt").exists());
    }

    #[test]
    fn test_inspect_uses_metadata_sidecar() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.simulation.steps = 3;
        settings.output.output_directory = temp_dir.path().to_path_buf();
        settings.output.animation.enabled = false;
        run_simulation(&settings).unwrap();

        assert!(inspect_command(settings.history_path(), None, false).is_ok());
        assert!(inspect_command(settings.history_path(), Some(7), false).is_err());

        std::fs::remove_file(settings.metadata_path()).unwrap();
        assert!(inspect_command(settings.history_path(), None, false).is_err());
        assert!(inspect_command(settings.history_path(), Some(3), true).is_ok());
    }
}
