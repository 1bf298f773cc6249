//! Display and output formatting utilities

use crate::game_of_life::Grid;
use crate::simulation::{History, Simulation};

/// Format grids and histories for the terminal
pub struct HistoryFormatter;

impl HistoryFormatter {
    /// One character per cell
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows * (grid.cols + 1));
        for row in 0..grid.rows {
            for &cell in grid.row(row) {
                output.push(if cell { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Two characters per cell with row and column numbers
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.cols {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.rows {
            output.push_str(&format!("{:2} ", row));
            for &cell in grid.row(row) {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Header line describing a finished or pending run
    pub fn format_run_summary(simulation: &Simulation) -> String {
        let initial = simulation.initial_state();
        let origin = match simulation.seed() {
            Some(seed) => format!("random (seed {})", seed),
            None => "pattern file".to_string(),
        };

        format!(
            "Grid: {}x{}  Steps: {}  Initial state: {}  Living: {} ({:.1}%)",
            simulation.rows(),
            simulation.cols(),
            simulation.n_steps(),
            origin,
            initial.living_count(),
            initial.density() * 100.0
        )
    }

    /// Population table, one line per step
    pub fn format_population_table(history: &History) -> String {
        let mut output = String::new();

        output.push_str("Step     | Living | Density | Change\n");
        output.push_str("---------|--------|---------|-------\n");

        let mut previous: Option<usize> = None;
        for (step, grid) in history.iter().enumerate() {
            let living = grid.living_count();
            let change = match previous {
                Some(prev) => format!("{:+}", living as i64 - prev as i64),
                None => "-".to_string(),
            };
            output.push_str(&format!(
                "{:8} | {:6} | {:6.1}% | {}\n",
                step,
                living,
                grid.density() * 100.0,
                change
            ));
            previous = Some(living);
        }

        output
    }

    /// Every step of the history, each labelled with its iteration index
    pub fn format_evolution(history: &History) -> String {
        let mut output = String::new();
        for (step, grid) in history.iter().enumerate() {
            output.push_str(&format!(
                "Iteration {} (Living: {}):\n",
                step,
                grid.living_count()
            ));
            output.push_str(&Self::format_grid_compact(grid));
            output.push('\n');
        }
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Grid {
        Grid::from_values(&[&[0, 0, 0], &[1, 1, 1], &[0, 0, 0]]).unwrap()
    }

    #[test]
    fn test_grid_formatting() {
        let compact = HistoryFormatter::format_grid_compact(&blinker());
        assert_eq!(compact, "···\n███\n···\n");

        let with_coords = HistoryFormatter::format_grid_with_coords(&blinker());
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ██████"));
    }

    #[test]
    fn test_population_table() {
        let mut sim = Simulation::new(3, 3, 2, Some(blinker())).unwrap();
        sim.simulate();

        let table = HistoryFormatter::format_population_table(sim.history());
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].ends_with("| -"));
        assert!(lines[3].ends_with("| +0"));
    }

    #[test]
    fn test_evolution_and_summary() {
        let mut sim = Simulation::new(3, 3, 2, Some(blinker())).unwrap();
        sim.simulate();

        let evolution = HistoryFormatter::format_evolution(sim.history());
        assert!(evolution.contains("Iteration 0 (Living: 3)"));
        assert!(evolution.contains("Iteration 1 (Living: 3)"));

        let summary = HistoryFormatter::format_run_summary(&sim);
        assert!(summary.contains("Grid: 3x3"));
        assert!(summary.contains("pattern file"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
        assert!(ColorOutput::error("failed").contains("failed"));
    }
}
