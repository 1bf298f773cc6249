//! File I/O for initial-state pattern files

use super::Grid;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a pattern from a text file
/// Format: one row per line, `0` dead and `1` alive, optionally space separated
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a pattern from its text representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let mut rows = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::with_capacity(line.len());
        for (col_idx, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
            match ch {
                '0' => row.push(false),
                '1' => row.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at line {}, column {}. Only '0' and '1' are allowed",
                    ch,
                    line_idx + 1,
                    col_idx
                ),
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    Ok(Grid::from_rows(rows)?)
}

/// Save a pattern in compact form
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid_to_string(grid))
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Compact text form, one `0`/`1` character per cell
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows * (grid.cols + 1));

    for row in 0..grid.rows {
        for &cell in grid.row(row) {
            result.push(if cell { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Write the bundled example patterns into a directory
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        (
            "glider.txt",
            "0100000000\n0010000000\n1110000000\n0000000000\n0000000000\n\
             0000000000\n0000000000\n0000000000\n0000000000\n0000000000\n",
        ),
        ("blinker.txt", "00000\n00000\n01110\n00000\n00000\n"),
        ("block.txt", "0000\n0110\n0110\n0000\n"),
        ("beacon.txt", "110000\n110000\n001100\n001100\n000000\n000000\n"),
        (
            "mixed.txt",
            "0000000000\n0000000000\n0000000000\n0001110000\n0000000000\n\
             0000000000\n0010000110\n1010000110\n0110000000\n0000000000\n",
        ),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let grid = parse_grid_from_string("010\n101\n010\n").unwrap();

        assert_eq!(grid.shape(), (3, 3));
        assert_eq!(grid.living_count(), 4);
        assert!(grid.get(0, 1));
        assert!(grid.get(1, 0));
        assert!(grid.get(1, 2));
        assert!(grid.get(2, 1));
    }

    #[test]
    fn test_parse_space_separated() {
        let compact = parse_grid_from_string("0110\n1001\n").unwrap();
        let spaced = parse_grid_from_string("0 1 1 0\n\n1 0 0 1\n").unwrap();
        assert_eq!(compact, spaced);
    }

    #[test]
    fn test_grid_to_string() {
        let grid = Grid::from_values(&[&[0, 1, 0], &[1, 0, 1]]).unwrap();
        assert_eq!(grid_to_string(&grid), "010\n101\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_grid.txt");

        let original = Grid::from_values(&[&[1, 0, 1], &[0, 1, 0]]).unwrap();
        save_grid_to_file(&original, &file_path).unwrap();

        let loaded = load_grid_from_file(&file_path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_grid_from_string("010\n1X1\n010\n").is_err());
        assert!(parse_grid_from_string("010\n11\n010\n").is_err());
        assert!(parse_grid_from_string("").is_err());
        assert!(parse_grid_from_string("\n  \n").is_err());
    }

    #[test]
    fn test_create_example_grids() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();

        for name in ["glider", "blinker", "block", "beacon", "mixed"] {
            assert!(temp_dir.path().join(format!("{}.txt", name)).exists());
        }

        let glider = load_grid_from_file(temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!(glider.shape(), (10, 10));
        assert_eq!(glider.living_count(), 5);

        let mixed = load_grid_from_file(temp_dir.path().join("mixed.txt")).unwrap();
        assert_eq!(mixed.living_count(), 12);
    }
}
