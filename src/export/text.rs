//! Flat text dump of a history and its JSON shape sidecar

use super::{check_extension, ensure_parent};
use crate::error::LifeResult;
use crate::simulation::{FlatHistory, History, HistoryMetadata};
use log::info;
use std::path::Path;

/// Write the flattened history, one grid row per line
pub fn save_history_txt<P: AsRef<Path>>(history: &History, path: P) -> LifeResult<()> {
    let path = path.as_ref();
    check_extension(path, "txt")?;
    ensure_parent(path)?;

    std::fs::write(path, history.flatten().to_text())?;
    info!(
        "Simulation saved as {} ({} steps, reshaped to {} rows)",
        path.display(),
        history.len(),
        history.len() * history.grid_shape().0
    );
    Ok(())
}

/// Read a dump and reshape it into `n_steps` grids
pub fn load_history_txt<P: AsRef<Path>>(path: P, n_steps: usize) -> LifeResult<History> {
    let content = std::fs::read_to_string(path)?;
    let flat = FlatHistory::parse(&content)?;
    History::restore(&flat, n_steps)
}

pub fn save_metadata_json<P: AsRef<Path>>(metadata: &HistoryMetadata, path: P) -> LifeResult<()> {
    let path = path.as_ref();
    check_extension(path, "json")?;
    ensure_parent(path)?;

    std::fs::write(path, serde_json::to_string_pretty(metadata)?)?;
    Ok(())
}

pub fn load_metadata_json<P: AsRef<Path>>(path: P) -> LifeResult<HistoryMetadata> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
