//! Exporters for a finished simulation history

pub mod animation;
pub mod text;

pub use animation::{save_history_gif, AnimationOptions};
pub use text::{load_history_txt, load_metadata_json, save_history_txt, save_metadata_json};

use crate::error::{LifeError, LifeResult};
use std::path::Path;

/// Fail unless `path` ends in `.{expected}`
pub(crate) fn check_extension(path: &Path, expected: &'static str) -> LifeResult<()> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected));

    if matches {
        Ok(())
    } else {
        Err(LifeError::InvalidDestination {
            path: path.to_path_buf(),
            expected,
        })
    }
}

/// Create the parent directory of an output file
pub(crate) fn ensure_parent(path: &Path) -> LifeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
