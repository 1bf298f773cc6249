//! Simulation engine and history buffer

pub mod engine;
pub mod history;

pub use engine::{resolve_initial_state, Simulation, DEFAULT_SEED};
pub use history::{FlatHistory, History, HistoryMetadata};
