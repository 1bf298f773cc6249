//! Utility functions and helpers

pub mod display;

pub use display::{HistoryFormatter, ColorOutput, Color};
