//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    Settings, SimulationConfig, InputConfig, OutputConfig, AnimationConfig, CliOverrides
};
