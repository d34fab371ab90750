pub mod config;
pub mod constants;
pub mod controller;
pub mod diagram;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod mesh;
pub mod model;
pub mod render;
pub mod scan;
pub mod smoothing;
pub mod state;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use config::VisualizerConfig;
pub use constants::*;
pub use controller::{ControlAction, Controller};
pub use error::ConfigError;
pub use model::{compute_energy_levels, EnergyLevels};
pub use smoothing::SmoothedDistortion;
pub use state::*;
