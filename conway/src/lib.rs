//! # conway
//!
//! Conway's Game of Life on a fixed-size grid with bounded (non-wrapping)
//! edges, plus the pieces needed to drive it on a timer and hand each
//! generation to a renderer.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod render;
pub mod scheduler;
pub mod simulation;

pub use config::LifeConfig;
pub use engine::{SimulationEngine, SimulationState};
pub use error::{Error, Result};
pub use grid::{Cell, Grid};
pub use patterns::{PATTERNS, Pattern};
pub use render::{Renderer, overlay_lines};
pub use scheduler::Scheduler;
pub use simulation::{SharedSimulation, Simulation, Tick};
