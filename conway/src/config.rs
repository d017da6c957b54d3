//! Configuration for a simulation run.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CELL_SIZE: u32 = 12;
pub const DEFAULT_EXISTENCE_PROBABILITY: u32 = 15;
pub const DEFAULT_GENERATION_INTERVAL_MS: u64 = 1000;

/// Simulation and display parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Width of the drawing surface in pixels
    pub width_px: u32,
    /// Height of the drawing surface in pixels
    pub height_px: u32,
    /// Diameter of each cell in pixels
    pub cell_size: u32,
    /// Cells start alive with roughly `1 / initial_existence_probability` chance
    pub initial_existence_probability: u32,
    /// Time between generations
    pub generation_interval_ms: u64,
    /// Random seed for a reproducible initial grid
    pub seed: Option<u64>,
    /// Stop ticking once the grid starts repeating
    pub halt_on_repeat: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width_px: 800,
            height_px: 600,
            cell_size: DEFAULT_CELL_SIZE,
            initial_existence_probability: DEFAULT_EXISTENCE_PROBABILITY,
            generation_interval_ms: DEFAULT_GENERATION_INTERVAL_MS,
            seed: None,
            halt_on_repeat: false,
        }
    }
}

impl LifeConfig {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let config: LifeConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Grid size in cells. Partial cells at the right and bottom edges are
    /// truncated away.
    pub fn grid_dimensions(&self) -> Result<(usize, usize)> {
        if self.cell_size == 0 {
            return Err(Error::InvalidCellSize);
        }
        let width = (self.width_px / self.cell_size) as usize;
        let height = (self.height_px / self.cell_size) as usize;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok((width, height))
    }

    pub fn generation_interval(&self) -> Duration {
        Duration::from_millis(self.generation_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_existence_probability == 0 {
            return Err(Error::InvalidProbability(self.initial_existence_probability));
        }
        if self.generation_interval_ms == 0 {
            return Err(Error::InvalidInterval);
        }
        self.grid_dimensions()?;
        Ok(())
    }
}
