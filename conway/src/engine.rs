//! The simulation engine: owns the grid and advances it one generation at a time.

use crate::config::{DEFAULT_EXISTENCE_PROBABILITY, LifeConfig};
use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, warn};

/// Number of recent grids remembered for repetition detection.
const HISTORY_LEN: usize = 10;

/// Snapshot of the simulation handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationState {
    pub grid: Grid,
    /// Starts at 1 for the initial grid.
    pub generation: u64,
    /// Number of live cells in `grid`.
    pub live_count: usize,
}

impl SimulationState {
    fn initial(grid: Grid) -> Self {
        let live_count = grid.live_count();
        SimulationState {
            grid,
            generation: 1,
            live_count,
        }
    }
}

pub struct SimulationEngine {
    state: SimulationState,
    // Write buffer for the next generation, swapped with `state.grid` after each step.
    scratch: Grid,
    existence_probability: u32,
    rng: ChaCha8Rng,
    grid_history: VecDeque<u64>,
    repeating: bool,
}

impl SimulationEngine {
    /// Creates an engine with a randomly seeded grid of `width x height` cells.
    ///
    /// Each cell starts alive with roughly `1 / existence_probability` chance.
    pub fn new(width: usize, height: usize, existence_probability: u32) -> Result<Self> {
        Self::with_rng(width, height, existence_probability, ChaCha8Rng::from_entropy())
    }

    /// Like [`SimulationEngine::new`] but with a reproducible random stream.
    pub fn with_seed(width: usize, height: usize, existence_probability: u32, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, existence_probability, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_config(config: &LifeConfig) -> Result<Self> {
        config.validate()?;
        let (width, height) = config.grid_dimensions()?;
        match config.seed {
            Some(seed) => Self::with_seed(width, height, config.initial_existence_probability, seed),
            None => Self::new(width, height, config.initial_existence_probability),
        }
    }

    /// Creates an engine starting from an explicit grid.
    pub fn from_grid(grid: Grid) -> Self {
        Self::from_parts(grid, DEFAULT_EXISTENCE_PROBABILITY, ChaCha8Rng::from_entropy())
    }

    fn with_rng(width: usize, height: usize, existence_probability: u32, mut rng: ChaCha8Rng) -> Result<Self> {
        let grid = Grid::random(width, height, existence_probability, &mut rng)?;
        Ok(Self::from_parts(grid, existence_probability, rng))
    }

    fn from_parts(grid: Grid, existence_probability: u32, rng: ChaCha8Rng) -> Self {
        let scratch = grid.clone();
        let mut engine = SimulationEngine {
            state: SimulationState::initial(grid),
            scratch,
            existence_probability,
            rng,
            grid_history: VecDeque::with_capacity(HISTORY_LEN),
            repeating: false,
        };
        engine.remember_grid();
        engine
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    pub fn live_count(&self) -> usize {
        self.state.live_count
    }

    pub fn width(&self) -> usize {
        self.state.grid.width()
    }

    pub fn height(&self) -> usize {
        self.state.grid.height()
    }

    /// True when the latest step produced a grid seen within the last few
    /// generations (a still life or short oscillator).
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// Advances one generation.
    pub fn step(&mut self) -> &SimulationState {
        let live_count = self.state.grid.step_into(&mut self.scratch);
        std::mem::swap(&mut self.state.grid, &mut self.scratch);
        self.state.generation += 1;
        self.state.live_count = live_count;
        self.repeating = self.remember_grid();

        debug!(
            generation = self.state.generation,
            live_count = self.state.live_count,
            repeating = self.repeating,
            "stepped"
        );
        &self.state
    }

    /// Replaces the grid with a fresh random one and restarts at generation 1.
    pub fn reseed(&mut self) -> &SimulationState {
        let grid = Grid::random(self.width(), self.height(), self.existence_probability, &mut self.rng)
            .unwrap_or_else(|_| self.state.grid.clone());
        self.restart(grid)
    }

    /// Replaces the grid with `grid`, which must match the engine's dimensions.
    pub fn load(&mut self, grid: Grid) -> Result<&SimulationState> {
        if grid.width() != self.width() || grid.height() != self.height() {
            warn!(
                width = grid.width(),
                height = grid.height(),
                "rejected grid with mismatched dimensions"
            );
            return Err(Error::DimensionMismatch {
                width: self.width(),
                height: self.height(),
                actual_width: grid.width(),
                actual_height: grid.height(),
            });
        }
        Ok(self.restart(grid))
    }

    /// Kills every cell and restarts at generation 1.
    pub fn clear(&mut self) -> &SimulationState {
        let mut grid = self.state.grid.clone();
        for row in 0..grid.height() {
            for column in 0..grid.width() {
                grid.set(column, row, Cell::Dead);
            }
        }
        self.restart(grid)
    }

    /// Flips one cell, keeping the current generation number.
    pub fn toggle(&mut self, column: usize, row: usize) -> Option<Cell> {
        let cell = self.state.grid.toggle(column, row)?;
        self.state.live_count = match cell {
            Cell::Alive => self.state.live_count + 1,
            Cell::Dead => self.state.live_count - 1,
        };
        self.grid_history.clear();
        self.repeating = false;
        self.remember_grid();
        Some(cell)
    }

    fn restart(&mut self, grid: Grid) -> &SimulationState {
        self.state = SimulationState::initial(grid);
        self.grid_history.clear();
        self.repeating = false;
        self.remember_grid();
        &self.state
    }

    /// Records the current grid's hash; returns whether it was already known.
    fn remember_grid(&mut self) -> bool {
        let mut hasher = DefaultHasher::new();
        self.state.grid.hash(&mut hasher);
        let current_hash = hasher.finish();

        if self.grid_history.contains(&current_hash) {
            return true;
        }
        if self.grid_history.len() == HISTORY_LEN {
            self.grid_history.pop_front();
        }
        self.grid_history.push_back(current_hash);
        false
    }
}
