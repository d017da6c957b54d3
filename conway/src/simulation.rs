//! Pairs an engine with the renderer that displays it.

use crate::engine::SimulationEngine;
use crate::render::Renderer;
use std::sync::Arc;
use tracing::info;

/// A simulation shared between its scheduler and whoever edits it.
pub type SharedSimulation<R> = Arc<parking_lot::Mutex<Simulation<R>>>;

/// What the scheduler should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Halt,
}

pub struct Simulation<R> {
    engine: SimulationEngine,
    renderer: R,
    halt_on_repeat: bool,
}

impl<R: Renderer> Simulation<R> {
    pub fn new(engine: SimulationEngine, renderer: R) -> Self {
        Simulation {
            engine,
            renderer,
            halt_on_repeat: false,
        }
    }

    /// Stop advancing once the engine reports a repeating grid.
    pub fn halt_on_repeat(mut self, halt: bool) -> Self {
        self.halt_on_repeat = halt;
        self
    }

    pub fn into_shared(self) -> SharedSimulation<R> {
        Arc::new(parking_lot::Mutex::new(self))
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Draws the current state without advancing.
    pub fn render(&mut self) {
        self.renderer.render(self.engine.state());
    }

    /// Steps the engine and draws the result.
    pub fn advance(&mut self) -> Tick {
        let state = self.engine.step();
        self.renderer.render(state);

        if self.halt_on_repeat && self.engine.is_repeating() {
            info!(generation = self.engine.generation(), "grid is repeating, halting");
            return Tick::Halt;
        }
        Tick::Continue
    }
}
