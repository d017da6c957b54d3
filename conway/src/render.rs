//! The boundary between the engine and whatever draws it.

use crate::engine::SimulationState;

/// Receives a snapshot of the simulation once per tick.
///
/// The first call carries the initial grid; every later call carries the
/// grid produced by the step just taken.
pub trait Renderer {
    fn render(&mut self, state: &SimulationState);
}

impl<F> Renderer for F
where
    F: FnMut(&SimulationState),
{
    fn render(&mut self, state: &SimulationState) {
        self(state)
    }
}

/// The two lines of the stats overlay.
pub fn overlay_lines(state: &SimulationState) -> [String; 2] {
    [
        format!("Generation: {}", state.generation),
        format!("Cells: {}", state.live_count),
    ]
}
