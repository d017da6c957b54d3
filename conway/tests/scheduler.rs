use conway::{Grid, Renderer, Scheduler, Simulation, SimulationEngine, SimulationState};
use std::sync::Arc;
use std::time::Duration;

const PERIOD: Duration = Duration::from_millis(1000);

/// Records the generation of every frame it is handed.
#[derive(Clone, Default)]
struct Recorder {
    frames: Arc<parking_lot::Mutex<Vec<u64>>>,
}

impl Recorder {
    fn frames(&self) -> Vec<u64> {
        self.frames.lock().clone()
    }
}

impl Renderer for Recorder {
    fn render(&mut self, state: &SimulationState) {
        self.frames.lock().push(state.generation);
    }
}

fn blinker() -> SimulationEngine {
    SimulationEngine::from_grid(Grid::from_rows(&[".....", ".....", ".###.", ".....", "....."]).unwrap())
}

#[test]
fn zero_period_is_rejected() {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    assert!(Scheduler::new(Duration::ZERO, runtime.handle().clone()).is_err());
}

#[tokio::test(start_paused = true)]
async fn start_renders_immediately_then_once_per_period() {
    let recorder = Recorder::default();
    let simulation = Simulation::new(blinker(), recorder.clone()).into_shared();
    let mut scheduler = Scheduler::new(PERIOD, tokio::runtime::Handle::current()).unwrap();

    scheduler.start(&simulation);
    assert_eq!(recorder.frames(), vec![1]);

    tokio::time::sleep(PERIOD * 3 + PERIOD / 2).await;
    assert_eq!(recorder.frames(), vec![1, 2, 3, 4]);
    assert!(scheduler.is_running());
}

#[tokio::test(start_paused = true)]
async fn stop_prevents_further_ticks() {
    let recorder = Recorder::default();
    let simulation = Simulation::new(blinker(), recorder.clone()).into_shared();
    let mut scheduler = Scheduler::new(PERIOD, tokio::runtime::Handle::current()).unwrap();

    scheduler.start(&simulation);
    tokio::time::sleep(PERIOD + PERIOD / 2).await;
    scheduler.stop();
    tokio::time::sleep(PERIOD * 5).await;

    assert_eq!(recorder.frames(), vec![1, 2]);
    assert_eq!(simulation.lock().engine().generation(), 2);
    assert!(!scheduler.is_running());
}

#[tokio::test(start_paused = true)]
async fn start_and_stop_are_idempotent() {
    let recorder = Recorder::default();
    let simulation = Simulation::new(blinker(), recorder.clone()).into_shared();
    let mut scheduler = Scheduler::new(PERIOD, tokio::runtime::Handle::current()).unwrap();

    scheduler.stop();
    scheduler.start(&simulation);
    scheduler.start(&simulation);
    tokio::time::sleep(PERIOD + PERIOD / 2).await;

    // A second tick loop would have produced a duplicate frame.
    assert_eq!(recorder.frames(), vec![1, 2]);

    scheduler.stop();
    scheduler.stop();
    assert!(!scheduler.is_running());
}

#[tokio::test(start_paused = true)]
async fn halting_on_repeat_ends_the_tick_loop() {
    let recorder = Recorder::default();
    let simulation = Simulation::new(blinker(), recorder.clone())
        .halt_on_repeat(true)
        .into_shared();
    let mut scheduler = Scheduler::new(PERIOD, tokio::runtime::Handle::current()).unwrap();

    scheduler.start(&simulation);
    tokio::time::sleep(PERIOD * 6).await;

    // The blinker returns to its first phase at generation 3.
    assert_eq!(recorder.frames(), vec![1, 2, 3]);
    assert!(!scheduler.is_running());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_scheduler_stops_it() {
    let recorder = Recorder::default();
    let simulation = Simulation::new(blinker(), recorder.clone()).into_shared();
    {
        let mut scheduler = Scheduler::new(PERIOD, tokio::runtime::Handle::current()).unwrap();
        scheduler.start(&simulation);
    }
    tokio::time::sleep(PERIOD * 3).await;

    assert_eq!(recorder.frames(), vec![1]);
}
