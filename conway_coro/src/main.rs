// main.rs - Conway's Game of Life viewer driven by a tokio tick loop
// The engine lives in the `conway` crate; this binary renders it with egui.

use anyhow::Context as _;
use conway::{LifeConfig, Renderer, Scheduler, SharedSimulation, Simulation, SimulationEngine, SimulationState};
use eframe::egui;
use egui::Color32;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod ui;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,conway=debug".into()),
        )
        .with_target(true)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => LifeConfig::from_file(&path).with_context(|| format!("loading config from {path}"))?,
        None => LifeConfig::default(),
    };
    info!(?config, "starting viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width_px as f32 + 16.0, config.height_px as f32 + 80.0]),
        ..Default::default()
    };

    let app = LifeApp::new(config)?;
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| {
            let mut app = app;
            app.attach(&cc.egui_ctx);
            Box::new(app) as Box<dyn eframe::App>
        }),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with error: {e}"))
}

/// Renderer that publishes each snapshot to the UI thread.
pub struct FramePublisher {
    frames: watch::Sender<SimulationState>,
    ctx: Option<egui::Context>,
}

impl Renderer for FramePublisher {
    fn render(&mut self, state: &SimulationState) {
        self.frames.send_replace(state.clone());
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }
}

pub struct LifeApp {
    pub config: LifeConfig,
    pub simulation: SharedSimulation<FramePublisher>,
    pub frames: watch::Receiver<SimulationState>,
    pub scheduler: Scheduler,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,

    // Must drop after `scheduler`.
    _runtime: tokio::runtime::Runtime,
}

impl LifeApp {
    pub fn new(config: LifeConfig) -> anyhow::Result<Self> {
        // One worker: the tick loop is the only actor touching the engine.
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("conway-ticker")
            .enable_time()
            .build()?;

        let engine = SimulationEngine::from_config(&config)?;
        let (tx, frames) = watch::channel(engine.state().clone());
        let publisher = FramePublisher { frames: tx, ctx: None };
        let simulation = Simulation::new(engine, publisher)
            .halt_on_repeat(config.halt_on_repeat)
            .into_shared();
        let scheduler = Scheduler::new(config.generation_interval(), runtime.handle().clone())?;

        Ok(Self {
            config,
            simulation,
            frames,
            scheduler,
            live_color: Color32::WHITE,
            dead_color: Color32::BLACK,
            selected_pattern: 0,
            _runtime: runtime,
        })
    }

    /// Hooks the publisher up to the egui context and starts ticking.
    fn attach(&mut self, ctx: &egui::Context) {
        self.simulation.lock().renderer_mut().ctx = Some(ctx.clone());
        self.start();
    }

    pub fn start(&mut self) {
        self.scheduler.start(&self.simulation);
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Runs an edit against the engine and publishes the result.
    pub fn edit(&mut self, f: impl FnOnce(&mut SimulationEngine)) {
        let mut simulation = self.simulation.lock();
        f(simulation.engine_mut());
        simulation.render();
    }

    pub fn random_grid(&mut self) {
        self.stop();
        self.edit(|engine| {
            engine.reseed();
        });
    }

    pub fn clear_grid(&mut self) {
        self.stop();
        self.edit(|engine| {
            engine.clear();
        });
    }

    pub fn apply_selected_pattern(&mut self) {
        let Some(pattern) = conway::PATTERNS.get(self.selected_pattern) else {
            return;
        };
        self.stop();
        self.edit(|engine| {
            engine.clear();
            let mut grid = engine.grid().clone();
            pattern.place_centered(&mut grid);
            if let Err(e) = engine.load(grid) {
                warn!("could not apply pattern {}: {}", pattern.name, e);
            }
        });
    }

    pub fn toggle_cell(&mut self, column: usize, row: usize) {
        if self.scheduler.is_running() {
            return;
        }
        self.edit(|engine| {
            engine.toggle(column, row);
        });
    }
}
