//! Periodic driver: renders the simulation, then steps and renders it once per period.

use crate::error::{Error, Result};
use crate::render::Renderer;
use crate::simulation::{SharedSimulation, Tick};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

struct Running {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Start/stop handle for a ticking simulation.
///
/// Dropping the scheduler stops it.
pub struct Scheduler {
    period: Duration,
    runtime: Handle,
    running: Option<Running>,
}

impl Scheduler {
    /// Creates a stopped scheduler that will spawn its tick loop on `runtime`.
    pub fn new(period: Duration, runtime: Handle) -> Result<Self> {
        if period.is_zero() {
            return Err(Error::InvalidInterval);
        }
        Ok(Scheduler {
            period,
            runtime,
            running: None,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// True while the tick loop is alive. A loop that halted on its own
    /// counts as stopped.
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.token.is_cancelled() && !running.task.is_finished())
    }

    /// Renders the current state right away, then steps and renders once per
    /// period. Does nothing if already running.
    pub fn start<R>(&mut self, simulation: &SharedSimulation<R>)
    where
        R: Renderer + Send + 'static,
    {
        if self.is_running() {
            debug!("scheduler already running");
            return;
        }

        simulation.lock().render();

        let token = CancellationToken::new();
        let task = self.runtime.spawn(run_ticks(
            simulation.clone(),
            self.period,
            token.clone(),
        ));
        self.running = Some(Running { token, task });
        info!(period_ms = self.period.as_millis() as u64, "simulation started");
    }

    /// Cancels all future ticks. A tick already in progress finishes first.
    /// Does nothing if already stopped.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.token.cancel();
            info!("simulation stopped");
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticks<R>(simulation: SharedSimulation<R>, period: Duration, token: CancellationToken)
where
    R: Renderer + Send + 'static,
{
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                let mut simulation = simulation.lock();
                if token.is_cancelled() {
                    break;
                }
                if simulation.advance() == Tick::Halt {
                    break;
                }
            }
        }
    }
    debug!("tick loop exited");
}
