use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use waypoint_launch::engine::{LaunchEvent, ProcessOutcome, ProcessSpec};
use waypoint_launch::exec::backend::BackendFuture;
use waypoint_launch::exec::ProcessBackend;

/// A fake backend that:
/// - records every process it was asked to start
/// - immediately reports `ProcessExited` with a fixed outcome,
///   unless `hold_processes()` was called, in which case processes "run"
///   until `shutdown()` and then report `Killed`.
pub struct FakeBackend {
    runtime_tx: mpsc::Sender<LaunchEvent>,
    spawned: Arc<Mutex<Vec<ProcessSpec>>>,
    outcome: ProcessOutcome,
    hold: bool,
    running: Vec<String>,
    shutdowns: Arc<Mutex<usize>>,
}

impl FakeBackend {
    pub fn new(runtime_tx: mpsc::Sender<LaunchEvent>) -> Self {
        Self {
            runtime_tx,
            spawned: Arc::new(Mutex::new(Vec::new())),
            outcome: ProcessOutcome::Success,
            hold: false,
            running: Vec::new(),
            shutdowns: Arc::new(Mutex::new(0)),
        }
    }

    /// Outcome reported for every process.
    pub fn with_outcome(mut self, outcome: ProcessOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Keep processes running until shutdown.
    pub fn hold_processes(mut self) -> Self {
        self.hold = true;
        self
    }

    pub fn spawned(&self) -> Arc<Mutex<Vec<ProcessSpec>>> {
        Arc::clone(&self.spawned)
    }

    pub fn shutdowns(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.shutdowns)
    }
}

impl ProcessBackend for FakeBackend {
    fn spawn_process(&mut self, spec: ProcessSpec) -> BackendFuture<'_> {
        Box::pin(async move {
            self.spawned.lock().unwrap().push(spec.clone());

            if self.hold {
                self.running.push(spec.name);
                return Ok(());
            }

            self.runtime_tx
                .send(LaunchEvent::ProcessExited {
                    name: spec.name,
                    outcome: self.outcome,
                })
                .await
                .map_err(anyhow::Error::from)?;
            Ok(())
        })
    }

    fn shutdown(&mut self) -> BackendFuture<'_> {
        Box::pin(async move {
            *self.shutdowns.lock().unwrap() += 1;
            for name in self.running.drain(..) {
                self.runtime_tx
                    .send(LaunchEvent::ProcessExited {
                        name,
                        outcome: ProcessOutcome::Killed,
                    })
                    .await
                    .map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }
}
