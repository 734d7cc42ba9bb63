// src/exec/backend.rs

//! Pluggable process backend.
//!
//! The runtime talks to a `ProcessBackend` instead of spawning processes
//! itself. This makes it easy to swap in a fake backend in tests while
//! keeping the production implementation here.
//!
//! - `RealProcessBackend` resolves executables under the install prefixes,
//!   spawns them and reports their exit via `LaunchEvent::ProcessExited`.
//! - Tests can provide their own `ProcessBackend` that records which
//!   processes were requested and emits exit events directly.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::engine::{LaunchEvent, ProcessName, ProcessSpec};
use crate::errors::Result;

use super::process::{start_process, supervise};
use super::resolve::ExecutableResolver;

pub type BackendFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Trait abstracting how processes are started and stopped.
pub trait ProcessBackend: Send {
    /// Start the process described by `spec`.
    ///
    /// Failing to locate or start it is an error; its later exit is reported
    /// asynchronously as a `LaunchEvent`.
    fn spawn_process(&mut self, spec: ProcessSpec) -> BackendFuture<'_>;

    /// Stop every process started so far.
    fn shutdown(&mut self) -> BackendFuture<'_>;
}

/// Backend used in production.
pub struct RealProcessBackend {
    runtime_tx: mpsc::Sender<LaunchEvent>,
    resolver: ExecutableResolver,
    active: HashMap<ProcessName, oneshot::Sender<()>>,
}

impl RealProcessBackend {
    pub fn new(runtime_tx: mpsc::Sender<LaunchEvent>, resolver: ExecutableResolver) -> Self {
        Self {
            runtime_tx,
            resolver,
            active: HashMap::new(),
        }
    }
}

impl ProcessBackend for RealProcessBackend {
    fn spawn_process(&mut self, spec: ProcessSpec) -> BackendFuture<'_> {
        Box::pin(async move {
            let path = self.resolver.resolve(&spec.package, &spec.executable)?;
            let child = start_process(&spec, &path)?;

            let (cancel_tx, cancel_rx) = oneshot::channel();
            self.active.insert(spec.name.clone(), cancel_tx);

            let runtime_tx = self.runtime_tx.clone();
            tokio::spawn(supervise(child, spec, runtime_tx, cancel_rx));
            Ok(())
        })
    }

    fn shutdown(&mut self) -> BackendFuture<'_> {
        Box::pin(async move {
            for (name, cancel) in self.active.drain() {
                if cancel.send(()).is_err() {
                    debug!(process = %name, "process already exited");
                }
            }
            Ok(())
        })
    }
}
