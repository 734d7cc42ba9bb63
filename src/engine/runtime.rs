// src/engine/runtime.rs

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::ProcessBackend;

use super::core::{LaunchCommand, LaunchCore, LaunchSummary};
use super::LaunchEvent;

/// Target used for messages emitted by `LogInfo` actions.
pub const USER_LOG_TARGET: &str = "launch.user";

/// Executes the core's commands through a `ProcessBackend` and feeds
/// `LaunchEvent`s back into the core until the launch is finished.
pub struct Runtime<B: ProcessBackend> {
    core: LaunchCore,
    event_rx: mpsc::Receiver<LaunchEvent>,
    backend: B,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl<B: ProcessBackend> fmt::Debug for Runtime<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<B: ProcessBackend> Runtime<B> {
    pub fn new(core: LaunchCore, event_rx: mpsc::Receiver<LaunchEvent>, backend: B) -> Self {
        Self {
            core,
            event_rx,
            backend,
            shutdown_flag: None,
        }
    }

    /// Share a flag that the signal handler sets before it sends
    /// `ShutdownRequested`, so the summary records the request even when the
    /// processes exited before the event was read.
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Main loop.
    ///
    /// - Executes the planned commands in order.
    /// - Waits for process exits / shutdown requests until the core reports
    ///   that nothing is running any more.
    ///
    /// Any backend error (e.g. an executable that cannot be found) aborts the
    /// launch; processes already started are stopped on drop.
    pub async fn run(mut self) -> Result<LaunchSummary> {
        info!("launch runtime started");

        let step = self.core.start();
        for command in step.commands {
            self.execute_command(command).await?;
        }

        let mut keep_running = step.keep_running;
        while keep_running {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("launch event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);
            for command in step.commands {
                self.execute_command(command).await?;
            }
            keep_running = step.keep_running;
        }

        if self
            .shutdown_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
        {
            self.core.note_shutdown_requested();
        }

        let summary = self.core.into_summary();
        info!(
            processes = summary.processes.len(),
            success = summary.success(),
            "all processes have exited"
        );
        Ok(summary)
    }

    async fn execute_command(&mut self, command: LaunchCommand) -> Result<()> {
        match command {
            LaunchCommand::Log { message } => {
                info!(target: USER_LOG_TARGET, "{message}");
            }
            LaunchCommand::StartProcess(spec) => {
                debug!(process = %spec.name, package = %spec.package, "starting process");
                self.backend.spawn_process(spec).await?;
            }
            LaunchCommand::ShutdownProcesses => {
                info!("shutdown requested; stopping processes");
                self.backend.shutdown().await?;
            }
        }
        Ok(())
    }
}
