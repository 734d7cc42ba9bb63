// src/exec/process.rs

//! Individual process runner.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result as AnyResult};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::engine::{LaunchEvent, ProcessOutcome, ProcessSpec};
use crate::errors::{LauncherError, Result};
use crate::exec::output::{forward_lines, Stream};
use crate::types::OutputMode;

/// Spawn the child for `spec` from the resolved executable `path`.
///
/// With `OutputMode::Screen` the child inherits the terminal; with
/// `OutputMode::Log` stdout and stderr are piped and forwarded line by line.
pub fn start_process(spec: &ProcessSpec, path: &Path) -> Result<Child> {
    let mut cmd = Command::new(path);
    cmd.args(spec.ros_args())
        .stdin(Stdio::null())
        .kill_on_drop(true);

    match spec.output {
        OutputMode::Screen => {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        OutputMode::Log => {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }
    }

    let mut child = cmd.spawn().map_err(|e| {
        LauncherError::LaunchError(format!(
            "failed to start process '{}' ({}): {e}",
            spec.name,
            path.display()
        ))
    })?;

    info!(
        process = %spec.name,
        pid = child.id().unwrap_or_default(),
        "process started with pid [{}]",
        child.id().unwrap_or_default()
    );

    if let Some(stdout) = child.stdout.take() {
        forward_lines(spec.name.clone(), Stream::Stdout, stdout);
    }
    if let Some(stderr) = child.stderr.take() {
        forward_lines(spec.name.clone(), Stream::Stderr, stderr);
    }

    Ok(child)
}

/// Wait for `child` to exit, or kill it when `cancel_rx` fires, then emit
/// exactly one `ProcessExited` event.
pub async fn supervise(
    child: Child,
    spec: ProcessSpec,
    runtime_tx: mpsc::Sender<LaunchEvent>,
    cancel_rx: oneshot::Receiver<()>,
) {
    let name = spec.name.clone();
    let outcome = match supervise_inner(child, &spec, cancel_rx).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(process = %name, error = %err, "process supervision error");
            ProcessOutcome::Failed(-1)
        }
    };

    if runtime_tx
        .send(LaunchEvent::ProcessExited { name, outcome })
        .await
        .is_err()
    {
        debug!(process = %spec.name, "runtime gone; exit event dropped");
    }
}

async fn supervise_inner(
    mut child: Child,
    spec: &ProcessSpec,
    mut cancel_rx: oneshot::Receiver<()>,
) -> AnyResult<ProcessOutcome> {
    let pid = child.id().unwrap_or_default();

    tokio::select! {
        status_res = child.wait() => {
            let status = status_res
                .with_context(|| format!("waiting for process '{}'", spec.name))?;

            let outcome = outcome_from_status(status);
            match outcome {
                ProcessOutcome::Success => {
                    info!(
                        process = %spec.name,
                        pid,
                        "process has finished cleanly [pid {pid}]"
                    );
                }
                ProcessOutcome::Killed => {
                    info!(process = %spec.name, pid, "process was interrupted [pid {pid}]");
                }
                ProcessOutcome::Failed(code) => {
                    error!(
                        process = %spec.name,
                        pid,
                        exit_code = code,
                        "process has died [pid {pid}, exit code {code}]"
                    );
                }
            }
            Ok(outcome)
        }

        cancel = &mut cancel_rx => {
            if let Err(e) = cancel {
                debug!(
                    process = %spec.name,
                    error = %e,
                    "cancel channel closed; stopping process"
                );
            }
            info!(process = %spec.name, pid, "stopping process [pid {pid}]");
            if let Err(e) = child.kill().await {
                warn!(process = %spec.name, pid, error = %e, "failed to kill process");
            }
            Ok(ProcessOutcome::Killed)
        }
    }
}

#[cfg(unix)]
const SIGINT: i32 = 2;
#[cfg(unix)]
const SIGTERM: i32 = 15;

/// Map an exit status to an outcome.
///
/// A child stopped by SIGINT or SIGTERM counts as `Killed`: a terminal
/// Ctrl-C reaches the whole process group, so the child usually dies from
/// it before the launcher has handled its own signal. Other signal deaths
/// are reported as `Failed(-signal)`.
pub fn outcome_from_status(status: ExitStatus) -> ProcessOutcome {
    if status.success() {
        return ProcessOutcome::Success;
    }
    if let Some(code) = status.code() {
        return ProcessOutcome::Failed(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        match status.signal() {
            Some(SIGINT) | Some(SIGTERM) => return ProcessOutcome::Killed,
            Some(signal) => return ProcessOutcome::Failed(-signal),
            None => {}
        }
    }

    ProcessOutcome::Failed(-1)
}
