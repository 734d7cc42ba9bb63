// src/engine/core.rs

//! Pure core of the launch engine.
//!
//! [`plan`] evaluates a description against the invoking command's overrides
//! and produces the full list of [`LaunchCommand`]s up front, so any
//! configuration error aborts the launch before a process is started.
//!
//! [`LaunchCore`] then consumes [`LaunchEvent`]s and decides when the launch
//! is finished. It has no channels, no Tokio types, and performs no IO.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::description::{LaunchAction, LaunchDescription, NodeAction};
use crate::engine::context::LaunchContext;
use crate::engine::{LaunchEvent, ProcessName, ProcessOutcome, ProcessSpec};
use crate::errors::Result;

/// Command produced by the core, to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchCommand {
    /// Emit an informational message.
    Log { message: String },
    /// Start one process.
    StartProcess(ProcessSpec),
    /// Stop every running process.
    ShutdownProcesses,
}

/// Result of evaluating a description.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub context: LaunchContext,
    pub commands: Vec<LaunchCommand>,
}

impl LaunchPlan {
    pub fn processes(&self) -> impl Iterator<Item = &ProcessSpec> {
        self.commands.iter().filter_map(|c| match c {
            LaunchCommand::StartProcess(spec) => Some(spec),
            _ => None,
        })
    }

    pub fn log_messages(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            LaunchCommand::Log { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

/// Evaluate every action of `description` in order.
pub fn plan(
    description: &LaunchDescription,
    overrides: &[(String, String)],
) -> Result<LaunchPlan> {
    let mut context = LaunchContext::from_overrides(overrides.iter().cloned());
    let mut commands = Vec::new();
    let mut instances: HashMap<String, usize> = HashMap::new();

    for action in description.actions() {
        match action {
            LaunchAction::DeclareArgument(arg) => {
                context.declare(arg)?;
                debug!(
                    argument = %arg.name,
                    value = context.get(&arg.name).unwrap_or_default(),
                    "launch argument resolved"
                );
            }
            LaunchAction::LogInfo(log) => {
                let fire = log
                    .condition
                    .as_ref()
                    .is_none_or(|condition| condition.evaluate(&context));
                if fire {
                    commands.push(LaunchCommand::Log {
                        message: log.msg.perform(&context)?,
                    });
                } else {
                    debug!(msg = %log.msg, "log action skipped; condition is false");
                }
            }
            LaunchAction::Node(node) => {
                let counter = instances.entry(node.executable.clone()).or_insert(0);
                *counter += 1;
                let spec = resolve_node(node, *counter, &context)?;
                commands.push(LaunchCommand::StartProcess(spec));
            }
        }
    }

    for name in context.undeclared_overrides() {
        warn!(argument = %name, "launch argument was provided but never declared");
    }

    Ok(LaunchPlan { context, commands })
}

fn resolve_node(
    node: &NodeAction,
    instance: usize,
    context: &LaunchContext,
) -> Result<ProcessSpec> {
    let parameters = node
        .parameters
        .iter()
        .map(|(name, value)| -> Result<(String, String)> {
            Ok((name.clone(), value.perform(context)?))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ProcessSpec {
        name: format!("{}-{}", node.executable, instance),
        package: node.package.clone(),
        executable: node.executable.clone(),
        node_name: node.name.clone(),
        output: node.output,
        parameters,
    })
}

/// Decision returned by the core after starting or handling an event.
#[derive(Debug, Clone)]
pub struct CoreStep {
    pub commands: Vec<LaunchCommand>,
    pub keep_running: bool,
}

/// Final record of a launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchSummary {
    pub processes: Vec<(ProcessName, ProcessOutcome)>,
    pub shutdown_requested: bool,
}

impl LaunchSummary {
    /// True if no process died with a failure.
    ///
    /// `Killed` processes were stopped on request (launcher shutdown, or an
    /// interrupt that reached the child first) and count as clean.
    pub fn success(&self) -> bool {
        self.processes
            .iter()
            .all(|(_, outcome)| !matches!(outcome, ProcessOutcome::Failed(_)))
    }
}

/// Tracks started processes until all of them have exited.
#[derive(Debug)]
pub struct LaunchCore {
    plan: Option<LaunchPlan>,
    running: BTreeSet<ProcessName>,
    summary: LaunchSummary,
}

impl LaunchCore {
    pub fn new(plan: LaunchPlan) -> Self {
        Self {
            plan: Some(plan),
            running: BTreeSet::new(),
            summary: LaunchSummary::default(),
        }
    }

    /// Hand out the planned commands. Only the first call returns any.
    pub fn start(&mut self) -> CoreStep {
        let Some(plan) = self.plan.take() else {
            return CoreStep {
                commands: Vec::new(),
                keep_running: !self.running.is_empty(),
            };
        };

        for spec in plan.processes() {
            self.running.insert(spec.name.clone());
        }

        CoreStep {
            commands: plan.commands,
            keep_running: !self.running.is_empty(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    pub fn step(&mut self, event: LaunchEvent) -> CoreStep {
        match event {
            LaunchEvent::ProcessExited { name, outcome } => {
                if self.running.remove(&name) {
                    self.summary.processes.push((name, outcome));
                } else {
                    debug!(process = %name, "exit event for unknown process ignored");
                }
                CoreStep {
                    commands: Vec::new(),
                    keep_running: !self.running.is_empty(),
                }
            }
            LaunchEvent::ShutdownRequested => {
                let first = !self.summary.shutdown_requested;
                self.summary.shutdown_requested = true;

                let commands = if first && !self.running.is_empty() {
                    vec![LaunchCommand::ShutdownProcesses]
                } else {
                    Vec::new()
                };

                CoreStep {
                    commands,
                    keep_running: !self.running.is_empty(),
                }
            }
        }
    }

    /// Record a shutdown request that was raised outside the event stream,
    /// e.g. a Ctrl-C that arrived after the last process had already exited.
    pub fn note_shutdown_requested(&mut self) {
        self.summary.shutdown_requested = true;
    }

    pub fn into_summary(self) -> LaunchSummary {
        self.summary
    }
}
