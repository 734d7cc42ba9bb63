// src/engine/mod.rs

//! Launch engine.
//!
//! This module ties together:
//! - launch configurations ([`context`])
//! - evaluation of a [`LaunchDescription`](crate::description::LaunchDescription)
//!   into commands, and process bookkeeping until every process has exited
//!   ([`core`])
//! - the async runtime loop that executes those commands and reacts to
//!   process exits and Ctrl-C ([`runtime`])
//!
//! The core is synchronous and does no IO; the runtime is the IO shell.

use crate::types::OutputMode;

/// Name of one launched process instance, e.g. `tracker-1`.
pub type ProcessName = String;

/// How a launched process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Success,
    Failed(i32),
    /// Stopped by the launcher during shutdown.
    Killed,
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessOutcome::Success)
    }
}

/// Fully resolved request to start one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Instance name used in logs, `<executable>-<n>`.
    pub name: ProcessName,
    pub package: String,
    pub executable: String,
    pub node_name: String,
    pub output: OutputMode,
    /// Resolved runtime parameters, all string-typed.
    pub parameters: Vec<(String, String)>,
}

impl ProcessSpec {
    /// Middleware arguments appended after the executable path.
    pub fn ros_args(&self) -> Vec<String> {
        let mut args = vec![
            "--ros-args".to_string(),
            "-r".to_string(),
            format!("__node:={}", self.node_name),
        ];
        for (name, value) in &self.parameters {
            args.push("-p".to_string());
            args.push(format!("{name}:={value}"));
        }
        args
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Events flowing into the runtime from process supervisors and signals.
#[derive(Debug, Clone)]
pub enum LaunchEvent {
    ProcessExited {
        name: ProcessName,
        outcome: ProcessOutcome,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod context;
pub mod core;
pub mod runtime;

pub use context::{parse_launch_argument, parse_launch_arguments, LaunchContext};
pub use self::core::{plan, CoreStep, LaunchCommand, LaunchCore, LaunchPlan, LaunchSummary};
pub use runtime::Runtime;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ros_args_carry_node_name_and_parameters() {
        let spec = ProcessSpec {
            name: "tracker-1".into(),
            package: "waypoint_counter".into(),
            executable: "tracker".into(),
            node_name: "waypoint_counter".into(),
            output: OutputMode::Screen,
            parameters: vec![("target_wp".into(), "7".into())],
        };

        assert_eq!(
            spec.ros_args(),
            vec![
                "--ros-args",
                "-r",
                "__node:=waypoint_counter",
                "-p",
                "target_wp:=7"
            ]
        );
        assert_eq!(spec.parameter("target_wp"), Some("7"));
        assert_eq!(spec.parameter("other"), None);
    }
}
