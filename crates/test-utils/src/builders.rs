#![allow(dead_code)]

use waypoint_launch::description::{
    Condition, DeclareArgument, LaunchAction, LaunchDescription, LogInfo, NodeAction,
    Substitutions,
};
use waypoint_launch::types::OutputMode;

/// Builder for `LaunchDescription` to simplify test setup.
#[derive(Default)]
pub struct DescriptionBuilder {
    actions: Vec<LaunchAction>,
}

impl DescriptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, name: &str, default: &str) -> Self {
        self.actions
            .push(LaunchAction::DeclareArgument(DeclareArgument::new(name, default, "")));
        self
    }

    pub fn required_arg(mut self, name: &str) -> Self {
        self.actions.push(LaunchAction::DeclareArgument(DeclareArgument {
            name: name.to_string(),
            default_value: None,
            description: String::new(),
        }));
        self
    }

    pub fn log(mut self, msg: &str) -> Self {
        self.actions.push(LaunchAction::LogInfo(LogInfo {
            condition: None,
            msg: Substitutions::text(msg),
        }));
        self
    }

    pub fn log_if_equals(mut self, var: &str, value: &str, msg: &str) -> Self {
        self.actions.push(LaunchAction::LogInfo(LogInfo {
            condition: Some(Condition::LaunchConfigurationEquals {
                name: var.to_string(),
                value: value.to_string(),
            }),
            msg: Substitutions::text(msg),
        }));
        self
    }

    pub fn node(mut self, node: NodeAction) -> Self {
        self.actions.push(LaunchAction::Node(node));
        self
    }

    pub fn build(self) -> LaunchDescription {
        LaunchDescription::new(self.actions)
    }
}

/// Builder for `NodeAction`.
pub struct NodeBuilder {
    node: NodeAction,
}

impl NodeBuilder {
    pub fn new(package: &str, executable: &str) -> Self {
        Self {
            node: NodeAction {
                package: package.to_string(),
                executable: executable.to_string(),
                name: executable.to_string(),
                output: OutputMode::Screen,
                parameters: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.node.name = name.to_string();
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.node.output = output;
        self
    }

    /// Parameter forwarded from the launch configuration of the same name.
    pub fn forward(mut self, name: &str) -> Self {
        self.node
            .parameters
            .push((name.to_string(), Substitutions::launch_configuration(name)));
        self
    }

    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.node
            .parameters
            .push((name.to_string(), Substitutions::text(value)));
        self
    }

    pub fn build(self) -> NodeAction {
        self.node
    }
}
