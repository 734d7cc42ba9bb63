// src/description/waypoint_counter.rs

//! Built-in launch description for the waypoint counter.
//!
//! Declares `target_wp`, logs a message when it is left at `"10"`, and starts
//! the `tracker` executable from the `waypoint_counter` package with
//! `target_wp` forwarded as a runtime parameter.

use crate::description::{
    Condition, DeclareArgument, LaunchAction, LaunchDescription, LogInfo, NodeAction,
    Substitutions,
};
use crate::types::OutputMode;

pub const TARGET_WP_ARG: &str = "target_wp";
pub const TARGET_WP_DEFAULT: &str = "10";
pub const PACKAGE: &str = "waypoint_counter";
pub const EXECUTABLE: &str = "tracker";
pub const NODE_NAME: &str = "waypoint_counter";

// The message text is fixed; it does not follow the argument's default.
pub const LAUNCH_MESSAGE: &str = "Launching waypoint counter with target waypoint 10";

pub fn generate_launch_description() -> LaunchDescription {
    LaunchDescription::new(vec![
        LaunchAction::DeclareArgument(DeclareArgument::new(
            TARGET_WP_ARG,
            TARGET_WP_DEFAULT,
            "Target waypoint number",
        )),
        LaunchAction::LogInfo(LogInfo {
            condition: Some(Condition::LaunchConfigurationEquals {
                name: TARGET_WP_ARG.to_string(),
                value: "10".to_string(),
            }),
            msg: Substitutions::text(LAUNCH_MESSAGE),
        }),
        LaunchAction::Node(NodeAction {
            package: PACKAGE.to_string(),
            executable: EXECUTABLE.to_string(),
            name: NODE_NAME.to_string(),
            output: OutputMode::Screen,
            parameters: vec![(
                TARGET_WP_ARG.to_string(),
                Substitutions::launch_configuration(TARGET_WP_ARG),
            )],
        }),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_has_three_actions_in_order() {
        let desc = generate_launch_description();
        let actions = desc.actions();
        assert_eq!(actions.len(), 3);
        assert!(matches!(actions[0], LaunchAction::DeclareArgument(_)));
        assert!(matches!(actions[1], LaunchAction::LogInfo(_)));
        assert!(matches!(actions[2], LaunchAction::Node(_)));
    }

    #[test]
    fn target_wp_is_declared_once_with_default_10() {
        let desc = generate_launch_description();
        let args: Vec<_> = desc.declared_arguments().collect();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name, "target_wp");
        assert_eq!(args[0].default_value.as_deref(), Some("10"));
        assert_eq!(args[0].description, "Target waypoint number");
    }

    #[test]
    fn node_forwards_target_wp_to_tracker() {
        let desc = generate_launch_description();
        let LaunchAction::Node(node) = &desc.actions()[2] else {
            panic!("third action should be a node");
        };
        assert_eq!(node.package, "waypoint_counter");
        assert_eq!(node.executable, "tracker");
        assert_eq!(node.name, "waypoint_counter");
        assert_eq!(node.output, OutputMode::Screen);
        assert_eq!(
            node.parameters,
            vec![(
                "target_wp".to_string(),
                Substitutions::launch_configuration("target_wp")
            )]
        );
    }
}
