// src/config/validate.rs

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::model::{RawAction, RawArg, RawGuard, RawLaunchFile, RawLog, RawNode};
use crate::description::{
    Condition, DeclareArgument, LaunchAction, LaunchDescription, LogInfo, NodeAction,
    Substitutions,
};
use crate::errors::{LauncherError, Result};

impl TryFrom<RawLaunchFile> for LaunchDescription {
    type Error = LauncherError;

    fn try_from(raw: RawLaunchFile) -> std::result::Result<Self, Self::Error> {
        if raw.action.is_empty() {
            return Err(LauncherError::config(
                "launch file must contain at least one [[action]]",
            ));
        }

        let mut declared = BTreeSet::new();
        let mut actions = Vec::with_capacity(raw.action.len());

        for (index, action) in raw.action.into_iter().enumerate() {
            let action = match action {
                RawAction::Arg(arg) => {
                    if !declared.insert(arg.name.clone()) {
                        return Err(LauncherError::config(format!(
                            "action #{index}: launch argument '{}' is declared more than once",
                            arg.name
                        )));
                    }
                    LaunchAction::DeclareArgument(convert_arg(arg, index)?)
                }
                RawAction::Log(log) => LaunchAction::LogInfo(convert_log(log, index)?),
                RawAction::Node(node) => LaunchAction::Node(convert_node(node, index)?),
            };
            actions.push(action);
        }

        Ok(LaunchDescription::new(actions))
    }
}

fn convert_arg(arg: RawArg, index: usize) -> Result<DeclareArgument> {
    ensure_valid_name("argument", &arg.name, index)?;
    Ok(DeclareArgument {
        name: arg.name,
        default_value: arg.default,
        description: arg.description,
    })
}

fn convert_log(log: RawLog, index: usize) -> Result<LogInfo> {
    let condition = match (log.if_equals, log.unless_equals) {
        (Some(_), Some(_)) => {
            return Err(LauncherError::config(format!(
                "action #{index}: log accepts at most one of `if_equals` / `unless_equals`"
            )));
        }
        (Some(RawGuard { var, value }), None) => {
            Some(Condition::LaunchConfigurationEquals { name: var, value })
        }
        (None, Some(RawGuard { var, value })) => {
            Some(Condition::LaunchConfigurationNotEquals { name: var, value })
        }
        (None, None) => None,
    };

    Ok(LogInfo {
        condition,
        msg: Substitutions::parse(&log.msg)?,
    })
}

fn convert_node(node: RawNode, index: usize) -> Result<NodeAction> {
    if node.pkg.trim().is_empty() {
        return Err(LauncherError::config(format!(
            "action #{index}: node `pkg` must not be empty"
        )));
    }
    if node.exec.trim().is_empty() {
        return Err(LauncherError::config(format!(
            "action #{index}: node `exec` must not be empty"
        )));
    }

    let name = node.name.unwrap_or_else(|| node.exec.clone());
    ensure_valid_name("node", &name, index)?;

    let mut parameters = Vec::with_capacity(node.param.len());
    for (key, value) in node.param {
        ensure_valid_name("parameter", &key, index)?;
        let value = match value {
            toml::Value::String(s) => Substitutions::parse(&s)?,
            toml::Value::Integer(i) => Substitutions::text(i.to_string()),
            // Debug keeps the decimal point, so `1.0` stays a double.
            toml::Value::Float(f) => Substitutions::text(format!("{f:?}")),
            toml::Value::Boolean(b) => Substitutions::text(b.to_string()),
            other => {
                return Err(LauncherError::config(format!(
                    "action #{index}: parameter '{key}' has unsupported type {}",
                    other.type_str()
                )));
            }
        };
        parameters.push((key, value));
    }

    Ok(NodeAction {
        package: node.pkg,
        executable: node.exec,
        name,
        output: node.output,
        parameters,
    })
}

fn ensure_valid_name(kind: &str, name: &str, index: usize) -> Result<()> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid name regex")
    });

    if re.is_match(name) {
        Ok(())
    } else {
        Err(LauncherError::config(format!(
            "action #{index}: invalid {kind} name '{name}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<LaunchDescription> {
        let raw: RawLaunchFile = toml::from_str(toml_src)?;
        LaunchDescription::try_from(raw)
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(matches!(parse(""), Err(LauncherError::ConfigError(_))));
    }

    #[test]
    fn duplicate_argument_is_rejected() {
        let err = parse(
            r#"
[[action]]
type = "arg"
name = "target_wp"
default = "10"

[[action]]
type = "arg"
name = "target_wp"
default = "11"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LauncherError::ConfigError(ref m) if m.contains("more than once")));
    }

    #[test]
    fn both_guards_are_rejected() {
        let err = parse(
            r#"
[[action]]
type = "log"
msg = "hi"
if_equals = { var = "a", value = "1" }
unless_equals = { var = "a", value = "2" }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LauncherError::ConfigError(_)));
    }

    #[test]
    fn node_name_defaults_to_executable_and_numbers_pass_through() {
        let desc = parse(
            r#"
[[action]]
type = "node"
pkg = "waypoint_counter"
exec = "tracker"
param = { target_wp = 12 }
"#,
        )
        .unwrap();

        let LaunchAction::Node(node) = &desc.actions()[0] else {
            panic!("expected node");
        };
        assert_eq!(node.name, "tracker");
        assert_eq!(
            node.parameters,
            vec![("target_wp".to_string(), Substitutions::text("12"))]
        );
    }

    #[test]
    fn whole_float_parameters_keep_their_decimal_point() {
        let desc = parse(
            r#"
[[action]]
type = "node"
pkg = "waypoint_counter"
exec = "tracker"
param = { speed = 1.0, ratio = 0.25 }
"#,
        )
        .unwrap();

        let LaunchAction::Node(node) = &desc.actions()[0] else {
            panic!("expected node");
        };
        assert_eq!(
            node.parameters,
            vec![
                ("ratio".to_string(), Substitutions::text("0.25")),
                ("speed".to_string(), Substitutions::text("1.0")),
            ]
        );
    }

    #[test]
    fn invalid_names_are_rejected() {
        let err = parse(
            r#"
[[action]]
type = "node"
pkg = "waypoint_counter"
exec = "tracker"
name = "way-point"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LauncherError::ConfigError(ref m) if m.contains("way-point")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            parse(
                r#"
[[action]]
type = "arg"
name = "target_wp"
defualt = "10"
"#
            ),
            Err(LauncherError::TomlError(_))
        ));
    }

    #[test]
    fn unknown_action_type_is_rejected() {
        assert!(parse("[[action]]\ntype = \"group\"\n").is_err());
    }
}
