// src/description/mod.rs

//! Declarative launch descriptions.
//!
//! A [`LaunchDescription`] is an ordered list of [`LaunchAction`]s. It is pure
//! data: nothing here resolves arguments, spawns processes or logs. The
//! launch engine (`crate::engine`) interprets the list against a
//! [`LaunchContext`](crate::engine::LaunchContext).
//!
//! - [`waypoint_counter`] holds the built-in description for the waypoint
//!   counter tracker node.

pub mod waypoint_counter;

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::engine::LaunchContext;
use crate::errors::{LauncherError, Result};
use crate::types::OutputMode;

pub use waypoint_counter::generate_launch_description;

/// Ordered list of actions handed to the launch engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchDescription {
    actions: Vec<LaunchAction>,
}

impl LaunchDescription {
    pub fn new(actions: Vec<LaunchAction>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[LaunchAction] {
        &self.actions
    }

    /// Declared launch arguments, in declaration order.
    pub fn declared_arguments(&self) -> impl Iterator<Item = &DeclareArgument> {
        self.actions.iter().filter_map(|action| match action {
            LaunchAction::DeclareArgument(arg) => Some(arg),
            _ => None,
        })
    }
}

/// A single declarative action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchAction {
    DeclareArgument(DeclareArgument),
    LogInfo(LogInfo),
    Node(NodeAction),
}

/// Declares a launch argument that the invoking command may override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareArgument {
    pub name: String,
    /// `None` makes the argument required.
    pub default_value: Option<String>,
    pub description: String,
}

impl DeclareArgument {
    pub fn new(
        name: impl Into<String>,
        default_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default_value: Some(default_value.into()),
            description: description.into(),
        }
    }
}

/// Emits an informational message, optionally guarded by a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogInfo {
    pub condition: Option<Condition>,
    pub msg: Substitutions,
}

/// Requests one process started from `package`/`executable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAction {
    pub package: String,
    pub executable: String,
    /// Logical node name passed to the process.
    pub name: String,
    pub output: OutputMode,
    /// Runtime parameters, in the order they are passed to the process.
    pub parameters: Vec<(String, Substitutions)>,
}

/// String equality guard on a launch configuration.
///
/// A configuration that is not set compares unequal to every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    LaunchConfigurationEquals { name: String, value: String },
    LaunchConfigurationNotEquals { name: String, value: String },
}

impl Condition {
    pub fn evaluate(&self, context: &LaunchContext) -> bool {
        match self {
            Condition::LaunchConfigurationEquals { name, value } => {
                context.get(name) == Some(value.as_str())
            }
            Condition::LaunchConfigurationNotEquals { name, value } => {
                context.get(name) != Some(value.as_str())
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::LaunchConfigurationEquals { name, value } => {
                write!(f, "{name} == {value:?}")
            }
            Condition::LaunchConfigurationNotEquals { name, value } => {
                write!(f, "{name} != {value:?}")
            }
        }
    }
}

/// One piece of a string whose value is only known at launch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    Text(String),
    LaunchConfiguration(String),
}

/// Ordered substitutions, concatenated when performed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitutions(Vec<Substitution>);

impl Substitutions {
    pub fn new(parts: Vec<Substitution>) -> Self {
        Self(parts)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self(vec![Substitution::Text(s.into())])
    }

    pub fn launch_configuration(name: impl Into<String>) -> Self {
        Self(vec![Substitution::LaunchConfiguration(name.into())])
    }

    pub fn parts(&self) -> &[Substitution] {
        &self.0
    }

    /// Parse a launch-file string, expanding `$(var <name>)` references.
    ///
    /// Any other `$(...)` form is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = Vec::new();
        let mut last = 0;

        for caps in substitution_regex().captures_iter(input) {
            let Some(whole) = caps.get(0) else { continue };
            push_text(&mut parts, &input[last..whole.start()], input)?;

            let inner: Vec<&str> = caps[1].split_whitespace().collect();
            match inner.as_slice() {
                ["var", name] => parts.push(Substitution::LaunchConfiguration(name.to_string())),
                _ => {
                    return Err(LauncherError::config(format!(
                        "unsupported substitution '{}' in {:?} \
                         (only `$(var <name>)` is supported)",
                        whole.as_str(),
                        input
                    )));
                }
            }
            last = whole.end();
        }

        push_text(&mut parts, &input[last..], input)?;

        Ok(Self(parts))
    }

    /// Resolve every part against `context` and concatenate the result.
    pub fn perform(&self, context: &LaunchContext) -> Result<String> {
        let mut out = String::new();
        for part in &self.0 {
            match part {
                Substitution::Text(text) => out.push_str(text),
                Substitution::LaunchConfiguration(name) => {
                    let value = context.get(name).ok_or_else(|| {
                        LauncherError::config(format!(
                            "launch configuration '{name}' does not exist"
                        ))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Substitutions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.0 {
            match part {
                Substitution::Text(text) => f.write_str(text)?,
                Substitution::LaunchConfiguration(name) => write!(f, "$(var {name})")?,
            }
        }
        Ok(())
    }
}

/// Literal text between substitutions must not open another one: a `$(` left
/// over here is either unterminated or nested.
fn push_text(parts: &mut Vec<Substitution>, text: &str, input: &str) -> Result<()> {
    if text.contains("$(") {
        return Err(LauncherError::config(format!(
            "unterminated or nested substitution in {input:?}"
        )));
    }
    if !text.is_empty() {
        parts.push(Substitution::Text(text.to_string()));
    }
    Ok(())
}

fn substitution_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\(([^()]*)\)").expect("valid substitution regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with(pairs: &[(&str, &str)]) -> LaunchContext {
        let mut ctx = LaunchContext::default();
        for (k, v) in pairs {
            ctx.set(*k, *v);
        }
        ctx
    }

    #[test]
    fn parse_plain_text_is_single_text_part() {
        let subs = Substitutions::parse("hello").unwrap();
        assert_eq!(subs.parts(), &[Substitution::Text("hello".into())]);
    }

    #[test]
    fn parse_mixed_text_and_var() {
        let subs = Substitutions::parse("wp=$(var target_wp)!").unwrap();
        assert_eq!(
            subs.parts(),
            &[
                Substitution::Text("wp=".into()),
                Substitution::LaunchConfiguration("target_wp".into()),
                Substitution::Text("!".into()),
            ]
        );
        assert_eq!(subs.to_string(), "wp=$(var target_wp)!");
    }

    #[test]
    fn parse_rejects_unknown_substitution_kinds() {
        assert!(Substitutions::parse("$(env HOME)").is_err());
        assert!(Substitutions::parse("$(var)").is_err());
        assert!(Substitutions::parse("$(var target_wp").is_err());
    }

    #[test]
    fn parse_rejects_nested_or_unterminated_before_a_valid_var() {
        for input in ["$(var $(var x))", "$(var a $(var x)", "pre $( $(var x) post"] {
            let err = Substitutions::parse(input).unwrap_err();
            assert!(
                matches!(err, LauncherError::ConfigError(ref m) if m.contains("nested")),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn perform_concatenates_resolved_values() {
        let ctx = context_with(&[("target_wp", "7")]);
        let subs = Substitutions::parse("target $(var target_wp)").unwrap();
        assert_eq!(subs.perform(&ctx).unwrap(), "target 7");
    }

    #[test]
    fn perform_fails_on_missing_configuration() {
        let ctx = LaunchContext::default();
        let err = Substitutions::launch_configuration("nope")
            .perform(&ctx)
            .unwrap_err();
        assert!(matches!(err, LauncherError::ConfigError(ref m) if m.contains("'nope'")));
    }

    #[test]
    fn equality_conditions_treat_unset_as_unequal() {
        let ctx = context_with(&[("target_wp", "10")]);
        let eq = |v: &str| Condition::LaunchConfigurationEquals {
            name: "target_wp".into(),
            value: v.into(),
        };
        assert!(eq("10").evaluate(&ctx));
        assert!(!eq("7").evaluate(&ctx));

        let unset = Condition::LaunchConfigurationEquals {
            name: "missing".into(),
            value: "10".into(),
        };
        assert!(!unset.evaluate(&ctx));

        let ne = Condition::LaunchConfigurationNotEquals {
            name: "missing".into(),
            value: "10".into(),
        };
        assert!(ne.evaluate(&ctx));
    }
}
