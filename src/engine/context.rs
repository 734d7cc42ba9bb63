// src/engine/context.rs

//! Launch configurations: the resolved `name -> value` map that actions are
//! evaluated against.

use std::collections::{BTreeMap, BTreeSet};

use crate::description::DeclareArgument;
use crate::errors::{LauncherError, Result};

/// Resolved launch configurations for a single launch invocation.
///
/// Seeded from the invoking command's overrides, then completed by argument
/// declarations in action order. Once evaluation is over, nothing mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchContext {
    configurations: BTreeMap<String, String>,
    overridden: BTreeSet<String>,
    declared: BTreeSet<String>,
}

impl LaunchContext {
    /// Build a context from `name:=value` overrides. Later duplicates win.
    pub fn from_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut ctx = Self::default();
        for (name, value) in overrides {
            let name = name.into();
            ctx.overridden.insert(name.clone());
            ctx.configurations.insert(name, value.into());
        }
        ctx
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.configurations.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.configurations.insert(name.into(), value.into());
    }

    pub fn configurations(&self) -> &BTreeMap<String, String> {
        &self.configurations
    }

    /// Apply a `DeclareArgument` action.
    ///
    /// The default only fills in a value that the invoking command did not
    /// provide. Declaring a name twice, or declaring a required argument
    /// that was not provided, is a configuration error.
    pub fn declare(&mut self, arg: &DeclareArgument) -> Result<()> {
        if !self.declared.insert(arg.name.clone()) {
            return Err(LauncherError::config(format!(
                "launch argument '{}' is declared more than once",
                arg.name
            )));
        }

        if self.configurations.contains_key(&arg.name) {
            return Ok(());
        }

        match &arg.default_value {
            Some(default) => {
                self.configurations.insert(arg.name.clone(), default.clone());
                Ok(())
            }
            None => Err(LauncherError::config(format!(
                "required launch argument '{}' ({}) not provided",
                arg.name, arg.description
            ))),
        }
    }

    /// Overrides that no `DeclareArgument` action declared.
    pub fn undeclared_overrides(&self) -> Vec<&str> {
        self.overridden
            .difference(&self.declared)
            .map(String::as_str)
            .collect()
    }
}

/// Parse one `name:=value` token from the command line.
pub fn parse_launch_argument(token: &str) -> Result<(String, String)> {
    let malformed = || {
        LauncherError::config(format!(
            "malformed launch argument '{token}', expected format '<name>:=<value>'"
        ))
    };

    let (name, value) = token.split_once(":=").ok_or_else(malformed)?;
    let name = name.trim();
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(malformed());
    }

    Ok((name.to_string(), value.to_string()))
}

pub fn parse_launch_arguments<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<(String, String)>> {
    tokens
        .iter()
        .map(|t| parse_launch_argument(t.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_wp() -> DeclareArgument {
        DeclareArgument::new("target_wp", "10", "Target waypoint number")
    }

    #[test]
    fn default_applies_without_override() {
        let mut ctx = LaunchContext::default();
        ctx.declare(&target_wp()).unwrap();
        assert_eq!(ctx.get("target_wp"), Some("10"));
    }

    #[test]
    fn override_wins_over_default() {
        let mut ctx = LaunchContext::from_overrides([("target_wp", "7")]);
        ctx.declare(&target_wp()).unwrap();
        assert_eq!(ctx.get("target_wp"), Some("7"));
    }

    #[test]
    fn later_override_duplicates_win() {
        let ctx = LaunchContext::from_overrides([("target_wp", "7"), ("target_wp", "3")]);
        assert_eq!(ctx.get("target_wp"), Some("3"));
    }

    #[test]
    fn declaring_twice_is_a_config_error() {
        let mut ctx = LaunchContext::default();
        ctx.declare(&target_wp()).unwrap();
        let err = ctx.declare(&target_wp()).unwrap_err();
        assert!(matches!(err, LauncherError::ConfigError(ref m) if m.contains("more than once")));
    }

    #[test]
    fn required_argument_must_be_provided() {
        let required = DeclareArgument {
            name: "mission".into(),
            default_value: None,
            description: "Mission file".into(),
        };

        let mut ctx = LaunchContext::default();
        assert!(ctx.declare(&required).is_err());

        let mut ctx = LaunchContext::from_overrides([("mission", "survey.plan")]);
        ctx.declare(&required).unwrap();
        assert_eq!(ctx.get("mission"), Some("survey.plan"));
    }

    #[test]
    fn undeclared_overrides_are_reported() {
        let mut ctx = LaunchContext::from_overrides([("target_wp", "7"), ("speed", "3")]);
        ctx.declare(&target_wp()).unwrap();
        assert_eq!(ctx.undeclared_overrides(), vec!["speed"]);
    }

    #[test]
    fn parse_launch_argument_splits_on_first_separator() {
        assert_eq!(
            parse_launch_argument("target_wp:=7").unwrap(),
            ("target_wp".to_string(), "7".to_string())
        );
        assert_eq!(
            parse_launch_argument("expr:=a:=b").unwrap(),
            ("expr".to_string(), "a:=b".to_string())
        );
        assert_eq!(
            parse_launch_argument("empty:=").unwrap(),
            ("empty".to_string(), String::new())
        );
    }

    #[test]
    fn parse_launch_argument_rejects_malformed_tokens() {
        for bad in ["target_wp=7", ":=7", "target wp:=7", "target_wp"] {
            assert!(parse_launch_argument(bad).is_err(), "{bad} should be rejected");
        }
    }
}
