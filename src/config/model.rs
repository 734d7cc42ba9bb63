// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::OutputMode;

/// Launch file as read from TOML, before validation.
///
/// ```toml
/// [[action]]
/// type = "arg"
/// name = "target_wp"
/// default = "10"
/// description = "Target waypoint number"
///
/// [[action]]
/// type = "log"
/// msg = "Launching waypoint counter with target waypoint 10"
/// if_equals = { var = "target_wp", value = "10" }
///
/// [[action]]
/// type = "node"
/// pkg = "waypoint_counter"
/// exec = "tracker"
/// name = "waypoint_counter"
/// output = "screen"
/// param = { target_wp = "$(var target_wp)" }
/// ```
///
/// Actions are evaluated in file order.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawLaunchFile {
    #[serde(default)]
    pub action: Vec<RawAction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawAction {
    Arg(RawArg),
    Log(RawLog),
    Node(RawNode),
}

/// `type = "arg"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawArg {
    pub name: String,

    /// No default makes the argument required.
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub description: String,
}

/// `type = "log"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLog {
    /// Message text; may contain `$(var <name>)`.
    pub msg: String,

    #[serde(default)]
    pub if_equals: Option<RawGuard>,

    #[serde(default)]
    pub unless_equals: Option<RawGuard>,
}

/// Equality guard on a launch configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawGuard {
    pub var: String,
    pub value: String,
}

/// `type = "node"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawNode {
    pub pkg: String,
    pub exec: String,

    /// Node name; defaults to the executable name.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub output: OutputMode,

    /// Runtime parameters. Strings may contain `$(var <name>)`; numbers and
    /// booleans are passed through as their string form.
    #[serde(default)]
    pub param: BTreeMap<String, toml::Value>,
}
