// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `waypoint-launch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "waypoint-launch",
    version,
    about = "Launch the waypoint counter tracker node (or any TOML launch file).",
    long_about = None
)]
pub struct CliArgs {
    /// Launch arguments in the form `<name>:=<value>`, e.g. `target_wp:=7`.
    #[arg(value_name = "NAME:=VALUE")]
    pub launch_args: Vec<String>,

    /// TOML launch file to run instead of the built-in waypoint counter
    /// description.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Install prefix to search for `lib/<package>/<executable>`.
    ///
    /// May be repeated. Defaults to the entries of `AMENT_PREFIX_PATH`.
    #[arg(long = "prefix", value_name = "PATH")]
    pub prefixes: Vec<PathBuf>,

    /// Show the declared launch arguments and exit.
    #[arg(short = 's', long)]
    pub show_args: bool,

    /// Evaluate the description and print what would run, without starting
    /// any process.
    #[arg(short = 'p', long = "print")]
    pub print: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WAYPOINT_LAUNCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_args_and_flags_parse() {
        let args = CliArgs::try_parse_from([
            "waypoint-launch",
            "target_wp:=7",
            "--prefix",
            "/opt/ws/install/waypoint_counter",
            "-p",
        ])
        .unwrap();

        assert_eq!(args.launch_args, vec!["target_wp:=7"]);
        assert_eq!(
            args.prefixes,
            vec![PathBuf::from("/opt/ws/install/waypoint_counter")]
        );
        assert!(args.print);
        assert!(!args.show_args);
        assert!(args.file.is_none());
    }

    #[test]
    fn no_arguments_uses_defaults() {
        let args = CliArgs::try_parse_from(["waypoint-launch"]).unwrap();
        assert!(args.launch_args.is_empty());
        assert!(args.prefixes.is_empty());
        assert!(args.log_level.is_none());
    }
}
