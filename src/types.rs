// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Where a launched process writes its stdout/stderr.
///
/// - `Screen`: the child inherits the launcher's terminal (default).
/// - `Log`: the child's output is captured line by line and forwarded into
///   the launcher's log, tagged with the process name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Screen,
    Log,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "screen" => Ok(OutputMode::Screen),
            "log" => Ok(OutputMode::Log),
            other => Err(format!(
                "invalid output mode: {other} (expected \"screen\" or \"log\")"
            )),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Screen => f.write_str("screen"),
            OutputMode::Log => f.write_str("log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_parses_case_insensitively() {
        assert_eq!("Screen".parse::<OutputMode>(), Ok(OutputMode::Screen));
        assert_eq!(" log ".parse::<OutputMode>(), Ok(OutputMode::Log));
        assert!("both".parse::<OutputMode>().is_err());
    }

    #[test]
    fn output_mode_defaults_to_screen() {
        assert_eq!(OutputMode::default(), OutputMode::Screen);
    }
}
