// src/config/mod.rs

//! TOML launch files.
//!
//! Responsibilities:
//! - Define the TOML-backed raw model (`model.rs`).
//! - Load a launch file from disk (`loader.rs`).
//! - Validate it into a `LaunchDescription` (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{RawAction, RawArg, RawGuard, RawLaunchFile, RawLog, RawNode};
