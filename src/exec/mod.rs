// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually starting the processes requested
//! by `Node` actions, using `tokio::process::Command`, and reporting back to
//! the launch runtime via `LaunchEvent`s.
//!
//! - [`resolve`] locates `<prefix>/lib/<package>/<executable>`.
//! - [`process`] spawns and supervises a single child.
//! - [`output`] forwards captured child output into the log.
//! - [`backend`] provides the `ProcessBackend` trait and the
//!   `RealProcessBackend` used in production, which tests can replace with a
//!   fake implementation.

pub mod backend;
pub mod output;
pub mod process;
pub mod resolve;

pub use backend::{ProcessBackend, RealProcessBackend};
pub use resolve::ExecutableResolver;
