// src/lib.rs

pub mod cli;
pub mod config;
pub mod description;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::description::{generate_launch_description, LaunchDescription};
use crate::engine::{
    parse_launch_arguments, plan, LaunchCommand, LaunchCore, LaunchEvent, LaunchPlan,
    LaunchSummary, Runtime,
};
use crate::exec::{ExecutableResolver, RealProcessBackend};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - description loading (built-in or TOML launch file)
/// - launch argument resolution and evaluation
/// - the process backend and runtime loop
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<LaunchSummary> {
    let description = load_description(args.file.as_deref())?;

    if args.show_args {
        print_arguments(&description);
        return Ok(LaunchSummary::default());
    }

    let overrides = parse_launch_arguments(&args.launch_args)?;
    let plan = plan(&description, &overrides)?;

    if args.print {
        print_plan(&plan);
        return Ok(LaunchSummary::default());
    }

    let resolver = if args.prefixes.is_empty() {
        ExecutableResolver::from_env()
    } else {
        ExecutableResolver::new(args.prefixes.clone())
    };
    if resolver.prefixes().is_empty() {
        warn!("no install prefixes configured; set AMENT_PREFIX_PATH or pass --prefix");
    }
    debug!(prefixes = ?resolver.prefixes(), "install prefixes");

    let (rt_tx, rt_rx) = mpsc::channel::<LaunchEvent>(64);
    let backend = RealProcessBackend::new(rt_tx.clone(), resolver);

    // Ctrl-C → graceful shutdown.
    let shutdown_flag = Arc::new(AtomicBool::new(false));
    {
        let tx = rt_tx.clone();
        let flag = Arc::clone(&shutdown_flag);
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            flag.store(true, Ordering::SeqCst);
            let _ = tx.send(LaunchEvent::ShutdownRequested).await;
        });
    }

    info!(
        configurations = ?plan.context.configurations(),
        "launch configurations resolved"
    );

    let core = LaunchCore::new(plan);
    let runtime = Runtime::new(core, rt_rx, backend).with_shutdown_flag(shutdown_flag);
    Ok(runtime.run().await?)
}

fn load_description(file: Option<&Path>) -> Result<LaunchDescription> {
    match file {
        Some(path) => {
            debug!(path = %path.display(), "loading launch file");
            Ok(load_and_validate(path)?)
        }
        None => Ok(generate_launch_description()),
    }
}

/// `--show-args` output.
fn print_arguments(description: &LaunchDescription) {
    let args: Vec<_> = description.declared_arguments().collect();
    if args.is_empty() {
        println!("No arguments.");
        return;
    }

    println!("Arguments (pass arguments as '<name>:=<value>'):");
    for arg in args {
        println!();
        println!("    '{}':", arg.name);
        if arg.description.is_empty() {
            println!("        no description given");
        } else {
            println!("        {}", arg.description);
        }
        match &arg.default_value {
            Some(default) => println!("        (default: '{default}')"),
            None => println!("        (required)"),
        }
    }
}

/// `--print` output: what the launch would do, without doing it.
fn print_plan(plan: &LaunchPlan) {
    println!("waypoint-launch plan");
    for (name, value) in plan.context.configurations() {
        println!("  {name} = {value:?}");
    }
    println!();

    for command in &plan.commands {
        match command {
            LaunchCommand::Log { message } => println!("log: {message}"),
            LaunchCommand::StartProcess(spec) => {
                println!("process {}:", spec.name);
                println!("    package: {}", spec.package);
                println!("    executable: {}", spec.executable);
                println!("    output: {}", spec.output);
                println!("    args: {}", spec.ros_args().join(" "));
            }
            LaunchCommand::ShutdownProcesses => {}
        }
    }

    debug!("print complete (no execution)");
}
