// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod matrix;
pub mod orchestrator;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{load_release_config, Overrides, ReleaseConfig};
use crate::exec::ProcessRunner;
use crate::fs::{FileSystem, RealFileSystem};
use crate::matrix::TargetEntry;
use crate::orchestrator::{Orchestrator, PlannedStep};

pub use crate::orchestrator::ReleaseSummary;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overrides)
/// - the real process runner and filesystem
/// - the orchestrator, or a dry-run listing of its plan
pub async fn run(args: CliArgs) -> Result<()> {
    let overrides = Overrides {
        artifact: args.artifact.clone(),
        tool: args.tool.clone(),
        project_root: args.project_root.clone(),
    };
    let cfg = load_release_config(args.config_path(), args.uses_default_config(), overrides)?;

    let mut orchestrator = Orchestrator::new(cfg, ProcessRunner::new(), RealFileSystem);

    if args.dry_run {
        print_dry_run(orchestrator.config(), &orchestrator.plan(), &RealFileSystem);
        return Ok(());
    }

    let summary = orchestrator.run_release_build().await?;
    debug!(artifacts = ?summary.artifacts, "release build complete");
    Ok(())
}

/// Simple dry-run output: print the resolved config and every planned step.
fn print_dry_run(cfg: &ReleaseConfig, steps: &[PlannedStep], fs: &dyn FileSystem) {
    println!("relbuild dry-run");
    println!("  artifact     = {}", cfg.artifact);
    println!("  tool         = {}", cfg.tool);
    println!("  project_root = {}", cfg.project_root.display());
    println!("  bin_root     = {}", cfg.bin_root.display());
    println!();

    println!("targets ({}):", cfg.matrix.len());
    for entry in &cfg.matrix {
        println!("  - {}", dry_run_target_line(cfg, entry, fs));
    }
    println!();

    println!("steps ({}):", steps.len());
    for step in steps {
        println!("  {step}");
    }

    debug!("dry-run complete (no execution)");
}

/// `<triple> -> <out_dir>`, noting what already exists on disk.
fn dry_run_target_line(cfg: &ReleaseConfig, entry: &TargetEntry, fs: &dyn FileSystem) -> String {
    let mut line = format!("{} -> {}", entry.platform_id(), entry.out_dir.display());
    if fs.is_file(&cfg.destination(entry)) {
        line.push_str(" (artifact present, will be overwritten)");
    } else if fs.is_dir(&entry.out_dir) {
        line.push_str(" (dir exists)");
    }
    line
}
