// src/orchestrator.rs

//! Release build orchestration.
//!
//! [`Orchestrator::run_release_build`] walks the target matrix strictly in
//! order: every output directory is created up front, then each target is
//! built and its artifact copied into place before the next target starts.
//! The first failing step ends the run.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::ReleaseConfig;
use crate::errors::{ReleaseError, Result};
use crate::exec::{CommandRunner, CommandSpec};
use crate::fs::FileSystem;

const OPEN_DELIMITER: &str =
    ">>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>";
const CLOSE_DELIMITER: &str =
    "<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<";

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Root output location (the configured bin root).
    pub output_root: PathBuf,
    /// `<out_dir>/<artifact>` for every target, in matrix order.
    pub artifacts: Vec<PathBuf>,
}

/// One step of a release run, as reported by [`Orchestrator::plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedStep {
    EnsureDir(PathBuf),
    Build { platform: String, command: CommandSpec },
    Copy { platform: String, command: CommandSpec },
}

impl fmt::Display for PlannedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannedStep::EnsureDir(dir) => write!(f, "mkdir -p {}", dir.display()),
            PlannedStep::Build { command, .. } | PlannedStep::Copy { command, .. } => {
                write!(f, "{command}")
            }
        }
    }
}

pub struct Orchestrator<R, F> {
    config: ReleaseConfig,
    runner: R,
    fs: F,
    progress: Box<dyn Write + Send>,
}

impl<R: CommandRunner, F: FileSystem> Orchestrator<R, F> {
    /// Orchestrator that reports progress on stdout.
    pub fn new(config: ReleaseConfig, runner: R, fs: F) -> Self {
        Self {
            config,
            runner,
            fs,
            progress: Box::new(io::stdout()),
        }
    }

    /// Send progress lines somewhere other than stdout.
    pub fn with_progress(mut self, progress: impl Write + Send + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn config(&self) -> &ReleaseConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Every step `run_release_build` would perform, without running any.
    pub fn plan(&self) -> Vec<PlannedStep> {
        let cfg = &self.config;
        let mut steps: Vec<PlannedStep> = cfg
            .matrix
            .output_dirs()
            .into_iter()
            .map(|dir| PlannedStep::EnsureDir(dir.to_path_buf()))
            .collect();

        for entry in &cfg.matrix {
            let platform = entry.platform_id();
            steps.push(PlannedStep::Build {
                command: CommandSpec::release_build(&cfg.tool, &platform, &cfg.project_root),
                platform: platform.clone(),
            });
            steps.push(PlannedStep::Copy {
                command: CommandSpec::copy_into(&cfg.artifact_path(entry), &entry.out_dir),
                platform,
            });
        }
        steps
    }

    /// Build every target in the matrix and collect the artifacts.
    ///
    /// Output directories are all created before the first build. A
    /// directory, build or copy failure stops the run immediately; artifacts
    /// already copied for earlier targets are left in place.
    pub async fn run_release_build(&mut self) -> Result<ReleaseSummary> {
        let cfg = &self.config;
        let out = &mut self.progress;

        writeln!(out, "** Building release artifacts for: {} **", cfg.artifact)?;
        info!(
            artifact = %cfg.artifact,
            tool = %cfg.tool,
            targets = cfg.matrix.len(),
            "starting release build"
        );

        for (dir, platforms) in cfg.matrix.shared_output_dirs() {
            warn!(
                dir = %dir.display(),
                ?platforms,
                "output directory shared by several targets; later targets overwrite the artifact"
            );
        }

        for dir in cfg.matrix.output_dirs() {
            debug!(path = %dir.display(), "ensuring output directory");
            self.fs
                .ensure_dir(dir)
                .map_err(|source| ReleaseError::DirectoryError {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        writeln!(out)?;
        writeln!(out, "** START BUILD OUTPUT **")?;
        writeln!(out, "{OPEN_DELIMITER}")?;
        out.flush()?;

        let mut artifacts = Vec::with_capacity(cfg.matrix.len());
        for entry in &cfg.matrix {
            let platform = entry.platform_id();
            writeln!(out, "** Building release artifact for {platform} **")?;
            out.flush()?;

            let build = CommandSpec::release_build(&cfg.tool, &platform, &cfg.project_root);
            let status = self.runner.run(build.clone()).await?;
            status
                .check(&build)
                .map_err(|failure| ReleaseError::BuildFailure {
                    platform: platform.clone(),
                    failure,
                })?;

            let artifact = cfg.artifact_path(entry);
            let copy = CommandSpec::copy_into(&artifact, &entry.out_dir);
            let status = self.runner.run(copy.clone()).await?;
            status
                .check(&copy)
                .map_err(|failure| ReleaseError::CopyFailure {
                    platform: platform.clone(),
                    failure,
                })?;

            let dest = cfg.destination(entry);
            info!(platform = %platform, path = %dest.display(), "artifact collected");
            artifacts.push(dest);
        }

        writeln!(out, "{CLOSE_DELIMITER}")?;
        writeln!(out, "** END BUILD OUTPUT **")?;
        writeln!(out)?;
        writeln!(out, "** Release artifacts copied to {}", cfg.bin_root.display())?;
        out.flush()?;

        Ok(ReleaseSummary {
            output_root: cfg.bin_root.clone(),
            artifacts,
        })
    }
}
