// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Default config file name, looked up in the current working directory.
pub const DEFAULT_CONFIG: &str = "Release.toml";

/// Command-line arguments for `relbuild`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "relbuild",
    version,
    about = "Build release binaries for every target in the matrix and collect them under bin/.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the release config file (TOML).
    ///
    /// Default: `Release.toml` in the current directory. If that default file
    /// does not exist, the built-in target matrix is used; a file given here
    /// explicitly must exist.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the binary produced by the build tool (overrides the config).
    #[arg(long, value_name = "NAME")]
    pub artifact: Option<String>,

    /// Cross-compilation tool to invoke (overrides the config).
    #[arg(long, value_name = "PROG")]
    pub tool: Option<String>,

    /// Project root containing `target/` (overrides the config).
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RELBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the planned steps without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// True when no `--config` was passed.
    pub fn uses_default_config(&self) -> bool {
        self.config.is_none()
    }

    /// The config file to read: `--config`, or [`DEFAULT_CONFIG`].
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
    }
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
