// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! The orchestrator talks to a `CommandRunner` instead of spawning processes
//! itself. `ProcessRunner` is the production implementation; tests provide
//! their own runner that records commands and simulates the build tool.

use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;

use crate::errors::Result;
use crate::exec::command::{CommandSpec, CommandStatus};
use crate::exec::process::run_streaming;

/// Trait abstracting how external commands are executed.
pub trait CommandRunner: Send {
    /// Run `spec` to completion and report its exit status.
    ///
    /// Implementations forward the command's output to the operator as it is
    /// produced. An `Err` means the command could not be run at all; a
    /// non-zero exit is an `Ok` status for the caller to judge.
    fn run(
        &mut self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandStatus>> + Send + '_>>;
}

/// Real runner used in production: spawns OS processes and streams their
/// stdout into `out` (process stdout by default).
#[derive(Debug)]
pub struct ProcessRunner<W = io::Stdout> {
    out: W,
}

impl ProcessRunner<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for ProcessRunner<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> ProcessRunner<W> {
    /// Runner that forwards child output into `out` instead of stdout.
    pub fn with_output(out: W) -> Self {
        Self { out }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<W: Write + Send> CommandRunner for ProcessRunner<W> {
    fn run(
        &mut self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandStatus>> + Send + '_>> {
        Box::pin(async move {
            let status = run_streaming(&spec, &mut self.out).await?;
            Ok(status)
        })
    }
}
