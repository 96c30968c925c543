// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] describes a command to run and the status it finished with.
//! - [`process`] runs one command with `tokio::process::Command`, forwarding
//!   its stdout line by line while it runs.
//! - [`backend`] provides the `CommandRunner` trait and the concrete
//!   `ProcessRunner` the orchestrator uses in production, and which tests can
//!   replace with a fake implementation.

pub mod backend;
pub mod command;
pub mod process;

pub use backend::{CommandRunner, ProcessRunner};
pub use command::{CommandSpec, CommandStatus};
pub use process::run_streaming;
