// src/exec/process.rs

//! Single process runner.

use std::io::Write;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::exec::command::{CommandSpec, CommandStatus};

/// Run `spec` to completion, copying its stdout to `out` one line at a time
/// as the child produces it.
///
/// Stderr is inherited, so the child's diagnostics reach the operator
/// directly. Lines are forwarded as raw bytes; output does not need to be
/// UTF-8. Only spawn and I/O problems are errors here; a non-zero exit is
/// reported through the returned [`CommandStatus`].
pub async fn run_streaming<W: Write + ?Sized>(spec: &CommandSpec, out: &mut W) -> Result<CommandStatus> {
    info!(cmd = %spec, "starting command");

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    if let Some(dir) = &spec.cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning `{spec}`"))?;

    if let Some(stdout) = child.stdout.take() {
        let mut reader = BufReader::new(stdout);
        let mut line = Vec::new();
        let mut forwarded = 0usize;
        loop {
            line.clear();
            let n = reader
                .read_until(b'\n', &mut line)
                .await
                .with_context(|| format!("reading stdout of `{spec}`"))?;
            if n == 0 {
                break;
            }
            out.write_all(&line)
                .and_then(|()| out.flush())
                .context("forwarding command output")?;
            forwarded += 1;
        }
        debug!(cmd = %spec, lines = forwarded, "stdout closed");
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for `{spec}`"))?;

    let code = status.code().unwrap_or(-1);
    info!(
        cmd = %spec,
        exit_code = code,
        success = status.success(),
        "command exited"
    );

    Ok(CommandStatus::from_code(code))
}
