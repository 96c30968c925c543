// src/exec/command.rs

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::CommandFailure;

/// A program invocation: program, arguments and optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// `<tool> build --release --target <platform_id>`, run from `project_root`.
    pub fn release_build(tool: &str, platform_id: &str, project_root: &Path) -> Self {
        Self::new(tool)
            .args(["build", "--release", "--target", platform_id])
            .current_dir(project_root)
    }

    /// `cp <artifact> <out_dir>`.
    pub fn copy_into(artifact: &Path, out_dir: &Path) -> Self {
        Self::new("cp")
            .arg(artifact.to_string_lossy())
            .arg(out_dir.to_string_lossy())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Exit status of a finished command. `-1` stands for "killed by a signal".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: i32,
}

impl CommandStatus {
    pub const SUCCESS: CommandStatus = CommandStatus { code: 0 };

    pub fn from_code(code: i32) -> Self {
        Self { code }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// `Ok` for status 0, otherwise a [`CommandFailure`] naming `spec`.
    pub fn check(&self, spec: &CommandSpec) -> Result<(), CommandFailure> {
        if self.success() {
            Ok(())
        } else {
            Err(CommandFailure {
                command: spec.to_string(),
                status: self.code,
            })
        }
    }
}
