use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use relbuild::errors::Result;
use relbuild::exec::{CommandRunner, CommandSpec, CommandStatus};

/// A fake runner that:
/// - records every command it is asked to run
/// - exits with a scripted status for commands matching a pattern, 0 otherwise
/// - optionally simulates the toolchain on disk: `build` writes the artifact
///   under `<cwd>/target/<triple>/release/`, `cp` copies it for real.
#[derive(Clone)]
pub struct FakeRunner {
    executed: Arc<Mutex<Vec<CommandSpec>>>,
    failures: Vec<(String, i32)>,
    simulate_artifact: Option<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            executed: Arc::new(Mutex::new(Vec::new())),
            failures: Vec::new(),
            simulate_artifact: None,
        }
    }

    /// Exit with `status` for any command whose text contains `pattern`.
    pub fn fail_when(mut self, pattern: &str, status: i32) -> Self {
        self.failures.push((pattern.to_string(), status));
        self
    }

    /// Produce and copy real files named `artifact`.
    pub fn simulate_toolchain(mut self, artifact: &str) -> Self {
        self.simulate_artifact = Some(artifact.to_string());
        self
    }

    /// Shared handle on the recorded commands; survives moving the runner.
    pub fn executed_handle(&self) -> Arc<Mutex<Vec<CommandSpec>>> {
        Arc::clone(&self.executed)
    }

    pub fn executed(&self) -> Vec<CommandSpec> {
        self.executed.lock().unwrap().clone()
    }

    fn status_for(&self, spec: &CommandSpec) -> i32 {
        let text = spec.to_string();
        self.failures
            .iter()
            .find(|(pattern, _)| text.contains(pattern.as_str()))
            .map(|(_, status)| *status)
            .unwrap_or(0)
    }

    fn simulate(&self, artifact: &str, spec: &CommandSpec) -> std::io::Result<()> {
        match spec.program.as_str() {
            "cp" => {
                let src = PathBuf::from(&spec.args[0]);
                let dest_dir = PathBuf::from(&spec.args[1]);
                std::fs::copy(&src, dest_dir.join(artifact))?;
            }
            _ => {
                let triple = spec
                    .args
                    .iter()
                    .skip_while(|a| a.as_str() != "--target")
                    .nth(1)
                    .cloned()
                    .unwrap_or_default();
                let root = spec.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
                let out = root.join("target").join(&triple).join("release");
                std::fs::create_dir_all(&out)?;
                std::fs::write(out.join(artifact), format!("binary for {triple}\n"))?;
            }
        }
        Ok(())
    }
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for FakeRunner {
    fn run(
        &mut self,
        spec: CommandSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CommandStatus>> + Send + '_>> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(spec.clone());

            let code = self.status_for(&spec);
            if code == 0 {
                if let Some(artifact) = &self.simulate_artifact {
                    self.simulate(artifact, &spec)?;
                }
            }
            Ok(CommandStatus::from_code(code))
        })
    }
}
