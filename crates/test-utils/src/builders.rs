#![allow(dead_code)]

use std::path::{Path, PathBuf};

use relbuild::config::{Overrides, RawReleaseFile, RawTarget, ReleaseConfig};

/// Builder for `ReleaseConfig` to simplify test setup.
///
/// Goes through `ReleaseConfig::resolve`, so built configs are validated the
/// same way a loaded file is.
pub struct ReleaseConfigBuilder {
    raw: RawReleaseFile,
    project_root: PathBuf,
}

impl ReleaseConfigBuilder {
    pub fn new(artifact: &str, project_root: impl AsRef<Path>) -> Self {
        let mut raw = RawReleaseFile::default();
        raw.release.artifact = Some(artifact.to_string());
        Self {
            raw,
            project_root: project_root.as_ref().to_path_buf(),
        }
    }

    pub fn tool(mut self, tool: &str) -> Self {
        self.raw.release.tool = tool.to_string();
        self
    }

    pub fn bin_dir(mut self, dir: &str) -> Self {
        self.raw.release.bin_dir = PathBuf::from(dir);
        self
    }

    /// Add a target; `out_dir` is relative to the bin dir.
    pub fn target(mut self, arch: &str, env: &str, out_dir: &str) -> Self {
        self.raw.target.get_or_insert_with(Vec::new).push(RawTarget {
            arch: arch.to_string(),
            env: env.to_string(),
            out_dir: PathBuf::from(out_dir),
        });
        self
    }

    /// Explicitly configure no targets at all.
    pub fn no_targets(mut self) -> Self {
        self.raw.target = Some(Vec::new());
        self
    }

    pub fn build(self) -> ReleaseConfig {
        ReleaseConfig::resolve(self.raw, &self.project_root, Overrides::default())
            .expect("Failed to build valid config from builder")
    }
}
