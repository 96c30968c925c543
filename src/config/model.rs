// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::matrix::{TargetEntry, TargetMatrix};

/// Top-level release file as read from TOML.
///
/// ```toml
/// [release]
/// artifact = "notify-hook"
/// tool = "cross"
/// bin_dir = "bin"
///
/// [[target]]
/// arch = "i686"
/// env = "gnu"
/// out_dir = "32"
/// ```
///
/// `target` is optional: when absent the built-in matrix is used, while an
/// explicit `target = []` means "build nothing".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawReleaseFile {
    #[serde(default)]
    pub release: ReleaseSection,

    #[serde(default)]
    pub target: Option<Vec<RawTarget>>,
}

/// `[release]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseSection {
    /// Binary name produced by the build tool. Required unless `--artifact`
    /// is passed.
    #[serde(default)]
    pub artifact: Option<String>,

    /// Cross-compilation tool, invoked as `<tool> build --release --target <triple>`.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Project root holding `target/`. Relative paths are taken relative to
    /// the config file's directory; defaults to that directory.
    #[serde(default)]
    pub project_root: Option<PathBuf>,

    /// Root of the collected binaries, relative to the project root.
    #[serde(default = "default_bin_dir")]
    pub bin_dir: PathBuf,
}

fn default_tool() -> String {
    "cross".to_string()
}

fn default_bin_dir() -> PathBuf {
    PathBuf::from("bin")
}

impl Default for ReleaseSection {
    fn default() -> Self {
        Self {
            artifact: None,
            tool: default_tool(),
            project_root: None,
            bin_dir: default_bin_dir(),
        }
    }
}

/// `[[target]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTarget {
    pub arch: String,
    pub env: String,
    /// Output directory, relative to `bin_dir`.
    pub out_dir: PathBuf,
}

/// Values from the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub artifact: Option<String>,
    pub tool: Option<String>,
    pub project_root: Option<PathBuf>,
}

/// Fully resolved, validated configuration. Built once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    pub artifact: String,
    pub tool: String,
    pub project_root: PathBuf,
    /// `project_root` joined with `bin_dir`; the root output location.
    pub bin_root: PathBuf,
    pub matrix: TargetMatrix,
}

impl ReleaseConfig {
    /// Configuration for `artifact` using the built-in matrix under
    /// `<project_root>/bin`.
    pub fn with_builtin_matrix(artifact: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let bin_root = project_root.join(default_bin_dir());
        Self {
            artifact: artifact.into(),
            tool: default_tool(),
            matrix: TargetMatrix::builtin(&bin_root),
            project_root,
            bin_root,
        }
    }

    /// Where the build tool leaves the binary for `entry`:
    /// `<project_root>/target/<triple>/release/<artifact>`.
    pub fn artifact_path(&self, entry: &TargetEntry) -> PathBuf {
        self.project_root
            .join("target")
            .join(entry.platform_id())
            .join("release")
            .join(&self.artifact)
    }

    /// Where the collected binary for `entry` ends up.
    pub fn destination(&self, entry: &TargetEntry) -> PathBuf {
        entry.out_dir.join(&self.artifact)
    }

    pub fn bin_root(&self) -> &Path {
        &self.bin_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_path_follows_cargo_target_layout() {
        let cfg = ReleaseConfig::with_builtin_matrix("notify-hook", "/work/proj");
        let entry = &cfg.matrix.entries()[0];
        assert_eq!(
            cfg.artifact_path(entry),
            PathBuf::from("/work/proj/target/i686-unknown-linux-gnu/release/notify-hook")
        );
        assert_eq!(
            cfg.destination(entry),
            PathBuf::from("/work/proj/bin/32/notify-hook")
        );
        assert_eq!(cfg.bin_root(), Path::new("/work/proj/bin"));
    }

    #[test]
    fn section_defaults() {
        let raw: RawReleaseFile = toml::from_str("").unwrap();
        assert_eq!(raw.release.tool, "cross");
        assert_eq!(raw.release.bin_dir, PathBuf::from("bin"));
        assert!(raw.target.is_none());
    }
}
