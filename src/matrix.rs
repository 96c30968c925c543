// src/matrix.rs

//! The target matrix: which platforms to build and where each binary goes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One platform to build for.
///
/// `out_dir` is the directory the built artifact is copied into. It is stored
/// fully resolved (already joined onto the bin root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    pub arch: String,
    pub env: String,
    pub out_dir: PathBuf,
}

impl TargetEntry {
    pub fn new(arch: impl Into<String>, env: impl Into<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            arch: arch.into(),
            env: env.into(),
            out_dir: out_dir.into(),
        }
    }

    /// Target triple handed to the build tool, e.g. `i686-unknown-linux-gnu`.
    pub fn platform_id(&self) -> String {
        platform_id(&self.arch, &self.env)
    }
}

pub fn platform_id(arch: &str, env: &str) -> String {
    format!("{arch}-unknown-linux-{env}")
}

/// Ordered list of targets. Order is build order and report order only;
/// entries never depend on each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetMatrix {
    entries: Vec<TargetEntry>,
}

impl TargetMatrix {
    pub fn new(entries: Vec<TargetEntry>) -> Self {
        Self { entries }
    }

    /// The matrix used when no `[[target]]` tables are configured:
    /// 32-bit glibc into `bin/32`, 64-bit musl into `bin/64`.
    pub fn builtin(bin_root: &Path) -> Self {
        Self::new(vec![
            TargetEntry::new("i686", "gnu", bin_root.join("32")),
            TargetEntry::new("x86_64", "musl", bin_root.join("64")),
        ])
    }

    pub fn entries(&self) -> &[TargetEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct output directories, in the order they first appear.
    pub fn output_dirs(&self) -> Vec<&Path> {
        let mut seen: Vec<&Path> = Vec::new();
        for entry in &self.entries {
            let dir = entry.out_dir.as_path();
            if !seen.contains(&dir) {
                seen.push(dir);
            }
        }
        seen
    }

    /// Output directories written by more than one entry, with the platforms
    /// that share them. Later entries overwrite the artifact of earlier ones.
    pub fn shared_output_dirs(&self) -> BTreeMap<&Path, Vec<String>> {
        let mut by_dir: BTreeMap<&Path, Vec<String>> = BTreeMap::new();
        for entry in &self.entries {
            by_dir
                .entry(entry.out_dir.as_path())
                .or_default()
                .push(entry.platform_id());
        }
        by_dir.retain(|_, platforms| platforms.len() > 1);
        by_dir
    }
}

impl<'a> IntoIterator for &'a TargetMatrix {
    type Item = &'a TargetEntry;
    type IntoIter = std::slice::Iter<'a, TargetEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
