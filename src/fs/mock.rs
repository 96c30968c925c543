// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    dirs: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
    /// Every `ensure_dir` call, in order.
    ensure_calls: Vec<PathBuf>,
    /// Paths for which `ensure_dir` fails.
    failing: HashSet<PathBuf>,
}

/// In-memory filesystem that records directory creation.
///
/// Clones share state, so a test can keep one handle and give another to the
/// orchestrator.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make `ensure_dir(path)` fail.
    pub fn fail_on(&self, path: impl AsRef<Path>) {
        self.lock().failing.insert(path.as_ref().to_path_buf());
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            insert_with_parents(&mut state.dirs, parent);
        }
        state.files.insert(path);
    }

    /// All `ensure_dir` calls seen so far, in call order.
    pub fn ensure_calls(&self) -> Vec<PathBuf> {
        self.lock().ensure_calls.clone()
    }
}

fn insert_with_parents(dirs: &mut HashSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

impl FileSystem for MockFileSystem {
    fn ensure_dir(&self, path: &Path) -> Result<()> {
        let mut state = self.lock();
        state.ensure_calls.push(path.to_path_buf());
        if state.failing.contains(path) {
            return Err(anyhow!("permission denied: {:?}", path));
        }
        if state.files.contains(path) {
            return Err(anyhow!("file exists: {:?}", path));
        }
        insert_with_parents(&mut state.dirs, path);
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock().files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_dir_registers_parents_and_records_calls() {
        let fs = MockFileSystem::new();
        fs.ensure_dir(Path::new("/p/bin/32")).unwrap();
        fs.ensure_dir(Path::new("/p/bin/32")).unwrap();

        assert!(fs.is_dir(Path::new("/p/bin")));
        assert!(fs.is_dir(Path::new("/p/bin/32")));
        assert_eq!(fs.ensure_calls().len(), 2);
    }

    #[test]
    fn configured_failure_is_reported() {
        let fs = MockFileSystem::new();
        fs.fail_on("/ro/bin");
        assert!(fs.ensure_dir(Path::new("/ro/bin")).is_err());
        assert!(!fs.is_dir(Path::new("/ro/bin")));
    }

    #[test]
    fn file_in_the_way_blocks_dir() {
        let fs = MockFileSystem::new();
        fs.add_file("/p/bin");
        assert!(fs.is_file(Path::new("/p/bin")));
        assert!(fs.is_dir(Path::new("/p")));
        assert!(fs.ensure_dir(Path::new("/p/bin")).is_err());
    }
}
