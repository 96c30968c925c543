// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{Overrides, RawReleaseFile, ReleaseConfig};
use crate::errors::{ReleaseError, Result};

/// Load a release file from a given path.
///
/// This only performs TOML deserialization; paths are not resolved and
/// nothing is validated. Use [`load_release_config`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawReleaseFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawReleaseFile = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load, validate and resolve the release configuration.
///
/// If `path` does not exist and `allow_missing` is set, the built-in matrix
/// is used with the current directory as project root; the artifact name
/// must then come from `overrides`.
pub fn load_release_config(
    path: impl AsRef<Path>,
    allow_missing: bool,
    overrides: Overrides,
) -> Result<ReleaseConfig> {
    let path = path.as_ref();
    let base_dir = config_base_dir(path);

    if !path.exists() {
        if !allow_missing {
            return Err(ReleaseError::ConfigError(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        info!(path = %path.display(), "no release config found; using built-in target matrix");
        return ReleaseConfig::resolve(RawReleaseFile::default(), &base_dir, overrides);
    }

    debug!(path = %path.display(), "loading release config");
    let raw = load_from_path(path)?;
    ReleaseConfig::resolve(raw, &base_dir, overrides)
}

/// Directory containing the config file, or `.` for a bare file name.
fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
