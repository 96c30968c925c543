// src/config/validate.rs

use std::path::{Path, PathBuf};

use crate::config::model::{Overrides, RawReleaseFile, RawTarget, ReleaseConfig};
use crate::errors::{ReleaseError, Result};
use crate::matrix::{TargetEntry, TargetMatrix};

impl ReleaseConfig {
    /// Validate a raw release file and resolve all paths.
    ///
    /// `base_dir` is the directory relative paths in the file are taken
    /// against (normally the config file's directory). CLI `overrides` win
    /// over the file.
    pub fn resolve(raw: RawReleaseFile, base_dir: &Path, overrides: Overrides) -> Result<Self> {
        let release = raw.release;

        let artifact = overrides
            .artifact
            .or(release.artifact)
            .ok_or_else(|| {
                ReleaseError::ConfigError(
                    "no artifact name: set [release].artifact or pass --artifact".to_string(),
                )
            })?;
        validate_artifact(&artifact)?;

        let tool = overrides.tool.unwrap_or(release.tool);
        if tool.trim().is_empty() {
            return Err(ReleaseError::ConfigError(
                "[release].tool must not be empty".to_string(),
            ));
        }

        // A CLI root is taken as given (relative to the working directory);
        // only the file's own root is relative to the file.
        let project_root = match (overrides.project_root, release.project_root) {
            (Some(root), _) => root,
            (None, Some(root)) => base_dir.join(root),
            (None, None) => base_dir.to_path_buf(),
        };
        let bin_root = project_root.join(&release.bin_dir);

        let matrix = match raw.target {
            Some(targets) => resolve_targets(&targets, &bin_root)?,
            None => TargetMatrix::builtin(&bin_root),
        };

        Ok(ReleaseConfig {
            artifact,
            tool,
            project_root,
            bin_root,
            matrix,
        })
    }
}

fn validate_artifact(artifact: &str) -> Result<()> {
    if artifact.trim().is_empty() {
        return Err(ReleaseError::ConfigError(
            "artifact name must not be empty".to_string(),
        ));
    }
    if artifact == "." || artifact == ".." || artifact.contains('/') || artifact.contains('\\') {
        return Err(ReleaseError::ConfigError(format!(
            "artifact name '{artifact}' must be a file name, not a path"
        )));
    }
    Ok(())
}

fn resolve_targets(targets: &[RawTarget], bin_root: &Path) -> Result<TargetMatrix> {
    let mut entries = Vec::with_capacity(targets.len());
    for (idx, target) in targets.iter().enumerate() {
        validate_triple_part(idx, "arch", &target.arch)?;
        validate_triple_part(idx, "env", &target.env)?;
        if target.out_dir.as_os_str().is_empty() {
            return Err(ReleaseError::ConfigError(format!(
                "target #{idx} ({}-{}) has an empty out_dir",
                target.arch, target.env
            )));
        }
        let out_dir: PathBuf = bin_root.join(&target.out_dir);
        entries.push(TargetEntry::new(&target.arch, &target.env, out_dir));
    }
    Ok(TargetMatrix::new(entries))
}

fn validate_triple_part(idx: usize, field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ReleaseError::ConfigError(format!(
            "target #{idx}: `{field}` must not be empty"
        )));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ReleaseError::ConfigError(format!(
            "target #{idx}: `{field}` '{value}' must not contain whitespace"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> RawReleaseFile {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn targets_resolve_under_bin_root() {
        let raw = parse(
            r#"
[release]
artifact = "notify-hook"
bin_dir = "dist"

[[target]]
arch = "aarch64"
env = "musl"
out_dir = "arm64"
"#,
        );
        let cfg = ReleaseConfig::resolve(raw, Path::new("/proj"), Overrides::default()).unwrap();
        assert_eq!(cfg.bin_root, PathBuf::from("/proj/dist"));
        assert_eq!(cfg.matrix.len(), 1);
        assert_eq!(cfg.matrix.entries()[0].out_dir, PathBuf::from("/proj/dist/arm64"));
    }

    #[test]
    fn missing_targets_fall_back_to_builtin_matrix() {
        let raw = parse("[release]\nartifact = \"tool\"\n");
        let cfg = ReleaseConfig::resolve(raw, Path::new("/p"), Overrides::default()).unwrap();
        assert_eq!(cfg.matrix, TargetMatrix::builtin(Path::new("/p/bin")));
    }

    #[test]
    fn explicit_empty_target_list_is_kept_empty() {
        let raw = parse("target = []\n[release]\nartifact = \"tool\"\n");
        let cfg = ReleaseConfig::resolve(raw, Path::new("/p"), Overrides::default()).unwrap();
        assert!(cfg.matrix.is_empty());
    }

    #[test]
    fn overrides_win_over_file() {
        let raw = parse("[release]\nartifact = \"a\"\ntool = \"cross\"\n");
        let overrides = Overrides {
            artifact: Some("b".to_string()),
            tool: Some("cargo".to_string()),
            project_root: Some(PathBuf::from("/elsewhere")),
        };
        let cfg = ReleaseConfig::resolve(raw, Path::new("/p"), overrides).unwrap();
        assert_eq!(cfg.artifact, "b");
        assert_eq!(cfg.tool, "cargo");
        assert_eq!(cfg.project_root, PathBuf::from("/elsewhere"));
    }

    #[test]
    fn missing_artifact_is_a_config_error() {
        let err = ReleaseConfig::resolve(RawReleaseFile::default(), Path::new("."), Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ReleaseError::ConfigError(msg) if msg.contains("--artifact")));
    }

    #[test]
    fn artifact_with_path_separator_is_rejected() {
        let raw = parse("[release]\nartifact = \"target/notify-hook\"\n");
        let err = ReleaseConfig::resolve(raw, Path::new("."), Overrides::default()).unwrap_err();
        assert!(matches!(err, ReleaseError::ConfigError(_)));
    }

    #[test]
    fn dot_artifact_names_are_rejected() {
        for name in [".", ".."] {
            let raw = parse(&format!("[release]\nartifact = \"{name}\"\n"));
            let err = ReleaseConfig::resolve(raw, Path::new("."), Overrides::default()).unwrap_err();
            match err {
                ReleaseError::ConfigError(msg) => assert!(msg.contains("file name"), "{msg}"),
                other => panic!("expected ConfigError for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn relative_cli_root_is_not_joined_onto_config_dir() {
        let raw = parse("[release]\nartifact = \"a\"\nproject_root = \"..\"\n");
        let overrides = Overrides {
            project_root: Some(PathBuf::from("proj")),
            ..Overrides::default()
        };
        let cfg = ReleaseConfig::resolve(raw, Path::new("ci"), overrides).unwrap();
        assert_eq!(cfg.project_root, PathBuf::from("proj"));
        assert_eq!(cfg.bin_root, PathBuf::from("proj/bin"));
    }

    #[test]
    fn file_root_is_relative_to_config_dir() {
        let raw = parse("[release]\nartifact = \"a\"\nproject_root = \"..\"\n");
        let cfg = ReleaseConfig::resolve(raw, Path::new("ci"), Overrides::default()).unwrap();
        assert_eq!(cfg.project_root, PathBuf::from("ci/.."));
    }

    #[test]
    fn whitespace_in_arch_is_rejected() {
        let raw = parse(
            r#"
[release]
artifact = "a"

[[target]]
arch = "x86 64"
env = "gnu"
out_dir = "64"
"#,
        );
        let err = ReleaseConfig::resolve(raw, Path::new("."), Overrides::default()).unwrap_err();
        match err {
            ReleaseError::ConfigError(msg) => assert!(msg.contains("arch")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }
}
