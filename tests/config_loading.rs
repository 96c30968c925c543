// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;

use tempfile::{NamedTempFile, TempDir};

use relbuild::config::{load_release_config, Overrides};
use relbuild::errors::ReleaseError;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_resolves_relative_to_file() {
    let file = write_config(
        r#"
[release]
artifact = "notify-hook"
tool = "cargo"

[[target]]
arch = "i686"
env = "gnu"
out_dir = "32"

[[target]]
arch = "x86_64"
env = "musl"
out_dir = "64"
"#,
    );
    let base = file.path().parent().unwrap().to_path_buf();

    let cfg = load_release_config(file.path(), false, Overrides::default()).unwrap();

    assert_eq!(cfg.artifact, "notify-hook");
    assert_eq!(cfg.tool, "cargo");
    assert_eq!(cfg.project_root, base);
    assert_eq!(cfg.bin_root, base.join("bin"));
    let ids: Vec<String> = cfg.matrix.iter().map(|e| e.platform_id()).collect();
    assert_eq!(ids, vec!["i686-unknown-linux-gnu", "x86_64-unknown-linux-musl"]);
    assert_eq!(cfg.matrix.entries()[1].out_dir, base.join("bin").join("64"));
}

#[test]
fn unknown_keys_are_rejected() {
    let file = write_config(
        r#"
[release]
artifact = "notify-hook"
jobs = 4
"#,
    );

    match load_release_config(file.path(), false, Overrides::default()) {
        Err(ReleaseError::TomlError(e)) => assert!(e.to_string().contains("jobs")),
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn target_missing_out_dir_is_rejected() {
    let file = write_config(
        r#"
[release]
artifact = "notify-hook"

[[target]]
arch = "i686"
env = "gnu"
"#,
    );

    let result = load_release_config(file.path(), false, Overrides::default());
    assert!(matches!(result, Err(ReleaseError::TomlError(_))));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.toml");

    match load_release_config(&path, false, Overrides::default()) {
        Err(ReleaseError::ConfigError(msg)) => assert!(msg.contains("does not exist")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn missing_default_file_uses_builtin_matrix_with_artifact_override() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Release.toml");
    let overrides = Overrides {
        artifact: Some("notify-hook".to_string()),
        ..Overrides::default()
    };

    let cfg = load_release_config(&path, true, overrides).unwrap();

    assert_eq!(cfg.tool, "cross");
    assert_eq!(cfg.bin_root, temp.path().join("bin"));
    let dirs: Vec<PathBuf> = cfg.matrix.output_dirs().into_iter().map(PathBuf::from).collect();
    assert_eq!(dirs, vec![temp.path().join("bin/32"), temp.path().join("bin/64")]);
}

#[test]
fn missing_default_file_without_artifact_is_a_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Release.toml");

    let result = load_release_config(&path, true, Overrides::default());
    assert!(matches!(result, Err(ReleaseError::ConfigError(_))));
}

#[test]
fn relative_project_root_override_stays_relative_to_cwd() {
    let temp = TempDir::new().unwrap();
    let ci = temp.path().join("ci");
    std::fs::create_dir_all(&ci).unwrap();
    let path = ci.join("Release.toml");
    std::fs::write(&path, "[release]\nartifact = \"notify-hook\"\n").unwrap();
    let overrides = Overrides {
        project_root: Some(PathBuf::from("proj")),
        ..Overrides::default()
    };

    let cfg = load_release_config(&path, false, overrides).unwrap();

    assert_eq!(cfg.project_root, PathBuf::from("proj"));
    assert_eq!(cfg.bin_root, PathBuf::from("proj/bin"));
    assert_eq!(cfg.matrix.entries()[0].out_dir, PathBuf::from("proj/bin/32"));
}

#[test]
fn explicit_missing_default_named_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Release.toml");
    let overrides = Overrides {
        artifact: Some("notify-hook".to_string()),
        ..Overrides::default()
    };

    let result = load_release_config(&path, false, overrides);
    assert!(matches!(result, Err(ReleaseError::ConfigError(_))));
}
