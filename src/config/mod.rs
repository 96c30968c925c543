// src/config/mod.rs

//! Release configuration: the TOML file model, loading, and resolution into
//! the immutable [`ReleaseConfig`] the orchestrator runs against.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, load_release_config};
pub use model::{Overrides, RawReleaseFile, RawTarget, ReleaseConfig, ReleaseSection};
