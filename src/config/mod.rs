// src/config/mod.rs

//! TOML task files.
//!
//! - [`model`] is the serde mapping of the file.
//! - [`validate`] turns a [`RawConfigFile`] into a checked [`ConfigFile`].
//! - [`loader`] reads files and registers their tasks.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{build_registry, config_root_dir, default_config_path, load_and_validate};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
