// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{InvocationConfig, RawInvocationFile};
use crate::errors::Result;

/// Load an invocation file from a given path and return the raw
/// `RawInvocationFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (required fields, timeout format, etc.). Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawInvocationFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawInvocationFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load an invocation file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + default functions).
/// - Checks for:
///   - a non-empty executable,
///   - non-empty flag and parameter names,
///   - a well-formed timeout string.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<InvocationConfig> {
    let raw = load_from_path(&path)?;
    let config = InvocationConfig::try_from(raw)?;
    Ok(config)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Runmux.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Runmux.toml")
}
