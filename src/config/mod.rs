// src/config/mod.rs

//! Invocation file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load an invocation file from disk (`loader.rs`).
//! - Validate required fields and convert to the typed form (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    Flag, InvocationConfig, RawFlag, RawInvocationFile, RawInvocationSection, RawParam,
    RawStructuredSection, StructuredFlag,
};
