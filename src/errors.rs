// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::time::Duration;

use thiserror::Error;

use crate::types::StreamChannel;

#[derive(Error, Debug)]
pub enum RunmuxError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration error: required field `{0}` is not set")]
    MissingField(&'static str),

    #[error("failed to launch `{executable}`: {source}")]
    Launch {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process exited with code {0}")]
    NonZeroExit(i32),

    #[error("{channel} stream failed: {source}")]
    StreamIo {
        channel: StreamChannel,
        #[source]
        source: std::io::Error,
    },

    #[error("closing the {channel} sink failed: {source}")]
    StreamClose {
        channel: StreamChannel,
        #[source]
        source: std::io::Error,
    },

    #[error("process did not exit within {0:?} and was killed")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RunmuxError>;
