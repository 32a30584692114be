// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::cmdline::{CommandLine, CommandLineBuilder};
use crate::errors::Result;
use crate::params::ParameterSet;
use crate::types::Severity;

/// Top-level invocation file as read from TOML.
///
/// This is a direct mapping of the on-disk format:
///
/// ```toml
/// [invocation]
/// executable = "keytool"
/// fail_on_error = true
/// stdout_level = "info"
/// stderr_level = "warn"
/// timeout = "30s"
///
/// [[invocation.flag]]
/// name = "-genkey"
///
/// [[invocation.flag]]
/// name = "-alias"
/// value = "release key"
///
/// [structured]
/// flag = "-dname"
///
/// [[structured.param]]
/// name = "CN"
/// value = "Jane Doe"
/// ```
///
/// This raw form is deserialized as-is; semantic validation happens in the
/// `TryFrom<RawInvocationFile>` conversion to [`InvocationConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawInvocationFile {
    /// `[invocation]` section.
    pub invocation: RawInvocationSection,

    /// Optional `[structured]` section.
    #[serde(default)]
    pub structured: Option<RawStructuredSection>,
}

/// `[invocation]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInvocationSection {
    /// Program to run. Required, non-empty.
    #[serde(default)]
    pub executable: String,

    /// Ordered `[[invocation.flag]]` entries.
    #[serde(default, rename = "flag")]
    pub flags: Vec<RawFlag>,

    /// Treat a nonzero exit code as an invocation failure. Default: true.
    #[serde(default = "default_fail_on_error")]
    pub fail_on_error: bool,

    /// Severity for forwarded stdout lines. Default: `info`.
    #[serde(default = "default_stdout_level")]
    pub stdout_level: Severity,

    /// Severity for forwarded stderr lines. Default: `warn`.
    #[serde(default = "default_stderr_level")]
    pub stderr_level: Severity,

    /// Optional duration string like `"250ms"`, `"30s"`, `"2m"`.
    #[serde(default)]
    pub timeout: Option<String>,
}

fn default_fail_on_error() -> bool {
    true
}

fn default_stdout_level() -> Severity {
    Severity::Info
}

fn default_stderr_level() -> Severity {
    Severity::Warn
}

/// One `[[invocation.flag]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFlag {
    pub name: String,

    /// A flag without a value contributes a single token; with a value it
    /// contributes two. An explicitly empty value is kept as an empty token.
    #[serde(default)]
    pub value: Option<String>,
}

/// `[structured]` section: a flag whose value is a rendered parameter set.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStructuredSection {
    pub flag: String,

    /// Ordered `[[structured.param]]` entries.
    #[serde(default, rename = "param")]
    pub params: Vec<RawParam>,
}

/// One `[[structured.param]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawParam {
    pub name: String,

    #[serde(default)]
    pub value: String,
}

/// Validated invocation description, produced from [`RawInvocationFile`].
#[derive(Debug, Clone)]
pub struct InvocationConfig {
    pub executable: String,
    pub flags: Vec<Flag>,
    pub structured: Option<StructuredFlag>,
    pub fail_on_error: bool,
    pub stdout_level: Severity,
    pub stderr_level: Severity,
    pub timeout: Option<Duration>,
}

/// A validated flag entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    pub value: Option<String>,
}

/// A validated structured-parameter flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredFlag {
    pub flag: String,
    pub params: ParameterSet,
}

impl InvocationConfig {
    /// Assemble the [`CommandLine`] for this invocation.
    pub fn command_line(&self) -> Result<CommandLine> {
        let mut builder = CommandLineBuilder::new().executable(&self.executable);

        for flag in &self.flags {
            builder = match &flag.value {
                Some(value) => builder.flag_with_value(&flag.name, value),
                None => builder.flag(&flag.name),
            };
        }

        if let Some(structured) = &self.structured {
            builder = builder.structured(&structured.flag, &structured.params);
        }

        builder.build()
    }
}
