// src/cmdline.rs

//! Command-line assembly.
//!
//! A [`CommandLine`] is an executable plus discrete argument tokens. Tokens
//! are handed to the OS process-creation facility as an array and never
//! concatenated into a shell-interpreted string, so embedded whitespace or
//! quote characters in a value can never split it into multiple tokens or
//! inject extra ones.

use std::fmt;

use crate::errors::{Result, RunmuxError};
use crate::params::ParameterSet;

/// A fully assembled invocation: executable name plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    executable: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    /// Human-readable rendering for dry runs and logs. Tokens containing
    /// whitespace are quoted here for readability only; the quoting plays no
    /// role in how the process is actually spawned.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.executable)?;
        for arg in &self.args {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Builder for [`CommandLine`].
///
/// Appending order is preserved; `build` validates required fields before
/// anything can be spawned.
#[derive(Debug, Clone, Default)]
pub struct CommandLineBuilder {
    executable: Option<String>,
    args: Vec<String>,
}

impl CommandLineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executable(mut self, exe: impl Into<String>) -> Self {
        self.executable = Some(exe.into());
        self
    }

    /// Append a bare flag token, e.g. `-v`.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.args.push(name.into());
        self
    }

    /// Append a flag followed by its value as two tokens.
    ///
    /// An empty value still contributes its token; downstream tools see an
    /// explicit empty argument rather than a missing one.
    pub fn flag_with_value(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.args.push(name.into());
        self.args.push(value.into());
        self
    }

    /// Append one raw argument token.
    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.args.push(token.into());
        self
    }

    /// Append `flag` followed by the rendered parameter set as one token.
    pub fn structured(mut self, flag: impl Into<String>, params: &ParameterSet) -> Self {
        self.args.push(flag.into());
        self.args.push(params.render());
        self
    }

    pub fn build(self) -> Result<CommandLine> {
        let executable = match self.executable {
            Some(exe) if !exe.trim().is_empty() => exe,
            _ => return Err(RunmuxError::MissingField("executable")),
        };

        Ok(CommandLine {
            executable,
            args: self.args,
        })
    }
}
