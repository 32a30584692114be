#![allow(dead_code)]

use runmux::config::{
    InvocationConfig, RawFlag, RawInvocationFile, RawInvocationSection, RawParam,
    RawStructuredSection,
};

/// Builder for `InvocationConfig` to simplify test setup.
///
/// Goes through the same raw-file validation path as production code, so a
/// builder that produces an invalid invocation panics loudly.
pub struct InvocationBuilder {
    raw: RawInvocationFile,
}

impl InvocationBuilder {
    pub fn new(executable: &str) -> Self {
        Self {
            raw: RawInvocationFile {
                invocation: RawInvocationSection {
                    executable: executable.to_string(),
                    flags: vec![],
                    fail_on_error: true,
                    stdout_level: runmux::types::Severity::Info,
                    stderr_level: runmux::types::Severity::Warn,
                    timeout: None,
                },
                structured: None,
            },
        }
    }

    pub fn flag(mut self, name: &str) -> Self {
        self.raw.invocation.flags.push(RawFlag {
            name: name.to_string(),
            value: None,
        });
        self
    }

    pub fn flag_with_value(mut self, name: &str, value: &str) -> Self {
        self.raw.invocation.flags.push(RawFlag {
            name: name.to_string(),
            value: Some(value.to_string()),
        });
        self
    }

    pub fn structured(mut self, flag: &str, params: &[(&str, &str)]) -> Self {
        self.raw.structured = Some(RawStructuredSection {
            flag: flag.to_string(),
            params: params
                .iter()
                .map(|(name, value)| RawParam {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        });
        self
    }

    pub fn fail_on_error(mut self, val: bool) -> Self {
        self.raw.invocation.fail_on_error = val;
        self
    }

    pub fn stdout_level(mut self, level: runmux::types::Severity) -> Self {
        self.raw.invocation.stdout_level = level;
        self
    }

    pub fn stderr_level(mut self, level: runmux::types::Severity) -> Self {
        self.raw.invocation.stderr_level = level;
        self
    }

    pub fn timeout(mut self, duration: &str) -> Self {
        self.raw.invocation.timeout = Some(duration.to_string());
        self
    }

    pub fn build(self) -> InvocationConfig {
        InvocationConfig::try_from(self.raw)
            .expect("Failed to build valid invocation from builder")
    }

    /// The raw, unvalidated form; for tests exercising validation errors.
    pub fn build_raw(self) -> RawInvocationFile {
        self.raw
    }
}
