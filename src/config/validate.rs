// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{
    Flag, InvocationConfig, RawInvocationFile, StructuredFlag,
};
use crate::errors::{Result, RunmuxError};
use crate::params::{NameValueParam, ParameterSet};

impl TryFrom<RawInvocationFile> for InvocationConfig {
    type Error = crate::errors::RunmuxError;

    fn try_from(raw: RawInvocationFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_file(&raw)?;

        let timeout = match raw.invocation.timeout.as_deref() {
            Some(s) => Some(parse_duration(s).map_err(|e| {
                RunmuxError::ConfigError(format!("[invocation].timeout: {e}"))
            })?),
            None => None,
        };

        let flags = raw
            .invocation
            .flags
            .into_iter()
            .map(|f| Flag {
                name: f.name,
                value: f.value,
            })
            .collect();

        let structured = raw.structured.map(|s| StructuredFlag {
            flag: s.flag,
            params: s
                .params
                .into_iter()
                .map(|p| NameValueParam::new(p.name, p.value))
                .collect::<ParameterSet>(),
        });

        Ok(InvocationConfig {
            executable: raw.invocation.executable,
            flags,
            structured,
            fail_on_error: raw.invocation.fail_on_error,
            stdout_level: raw.invocation.stdout_level,
            stderr_level: raw.invocation.stderr_level,
            timeout,
        })
    }
}

fn validate_raw_file(raw: &RawInvocationFile) -> Result<()> {
    ensure_executable(raw)?;
    validate_flags(raw)?;
    validate_structured(raw)?;
    Ok(())
}

fn ensure_executable(raw: &RawInvocationFile) -> Result<()> {
    if raw.invocation.executable.trim().is_empty() {
        return Err(RunmuxError::MissingField("executable"));
    }
    Ok(())
}

fn validate_flags(raw: &RawInvocationFile) -> Result<()> {
    for (idx, flag) in raw.invocation.flags.iter().enumerate() {
        if flag.name.trim().is_empty() {
            return Err(RunmuxError::ConfigError(format!(
                "[[invocation.flag]] entry {idx} has an empty `name`"
            )));
        }
    }
    Ok(())
}

fn validate_structured(raw: &RawInvocationFile) -> Result<()> {
    let Some(structured) = &raw.structured else {
        return Ok(());
    };

    if structured.flag.trim().is_empty() {
        return Err(RunmuxError::MissingField("structured.flag"));
    }

    if structured.params.is_empty() {
        return Err(RunmuxError::ConfigError(
            "[structured] must contain at least one [[structured.param]] entry".to_string(),
        ));
    }

    for (idx, param) in structured.params.iter().enumerate() {
        if param.name.trim().is_empty() {
            return Err(RunmuxError::ConfigError(format!(
                "[[structured.param]] entry {idx} has an empty `name`"
            )));
        }
        // An empty `value` is allowed; it renders as `name=`.
    }

    Ok(())
}

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value * 60)),
        "h" => Ok(Duration::from_secs(value * 60 * 60)),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}
