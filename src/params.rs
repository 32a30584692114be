// src/params.rs

//! Structured name/value parameter sets and their delimiter escaping.
//!
//! A parameter set renders as `name1=value1 ,name2=value2`: literal commas in
//! names and values are escaped as `\,`, entries are joined with `" ,"`, and
//! name and value are joined by `=` with no surrounding spaces. The format is
//! fixed, not configurable; tools that consume distinguished-name style
//! strings rely on it byte-for-byte.

use std::borrow::Cow;
use std::fmt;

/// Delimiter that must not appear unescaped inside a name or value.
pub const DELIMITER: char = ',';

/// Escape character inserted in front of literal delimiters.
pub const ESCAPE: char = '\\';

/// Separator between rendered entries.
const ENTRY_SEPARATOR: &str = " ,";

/// Escape every literal delimiter in `input`.
///
/// Input without a delimiter is returned borrowed, unchanged. Empty input
/// yields empty output. Re-scanning the result never finds an unescaped
/// delimiter.
pub fn encode(input: &str) -> Cow<'_, str> {
    if !input.contains(DELIMITER) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 2);
    for c in input.chars() {
        if c == DELIMITER {
            out.push(ESCAPE);
        }
        out.push(c);
    }

    Cow::Owned(out)
}

/// Inverse of [`encode`]: scanning left to right, each escape-delimiter pair
/// collapses back to the bare delimiter. All other characters, including lone
/// escape characters, pass through untouched.
pub fn decode(input: &str) -> Cow<'_, str> {
    if !input.contains(ESCAPE) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE && chars.peek() == Some(&DELIMITER) {
            out.push(DELIMITER);
            chars.next();
        } else {
            out.push(c);
        }
    }

    Cow::Owned(out)
}

/// One `name=value` component of a structured parameter string.
///
/// Insertion order into a [`ParameterSet`] is significant and preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameValueParam {
    pub name: String,
    pub value: String,
}

impl NameValueParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Immutable ordered sequence of [`NameValueParam`]s.
///
/// Built once per invocation and rendered through `Display`; there is no way
/// to mutate an existing set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    params: Vec<NameValueParam>,
}

impl ParameterSet {
    pub fn new(params: Vec<NameValueParam>) -> Self {
        Self { params }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NameValueParam> {
        self.params.iter()
    }

    /// Render the set as a single structured parameter string.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl FromIterator<NameValueParam> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = NameValueParam>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for param in &self.params {
            if !first {
                f.write_str(ENTRY_SEPARATOR)?;
            }
            first = false;

            write!(f, "{}={}", encode(&param.name), encode(&param.value))?;
        }
        Ok(())
    }
}
