//! Syntactic filtering and one-pass percent decoding of raw path input.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// The filter rule a rejected input broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    /// Nothing to resolve.
    Empty,
    /// Longer than the configured maximum.
    TooLong,
    /// A character outside `[A-Za-z0-9._/-]`.
    DisallowedCharacter,
    /// Contains `..`.
    ParentReference,
    /// Starts with a separator.
    AbsolutePath,
}

impl ValidationRule {
    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooLong => "too_long",
            Self::DisallowedCharacter => "disallowed_character",
            Self::ParentReference => "parent_reference",
            Self::AbsolutePath => "absolute_path",
        }
    }

    /// Human-readable explanation, safe to show to clients.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Empty => "filename is empty",
            Self::TooLong => "filename is too long",
            Self::DisallowedCharacter => "filename contains disallowed characters",
            Self::ParentReference => "filename contains a parent directory reference",
            Self::AbsolutePath => "filename must be relative",
        }
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/')
}

/// Runs the syntactic filter. Rules are checked in declaration order.
pub fn check(input: &str, max_len: usize) -> Result<(), ValidationRule> {
    if input.is_empty() {
        return Err(ValidationRule::Empty);
    }
    if input.len() > max_len {
        return Err(ValidationRule::TooLong);
    }
    if !input.chars().all(is_allowed) {
        return Err(ValidationRule::DisallowedCharacter);
    }
    if input.contains("..") {
        return Err(ValidationRule::ParentReference);
    }
    if input.starts_with('/') {
        return Err(ValidationRule::AbsolutePath);
    }
    Ok(())
}

/// Percent-decodes `input` once. Malformed encodings fall back to the raw
/// string; the caller re-checks whatever comes back.
pub fn decode_once(input: &str) -> Cow<'_, str> {
    urlencoding::decode(input).unwrap_or(Cow::Borrowed(input))
}
