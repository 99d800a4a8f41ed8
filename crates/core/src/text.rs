//! String length, character width, and text transforms.
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use icu_properties::{maps, EastAsianWidth};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConstraintViolation, CoreError};

// ---------------------------------------------------------------------------
// Length
// ---------------------------------------------------------------------------

/// Optional length bounds. All set bounds must hold; `equal_to` does not
/// override `min_length` / `max_length`, so conflicting settings reject
/// every string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LengthConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal_to: Option<usize>,
}

impl LengthConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, limit: usize) -> Self {
        self.min_length = Some(limit);
        self
    }

    pub fn max_length(mut self, limit: usize) -> Self {
        self.max_length = Some(limit);
        self
    }

    pub fn equal_to(mut self, limit: usize) -> Self {
        self.equal_to = Some(limit);
        self
    }

    /// Check `equal_to`, then `min_length`, then `max_length`.
    pub fn check(&self, value: &str) -> Result<(), ConstraintViolation> {
        let length = value.chars().count();
        if let Some(limit) = self.equal_to {
            if length != limit {
                return Err(ConstraintViolation::EqualLength { limit, length });
            }
        }
        if let Some(limit) = self.min_length {
            if length < limit {
                return Err(ConstraintViolation::MinLength { limit, length });
            }
        }
        if let Some(limit) = self.max_length {
            if length > limit {
                return Err(ConstraintViolation::MaxLength { limit, length });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Half-width
// ---------------------------------------------------------------------------

/// True for East_Asian_Width Wide, Fullwidth and Ambiguous.
pub fn is_wide(ch: char) -> bool {
    let width = maps::east_asian_width().get(ch);
    width == EastAsianWidth::Wide
        || width == EastAsianWidth::Fullwidth
        || width == EastAsianWidth::Ambiguous
}

/// Reject the first character that is not half-width.
///
/// Narrow, Halfwidth and Neutral characters pass; half-width katakana
/// such as `ｱ` is accepted while `ア` is not.
pub fn check_half_width(value: &str) -> Result<(), ConstraintViolation> {
    match value.chars().enumerate().find(|(_, ch)| is_wide(*ch)) {
        Some((index, ch)) => Err(ConstraintViolation::NotHalfWidth { ch, index }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Transforms and patterns
// ---------------------------------------------------------------------------

/// Normalizations applied before any check: strip, then lowercase, then
/// truncate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextTransform {
    #[serde(default)]
    pub strip_whitespace: bool,
    #[serde(default)]
    pub to_lower: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curtail_length: Option<usize>,
}

impl TextTransform {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, value: &str) -> String {
        if self.is_identity() {
            return value.to_string();
        }
        let mut out = if self.strip_whitespace {
            value.trim()
        } else {
            value
        }
        .to_string();
        if self.to_lower {
            out = out.to_lowercase();
        }
        if let Some(limit) = self.curtail_length {
            let cut = out.char_indices().nth(limit).map(|(i, _)| i);
            if let Some(cut) = cut {
                out.truncate(cut);
            }
        }
        out
    }
}

/// A regex that must match at the start of the value.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, CoreError> {
        let regex = Regex::new(source).map_err(|e| CoreError::InvalidPattern {
            pattern: source.to_string(),
            source: e,
        })?;
        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Leftmost match starting at offset 0. Trailing text is allowed unless
    /// the pattern itself ends with `$`.
    pub fn check(&self, value: &str) -> Result<(), ConstraintViolation> {
        match self.regex.find(value) {
            Some(m) if m.start() == 0 => Ok(()),
            _ => Err(ConstraintViolation::Pattern {
                pattern: self.source.clone(),
                value: value.to_string(),
            }),
        }
    }
}
