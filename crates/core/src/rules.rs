//! Typed rules: a string guard, a converter, then constraint checks.
//!
//! Each rule is a plain configuration value built once and invoked per raw
//! input. `validate` is the required form; `validate_optional` first maps
//! `null` and `""` to `None` and skips every later stage when there is no
//! value.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::convert::{BackslashYenPrefixed, CommaGrouped, KanjiYenSuffixed, Plain, StringToInt};
use crate::datetime::DateFormat;
use crate::error::{ConvertError, CoreError};
use crate::numeric::NumericConstraints;
use crate::optional::{normalize_optional, require_str};
use crate::text::{check_half_width, LengthConstraints, Pattern, TextTransform};

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

/// String-to-integer rule parameterized by its converter.
#[derive(Debug, Clone, Default)]
pub struct IntegerRule<C> {
    converter: C,
    constraints: NumericConstraints,
}

impl<C: StringToInt> IntegerRule<C> {
    pub fn new(converter: C) -> Self {
        IntegerRule {
            converter,
            constraints: NumericConstraints::default(),
        }
    }

    pub fn constrained(mut self, constraints: NumericConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Convert an already-guarded string and apply the constraints.
    pub fn convert_str(&self, s: &str) -> Result<i64, ConvertError> {
        let value = self.converter.convert(s)?;
        Ok(self.constraints.check(value)?)
    }

    pub fn validate(&self, raw: &Value) -> Result<i64, ConvertError> {
        self.convert_str(require_str(raw)?)
    }

    pub fn validate_optional(&self, raw: &Value) -> Result<Option<i64>, ConvertError> {
        normalize_optional(raw)?
            .map(|s| self.convert_str(s))
            .transpose()
    }
}

/// Plain base-10 integer strings.
pub fn string_to_int() -> IntegerRule<Plain> {
    IntegerRule::new(Plain)
}

/// Integer strings with digit-grouping commas.
pub fn comma_int() -> IntegerRule<CommaGrouped> {
    IntegerRule::new(CommaGrouped)
}

/// Amounts written as `1,000 円`.
pub fn kanji_yen_int() -> IntegerRule<KanjiYenSuffixed> {
    IntegerRule::new(KanjiYenSuffixed)
}

/// Amounts written as `\1,000`.
pub fn symbol_yen_int() -> IntegerRule<BackslashYenPrefixed> {
    IntegerRule::new(BackslashYenPrefixed)
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Length and half-width checks on an untransformed string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringRule {
    length: LengthConstraints,
    half_width: bool,
}

impl StringRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length(mut self, length: LengthConstraints) -> Self {
        self.length = length;
        self
    }

    pub fn half_width(mut self) -> Self {
        self.half_width = true;
        self
    }

    pub fn check_str(&self, s: &str) -> Result<(), ConvertError> {
        self.length.check(s)?;
        if self.half_width {
            check_half_width(s)?;
        }
        Ok(())
    }

    pub fn validate(&self, raw: &Value) -> Result<String, ConvertError> {
        let s = require_str(raw)?;
        self.check_str(s)?;
        Ok(s.to_string())
    }

    pub fn validate_optional(&self, raw: &Value) -> Result<Option<String>, ConvertError> {
        match normalize_optional(raw)? {
            Some(s) => {
                self.check_str(s)?;
                Ok(Some(s.to_string()))
            }
            None => Ok(None),
        }
    }
}

/// Length-constrained string.
pub fn constrained_string(length: LengthConstraints) -> StringRule {
    StringRule::new().length(length)
}

/// String made only of half-width characters.
pub fn half_width_string() -> StringRule {
    StringRule::new().half_width()
}

/// Optional string with normalizing transforms, length bounds and a
/// pattern.
///
/// Unlike the other optional rules this one requires a string: `null` is a
/// type mismatch, while `""` still becomes `None`. Checks run on the
/// transformed text.
#[derive(Debug, Clone, Default)]
pub struct OptionalStrRule {
    transform: TextTransform,
    length: LengthConstraints,
    pattern: Option<Pattern>,
}

impl OptionalStrRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(mut self, transform: TextTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn length(mut self, length: LengthConstraints) -> Self {
        self.length = length;
        self
    }

    pub fn regex(mut self, pattern: &str) -> Result<Self, CoreError> {
        self.pattern = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    pub fn validate(&self, raw: &Value) -> Result<Option<String>, ConvertError> {
        let s = require_str(raw)?;
        if s.is_empty() {
            return Ok(None);
        }
        let value = self.transform.apply(s);
        self.length.check(&value)?;
        if let Some(pattern) = &self.pattern {
            pattern.check(&value)?;
        }
        Ok(Some(value))
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Fixed-format date string to a midnight `NaiveDateTime`.
#[derive(Debug, Clone, Copy)]
pub struct DateRule {
    format: DateFormat,
}

impl DateRule {
    pub fn new(format: DateFormat) -> Self {
        DateRule { format }
    }

    pub fn format(&self) -> DateFormat {
        self.format
    }

    pub fn validate(&self, raw: &Value) -> Result<NaiveDateTime, ConvertError> {
        Ok(self.format.parse(require_str(raw)?)?)
    }
}
