//! String guards and empty-string normalization.
//!
//! Every optional rule funnels its raw input through
//! [`normalize_optional`] first: `null` and `""` become `None`, other strings
//! pass through untouched, anything else is a type mismatch.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ConvertError, FormatError};

/// Accept a string, reject everything else including `null`.
pub fn require_str(raw: &Value) -> Result<&str, ConvertError> {
    raw.as_str()
        .ok_or_else(|| ConvertError::type_mismatch("String", raw))
}

/// `null` and `""` map to `None`; other strings pass through unchanged.
pub fn normalize_optional(raw: &Value) -> Result<Option<&str>, ConvertError> {
    match raw {
        Value::Null => Ok(None),
        Value::String(s) => Ok(empty_to_none(Some(s))),
        other => Err(ConvertError::type_mismatch("String", other)),
    }
}

/// Same rule as [`normalize_optional`] for callers that already hold an
/// `Option<&str>`.
pub fn empty_to_none(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Accept only the empty string. Used for columns that must be blank.
pub fn empty_string_to_none(raw: &Value) -> Result<(), ConvertError> {
    let s = require_str(raw)?;
    if s.is_empty() {
        Ok(())
    } else {
        Err(FormatError::new("empty string", s, "Value must be an empty string ''").into())
    }
}

// ---------------------------------------------------------------------------
// "1" / "0" flags
// ---------------------------------------------------------------------------

/// A boolean that reads and writes as `"1"` / `"0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringBool {
    True,
    False,
}

impl StringBool {
    pub fn as_bool(self) -> bool {
        matches!(self, StringBool::True)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StringBool::True => "1",
            StringBool::False => "0",
        }
    }
}

impl From<bool> for StringBool {
    fn from(value: bool) -> Self {
        if value {
            StringBool::True
        } else {
            StringBool::False
        }
    }
}

impl From<StringBool> for bool {
    fn from(value: StringBool) -> Self {
        value.as_bool()
    }
}

impl fmt::Display for StringBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StringBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StringBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_string_bool(&raw)
            .map_err(serde::de::Error::custom)?
            .ok_or_else(|| serde::de::Error::custom("Value must be '1' or '0'"))
    }
}

/// `"1"` → `True`, `"0"` → `False`, `""` → `None`.
pub fn parse_string_bool(s: &str) -> Result<Option<StringBool>, FormatError> {
    match s {
        "1" => Ok(Some(StringBool::True)),
        "0" => Ok(Some(StringBool::False)),
        "" => Ok(None),
        other => Err(FormatError::new(
            "flag",
            other,
            "Value must be '1', '0', or ''",
        )),
    }
}

/// Raw-value form of [`parse_string_bool`]; `null` is a type mismatch.
pub fn string_to_optional_bool(raw: &Value) -> Result<Option<StringBool>, ConvertError> {
    Ok(parse_string_bool(require_str(raw)?)?)
}
