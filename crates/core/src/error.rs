//! Error types.
//!
//! [`ConvertError`] is the per-value taxonomy returned by every rule:
//! a type mismatch, a lexical format error, or a constraint violation.
//! [`CoreError`] covers failures while building rules from configuration.

use serde_json::Value;

/// Failure to build or load a rule.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Malformed rule set: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read rule set: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to coerce a single raw value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("{expected} required. Value is {value}. Type is {found}.")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        value: String,
    },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),
}

impl ConvertError {
    /// Build a type mismatch from the offending raw value.
    pub fn type_mismatch(expected: &'static str, raw: &Value) -> Self {
        ConvertError::TypeMismatch {
            expected,
            found: value_kind(raw),
            value: raw.to_string(),
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::TypeMismatch { .. } => "type_mismatch",
            ConvertError::Format(_) => "format",
            ConvertError::Constraint(_) => "constraint",
        }
    }
}

/// A string that does not match the lexical pattern of its converter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {converter} input {input:?}: {reason}")]
pub struct FormatError {
    pub converter: &'static str,
    pub input: String,
    pub reason: String,
}

impl FormatError {
    pub fn new(converter: &'static str, input: &str, reason: impl Into<String>) -> Self {
        FormatError {
            converter,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// A successfully parsed value that fails a declared bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintViolation {
    #[error("Input should be greater than {limit}, got {value}")]
    Gt { limit: i64, value: i64 },

    #[error("Input should be greater than or equal to {limit}, got {value}")]
    Ge { limit: i64, value: i64 },

    #[error("Input should be less than {limit}, got {value}")]
    Lt { limit: i64, value: i64 },

    #[error("Input should be less than or equal to {limit}, got {value}")]
    Le { limit: i64, value: i64 },

    #[error("Input should be a multiple of {limit}, got {value}")]
    MultipleOf { limit: i64, value: i64 },

    #[error("String length must be equal to {limit}, got {length}")]
    EqualLength { limit: usize, length: usize },

    #[error("String length must be at least {limit}, got {length}")]
    MinLength { limit: usize, length: usize },

    #[error("String length must be at most {limit}, got {length}")]
    MaxLength { limit: usize, length: usize },

    #[error("Must contain only half-width characters. Found {ch:?} at position {index}")]
    NotHalfWidth { ch: char, index: usize },

    #[error("String does not match pattern {pattern}")]
    Pattern { pattern: String, value: String },
}

impl ConstraintViolation {
    /// Name of the bound that failed, matching the option name used to set it.
    pub fn bound(&self) -> &'static str {
        match self {
            ConstraintViolation::Gt { .. } => "gt",
            ConstraintViolation::Ge { .. } => "ge",
            ConstraintViolation::Lt { .. } => "lt",
            ConstraintViolation::Le { .. } => "le",
            ConstraintViolation::MultipleOf { .. } => "multiple_of",
            ConstraintViolation::EqualLength { .. } => "equal_to",
            ConstraintViolation::MinLength { .. } => "min_length",
            ConstraintViolation::MaxLength { .. } => "max_length",
            ConstraintViolation::NotHalfWidth { .. } => "half_width",
            ConstraintViolation::Pattern { .. } => "regex",
        }
    }
}

/// Short name for the JSON type of a raw value.
pub fn value_kind(raw: &Value) -> &'static str {
    match raw {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
