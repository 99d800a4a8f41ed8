//! Field rule configuration and result types.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::convert::Decoration;
use crate::datetime::DateFormat;
use crate::numeric::NumericConstraints;
use crate::optional::StringBool;
use crate::text::{LengthConstraints, TextTransform};

/// How one named field of a record is coerced and checked.
///
/// ```json
/// { "field_name": "price", "type": "integer", "decoration": "comma",
///   "constraints": { "gt": 0 }, "optional": true }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRule {
    pub field_name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Accept `null` / `""` as "no value". Ignored by kinds that already
    /// define their own empty handling (`text`, `flag`, `blank`).
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub severity: ValidationSeverity,
    /// Replaces the generated message in reported violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// The coercion a field goes through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Integer {
        #[serde(default)]
        decoration: Decoration,
        #[serde(default)]
        constraints: NumericConstraints,
    },
    String {
        #[serde(default)]
        length: LengthConstraints,
        #[serde(default)]
        half_width: bool,
    },
    /// Transforming optional string; `null` is rejected, `""` is no value.
    Text {
        #[serde(default)]
        transform: TextTransform,
        #[serde(default)]
        length: LengthConstraints,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex: Option<String>,
    },
    Date {
        format: DateFormat,
    },
    /// `"1"` / `"0"` / `""`.
    Flag,
    /// Only `""` is accepted.
    Blank,
}

/// Whether a rule violation blocks the record or is informational.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    #[default]
    Error,
    Warning,
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CoercedValue {
    Integer(i64),
    String(String),
    Flag(StringBool),
    DateTime(NaiveDateTime),
    Null,
}

/// Aggregated result of evaluating all rules against one record.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
    pub warnings: Vec<FieldViolation>,
    /// Coerced values of the fields that passed.
    pub values: BTreeMap<String, CoercedValue>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    /// Error kind: `type_mismatch`, `format` or `constraint`.
    pub rule_type: String,
    /// Name of the failed bound for constraint violations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}
