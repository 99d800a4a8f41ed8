//! Record evaluator. Pure logic, no I/O.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::rule_set::{CompiledField, RuleSet};
use super::rules::{FieldViolation, ValidationResult, ValidationSeverity};
use crate::error::ConvertError;

/// Coerce every field of a single record. Missing fields are read as
/// `null`. Fields without a rule are ignored.
pub fn evaluate_record(rules: &RuleSet, data: &Map<String, Value>) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut values = BTreeMap::new();

    for field in rules.fields() {
        let name = &field.rule.field_name;
        let raw = data.get(name).unwrap_or(&Value::Null);
        match field.coerce(raw) {
            Ok(value) => {
                values.insert(name.clone(), value);
            }
            Err(err) => {
                tracing::debug!(
                    field = %name,
                    kind = err.kind(),
                    severity = ?field.rule.severity,
                    "field rejected: {err}"
                );
                let violation = violation(field, raw, &err);
                match field.rule.severity {
                    ValidationSeverity::Error => errors.push(violation),
                    ValidationSeverity::Warning => warnings.push(violation),
                }
            }
        }
    }

    tracing::trace!(
        fields = rules.len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "record evaluated"
    );

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        values,
    }
}

/// Evaluate independent records with the same rules.
pub fn evaluate_records<'a, I>(rules: &RuleSet, records: I) -> Vec<ValidationResult>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    records
        .into_iter()
        .map(|record| evaluate_record(rules, record))
        .collect()
}

fn violation(field: &CompiledField, raw: &Value, err: &ConvertError) -> FieldViolation {
    let bound = match err {
        ConvertError::Constraint(c) => Some(c.bound().to_string()),
        _ => None,
    };
    FieldViolation {
        field: field.rule.field_name.clone(),
        rule_type: err.kind().to_string(),
        bound,
        message: field
            .rule
            .error_message
            .clone()
            .unwrap_or_else(|| err.to_string()),
        value: (!raw.is_null()).then(|| raw.clone()),
    }
}
