//! Compiled rule sets.
//!
//! Rules are checked and compiled once at load time: regex options are
//! compiled and duplicate field names are rejected.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use super::rules::{CoercedValue, FieldKind, FieldRule};
use crate::convert::Decoration;
use crate::error::{ConvertError, CoreError};
use crate::optional::{empty_string_to_none, normalize_optional, string_to_optional_bool};
use crate::rules::{DateRule, IntegerRule, OptionalStrRule, StringRule};

/// Ordered, compiled field rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    fields: Vec<CompiledField>,
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledField {
    pub(crate) rule: FieldRule,
    coercer: Coercer,
}

#[derive(Debug, Clone)]
enum Coercer {
    Integer(IntegerRule<Decoration>),
    String(StringRule),
    Text(OptionalStrRule),
    Date(DateRule),
    Flag,
    Blank,
}

impl RuleSet {
    pub fn new(rules: Vec<FieldRule>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(rules.len());
        for rule in rules {
            if !seen.insert(rule.field_name.clone()) {
                return Err(CoreError::InvalidConfig(format!(
                    "duplicate rule for field {:?}",
                    rule.field_name
                )));
            }
            let coercer = Coercer::compile(&rule.kind)?;
            fields.push(CompiledField { rule, coercer });
        }
        Ok(RuleSet { fields })
    }

    /// Parse a JSON array of [`FieldRule`]s.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let rules: Vec<FieldRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &FieldRule> {
        self.fields.iter().map(|f| &f.rule)
    }

    pub(crate) fn fields(&self) -> &[CompiledField] {
        &self.fields
    }
}

impl CompiledField {
    pub(crate) fn coerce(&self, raw: &Value) -> Result<CoercedValue, ConvertError> {
        self.coercer.coerce(raw, self.rule.optional)
    }
}

impl Coercer {
    fn compile(kind: &FieldKind) -> Result<Self, CoreError> {
        let coercer = match kind {
            FieldKind::Integer {
                decoration,
                constraints,
            } => Coercer::Integer(IntegerRule::new(*decoration).constrained(*constraints)),
            FieldKind::String { length, half_width } => {
                let rule = StringRule::new().length(*length);
                Coercer::String(if *half_width { rule.half_width() } else { rule })
            }
            FieldKind::Text {
                transform,
                length,
                regex,
            } => {
                let mut rule = OptionalStrRule::new().transform(*transform).length(*length);
                if let Some(pattern) = regex {
                    rule = rule.regex(pattern)?;
                }
                Coercer::Text(rule)
            }
            FieldKind::Date { format } => Coercer::Date(DateRule::new(*format)),
            FieldKind::Flag => Coercer::Flag,
            FieldKind::Blank => Coercer::Blank,
        };
        Ok(coercer)
    }

    fn coerce(&self, raw: &Value, optional: bool) -> Result<CoercedValue, ConvertError> {
        let value = match self {
            Coercer::Integer(rule) if optional => {
                rule.validate_optional(raw)?.map(CoercedValue::Integer)
            }
            Coercer::Integer(rule) => Some(CoercedValue::Integer(rule.validate(raw)?)),
            Coercer::String(rule) if optional => rule.validate_optional(raw)?.map(CoercedValue::String),
            Coercer::String(rule) => Some(CoercedValue::String(rule.validate(raw)?)),
            Coercer::Text(rule) => rule.validate(raw)?.map(CoercedValue::String),
            Coercer::Date(rule) if optional => match normalize_optional(raw)? {
                Some(s) => Some(CoercedValue::DateTime(rule.format().parse(s)?)),
                None => None,
            },
            Coercer::Date(rule) => Some(CoercedValue::DateTime(rule.validate(raw)?)),
            Coercer::Flag => string_to_optional_bool(raw)?.map(CoercedValue::Flag),
            Coercer::Blank => {
                empty_string_to_none(raw)?;
                None
            }
        };
        Ok(value.unwrap_or(CoercedValue::Null))
    }
}
