//! Record validation engine.
//!
//! Named field rules loaded from JSON, compiled into a [`RuleSet`], and a
//! pure evaluator that coerces a record field by field and collects every
//! violation instead of stopping at the first one.

pub mod evaluator;
pub mod rule_set;
pub mod rules;

pub use evaluator::{evaluate_record, evaluate_records};
pub use rule_set::RuleSet;
pub use rules::{
    CoercedValue, FieldKind, FieldRule, FieldViolation, ValidationResult, ValidationSeverity,
};
