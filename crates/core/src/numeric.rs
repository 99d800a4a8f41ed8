//! Numeric constraint evaluation.
//!
//! Reusable interval and multiple-of checks applied to integers after they
//! have been converted from strings.

use serde::{Deserialize, Serialize};

use crate::error::ConstraintViolation;

/// Optional bounds over an integer. Every field is independent; an unset
/// field is not checked.
///
/// Consistency between the lower and upper bounds is not enforced. A set
/// such as `gt = 10, lt = 5` is accepted and simply rejects every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumericConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub le: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<i64>,
}

impl NumericConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gt(mut self, limit: i64) -> Self {
        self.gt = Some(limit);
        self
    }

    pub fn ge(mut self, limit: i64) -> Self {
        self.ge = Some(limit);
        self
    }

    pub fn lt(mut self, limit: i64) -> Self {
        self.lt = Some(limit);
        self
    }

    pub fn le(mut self, limit: i64) -> Self {
        self.le = Some(limit);
        self
    }

    pub fn multiple_of(mut self, limit: i64) -> Self {
        self.multiple_of = Some(limit);
        self
    }

    /// Check `value` against every bound that is set.
    ///
    /// Bounds are checked in the order gt, ge, lt, le, multiple_of and the
    /// first failure is returned. On success the value is returned unchanged.
    pub fn check(&self, value: i64) -> Result<i64, ConstraintViolation> {
        if let Some(limit) = self.gt {
            if value <= limit {
                return Err(ConstraintViolation::Gt { limit, value });
            }
        }
        if let Some(limit) = self.ge {
            if value < limit {
                return Err(ConstraintViolation::Ge { limit, value });
            }
        }
        if let Some(limit) = self.lt {
            if value >= limit {
                return Err(ConstraintViolation::Lt { limit, value });
            }
        }
        if let Some(limit) = self.le {
            if value > limit {
                return Err(ConstraintViolation::Le { limit, value });
            }
        }
        if let Some(limit) = self.multiple_of {
            if !is_multiple(value, limit) {
                return Err(ConstraintViolation::MultipleOf { limit, value });
            }
        }
        Ok(value)
    }
}

/// `value % divisor == 0` without panicking on a zero divisor or on
/// `i64::MIN % -1`. A zero divisor has no multiples.
fn is_multiple(value: i64, divisor: i64) -> bool {
    match divisor {
        0 => false,
        -1 | 1 => true,
        d => value % d == 0,
    }
}
