//! Coercion rules for loosely-typed text.
//!
//! Turns strings such as `"1,000"`, `"1,000 円"`, `"\1,000"`, `"20200131"`
//! or `"1"` into integers, dates and flags, and checks numeric bounds,
//! lengths and character widths along the way.
//!
//! ```
//! use serde_json::json;
//! use typedstr_core::{comma_int, NumericConstraints};
//!
//! let rule = comma_int().constrained(NumericConstraints::new().multiple_of(5));
//! assert_eq!(rule.validate_optional(&json!("1,000")), Ok(Some(1000)));
//! assert_eq!(rule.validate_optional(&json!("")), Ok(None));
//! assert!(rule.validate_optional(&json!("1,001")).is_err());
//! ```

pub mod convert;
pub mod datetime;
pub mod de;
pub mod error;
pub mod hooks;
pub mod numeric;
pub mod optional;
pub mod rules;
pub mod text;
pub mod validation;

pub use convert::{
    BackslashYenPrefixed, CommaGrouped, Decoration, KanjiYenSuffixed, Plain, StringToInt,
};
pub use datetime::DateFormat;
pub use error::{ConstraintViolation, ConvertError, CoreError, FormatError};
pub use numeric::NumericConstraints;
pub use optional::{
    empty_string_to_none, normalize_optional, require_str, string_to_optional_bool, StringBool,
};
pub use rules::{
    comma_int, constrained_string, half_width_string, kanji_yen_int, string_to_int,
    symbol_yen_int, DateRule, IntegerRule, OptionalStrRule, StringRule,
};
pub use text::{check_half_width, LengthConstraints, TextTransform};
pub use validation::{evaluate_record, evaluate_records, RuleSet};
