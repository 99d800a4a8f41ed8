//! Custom functions for `validator`'s `#[validate(custom(...))]`.
//!
//! These check that a string field would coerce cleanly without changing
//! the field's type. The error code is the [`ConvertError::kind`] and the
//! message is the rule's own message.
//!
//! ```
//! use validator::Validate;
//!
//! #[derive(Validate)]
//! struct Signup {
//!     #[validate(custom(function = "typedstr_core::hooks::half_width"))]
//!     login: String,
//! }
//!
//! assert!(Signup { login: "taro".into() }.validate().is_ok());
//! assert!(Signup { login: "たろう".into() }.validate().is_err());
//! ```

use std::borrow::Cow;

use serde_json::Value;
use validator::ValidationError;

use crate::convert::{BackslashYenPrefixed, CommaGrouped, KanjiYenSuffixed, Plain, StringToInt};
use crate::datetime::DateFormat;
use crate::error::ConvertError;
use crate::optional::parse_string_bool;
use crate::text::check_half_width;

fn to_validation_error(value: &str, err: ConvertError) -> ValidationError {
    let mut out = ValidationError::new(err.kind());
    out.message = Some(Cow::Owned(err.to_string()));
    out.add_param(Cow::Borrowed("value"), &value);
    if let ConvertError::Constraint(c) = &err {
        out.add_param(Cow::Borrowed("bound"), &c.bound());
    }
    out
}

fn check<T, E>(value: &str, result: Result<T, E>) -> Result<(), ValidationError>
where
    E: Into<ConvertError>,
{
    result
        .map(|_| ())
        .map_err(|e| to_validation_error(value, e.into()))
}

pub fn half_width(value: &str) -> Result<(), ValidationError> {
    check(value, check_half_width(value))
}

pub fn plain_int(value: &str) -> Result<(), ValidationError> {
    check(value, Plain.convert(value))
}

pub fn comma_int(value: &str) -> Result<(), ValidationError> {
    check(value, CommaGrouped.convert(value))
}

pub fn kanji_yen_int(value: &str) -> Result<(), ValidationError> {
    check(value, KanjiYenSuffixed.convert(value))
}

pub fn symbol_yen_int(value: &str) -> Result<(), ValidationError> {
    check(value, BackslashYenPrefixed.convert(value))
}

pub fn slash_date(value: &str) -> Result<(), ValidationError> {
    check(value, DateFormat::Slash.parse(value))
}

pub fn eight_digit_date(value: &str) -> Result<(), ValidationError> {
    check(value, DateFormat::EightDigits.parse(value))
}

pub fn month_day_date(value: &str) -> Result<(), ValidationError> {
    check(value, DateFormat::SlashMonthDay.parse(value))
}

/// `"1"`, `"0"` or `""`.
pub fn flag(value: &str) -> Result<(), ValidationError> {
    check(value, parse_string_bool(value))
}

/// Map a rule failure on a raw value into a `ValidationError`, for hosts
/// that run the rules themselves.
pub fn from_convert_error(raw: &Value, err: ConvertError) -> ValidationError {
    match raw.as_str() {
        Some(s) => to_validation_error(s, err),
        None => to_validation_error(&raw.to_string(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(custom(function = "crate::hooks::half_width"))]
        code: String,
        #[validate(custom(function = "crate::hooks::comma_int"))]
        amount: String,
        #[validate(custom(function = "crate::hooks::flag"))]
        active: String,
    }

    fn form(code: &str, amount: &str, active: &str) -> Form {
        Form {
            code: code.to_string(),
            amount: amount.to_string(),
            active: active.to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(form("ABC", "1,000", "1").validate().is_ok());
        assert!(form("ｱｲｳ", "-5", "").validate().is_ok());
    }

    #[test]
    fn each_field_reports_its_error() {
        let errors = form("ＡＢＣ", "1.5", "yes").validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["code"][0].code, "constraint");
        assert_eq!(fields["amount"][0].code, "format");
        assert_eq!(fields["active"][0].code, "format");
    }

    #[test]
    fn error_carries_message_and_params() {
        let err = kanji_yen_int("1,000").unwrap_err();
        assert_eq!(err.code, "format");
        assert!(err.message.as_deref().unwrap_or_default().contains("円"));
        assert_eq!(err.params["value"], json!("1,000"));
    }

    #[test]
    fn constraint_errors_name_the_bound() {
        let err = half_width("漢字").unwrap_err();
        assert_eq!(err.params["bound"], json!("half_width"));
    }

    #[test]
    fn date_hooks() {
        assert!(slash_date("2020/01/01").is_ok());
        assert!(eight_digit_date("20200101").is_ok());
        assert!(month_day_date("02/29").is_ok());
        assert!(eight_digit_date("2020/1/1").is_err());
    }

    #[test]
    fn yen_and_plain_hooks() {
        assert!(symbol_yen_int(r"\1,000").is_ok());
        assert!(symbol_yen_int("1,000").is_err());
        assert!(plain_int("42").is_ok());
        assert!(plain_int("4 2").is_err());
    }

    #[test]
    fn non_string_raw_values() {
        let raw = json!(12);
        let err = from_convert_error(&raw, ConvertError::type_mismatch("String", &raw));
        assert_eq!(err.code, "type_mismatch");
        assert_eq!(err.params["value"], json!("12"));
    }
}
