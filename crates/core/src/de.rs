//! serde adapters for `#[serde(deserialize_with = "...")]`.
//!
//! Each function reads the field as a raw JSON-like value and runs the
//! matching unconstrained rule, reporting failures through
//! `serde::de::Error::custom`. The input format must be self-describing.
//! Optional adapters still need `#[serde(default)]` on the field if the key
//! may be absent.
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Row {
//!     #[serde(deserialize_with = "typedstr_core::de::comma_int")]
//!     amount: i64,
//!     #[serde(default, deserialize_with = "typedstr_core::de::optional_flag")]
//!     active: Option<typedstr_core::StringBool>,
//! }
//!
//! let row: Row = serde_json::from_str(r#"{"amount": "1,000", "active": "1"}"#).unwrap();
//! assert_eq!(row.amount, 1000);
//! assert!(row.active.unwrap().as_bool());
//! ```

use chrono::NaiveDateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::datetime::DateFormat;
use crate::error::ConvertError;
use crate::optional::{self, StringBool};
use crate::rules::{self, DateRule, OptionalStrRule};

fn hook<'de, D, T, F>(deserializer: D, rule: F) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    F: FnOnce(&Value) -> Result<T, ConvertError>,
{
    let raw = Value::deserialize(deserializer)?;
    rule(&raw).map_err(D::Error::custom)
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

pub fn plain_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    hook(deserializer, |raw| rules::string_to_int().validate(raw))
}

pub fn optional_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    hook(deserializer, |raw| rules::string_to_int().validate_optional(raw))
}

pub fn comma_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    hook(deserializer, |raw| rules::comma_int().validate(raw))
}

pub fn optional_comma_int<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    hook(deserializer, |raw| rules::comma_int().validate_optional(raw))
}

pub fn kanji_yen_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    hook(deserializer, |raw| rules::kanji_yen_int().validate(raw))
}

pub fn symbol_yen_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    hook(deserializer, |raw| rules::symbol_yen_int().validate(raw))
}

// ---------------------------------------------------------------------------
// Strings and flags
// ---------------------------------------------------------------------------

pub fn half_width<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    hook(deserializer, |raw| rules::half_width_string().validate(raw))
}

pub fn optional_half_width<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    hook(deserializer, |raw| rules::half_width_string().validate_optional(raw))
}

/// `""` → `None`; `null` is rejected.
pub fn optional_str<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    hook(deserializer, |raw| OptionalStrRule::new().validate(raw))
}

pub fn optional_flag<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<StringBool>, D::Error> {
    hook(deserializer, optional::string_to_optional_bool)
}

/// Accepts only `""`.
pub fn blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<()>, D::Error> {
    hook(deserializer, |raw| optional::empty_string_to_none(raw).map(|()| None))
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

pub fn slash_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    hook(deserializer, |raw| DateRule::new(DateFormat::Slash).validate(raw))
}

pub fn eight_digit_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    hook(deserializer, |raw| DateRule::new(DateFormat::EightDigits).validate(raw))
}

pub fn month_day_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    hook(deserializer, |raw| DateRule::new(DateFormat::SlashMonthDay).validate(raw))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use crate::optional::StringBool;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::comma_int")]
        amount: i64,
        #[serde(deserialize_with = "super::kanji_yen_int")]
        price: i64,
        #[serde(deserialize_with = "super::symbol_yen_int")]
        fee: i64,
        #[serde(default, deserialize_with = "super::optional_int")]
        count: Option<i64>,
        #[serde(deserialize_with = "super::half_width")]
        code: String,
        #[serde(default, deserialize_with = "super::optional_flag")]
        active: Option<StringBool>,
        #[serde(deserialize_with = "super::eight_digit_date")]
        since: chrono::NaiveDateTime,
    }

    fn row() -> serde_json::Value {
        json!({
            "amount": "1,000,000",
            "price": "1,000 円",
            "fee": r"\500",
            "count": "",
            "code": "ｱｲｳ",
            "active": "0",
            "since": "20200131"
        })
    }

    #[test]
    fn deserializes_decorated_fields() {
        let row: Row = serde_json::from_value(row()).unwrap();
        assert_eq!(row.amount, 1_000_000);
        assert_eq!(row.price, 1000);
        assert_eq!(row.fee, 500);
        assert_eq!(row.count, None);
        assert_eq!(row.code, "ｱｲｳ");
        assert_eq!(row.active, Some(StringBool::False));
        assert_eq!(row.since.format("%Y%m%d").to_string(), "20200131");
    }

    #[test]
    fn absent_optional_defaults() {
        let mut value = row();
        value.as_object_mut().unwrap().remove("count");
        value.as_object_mut().unwrap().remove("active");
        let row: Row = serde_json::from_value(value).unwrap();
        assert_eq!(row.count, None);
        assert_eq!(row.active, None);
    }

    #[test]
    fn reports_rule_message() {
        let mut value = row();
        value["amount"] = json!("1,000,000.0");
        let err = serde_json::from_value::<Row>(value).unwrap_err();
        assert!(err.to_string().contains("comma-grouped integer"), "{err}");

        let mut value = row();
        value["code"] = json!("アイウ");
        let err = serde_json::from_value::<Row>(value).unwrap_err();
        assert!(err.to_string().contains("half-width"), "{err}");
    }

    #[test]
    fn rejects_non_string_input() {
        let mut value = row();
        value["amount"] = json!(1000);
        let err = serde_json::from_value::<Row>(value).unwrap_err();
        assert!(err.to_string().contains("String required"), "{err}");
    }

    #[derive(Debug, Deserialize)]
    struct Blanks {
        #[serde(deserialize_with = "super::blank")]
        reserved: Option<()>,
        #[serde(deserialize_with = "super::optional_str")]
        memo: Option<String>,
        #[serde(deserialize_with = "super::month_day_date")]
        birthday: chrono::NaiveDateTime,
    }

    #[test]
    fn blank_and_optional_str() {
        let b: Blanks =
            serde_json::from_value(json!({"reserved": "", "memo": "", "birthday": "12/24"})).unwrap();
        assert_eq!(b.reserved, None);
        assert_eq!(b.memo, None);
        assert!(serde_json::from_value::<Blanks>(
            json!({"reserved": "x", "memo": "", "birthday": "12/24"})
        )
        .is_err());
        assert!(serde_json::from_value::<Blanks>(
            json!({"reserved": "", "memo": null, "birthday": "12/24"})
        )
        .is_err());
    }
}
