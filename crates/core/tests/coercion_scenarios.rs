//! End-to-end coercion scenarios through the public API.
//!
//! Each test drives raw JSON values through a rule the way a host would and
//! checks both the coerced value and the error kind on failure.

use assert_matches::assert_matches;
use serde_json::{json, Value};

use typedstr_core::{
    comma_int, constrained_string, half_width_string, kanji_yen_int, normalize_optional,
    string_to_int, symbol_yen_int, ConstraintViolation, ConvertError, DateFormat,
    LengthConstraints, NumericConstraints, RuleSet,
};

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

/// Only `gt` set: a value passes exactly when it is strictly greater.
#[test]
fn gt_only_accepts_strictly_greater() {
    for g in [-10_i64, 0, 7] {
        let rule = string_to_int().constrained(NumericConstraints::new().gt(g));
        for v in (g - 3)..(g + 3) {
            let result = rule.validate(&json!(v.to_string()));
            assert_eq!(result.is_ok(), v > g, "gt={g} v={v}");
        }
    }
}

#[test]
fn comma_grouped_amounts() {
    assert_eq!(comma_int().validate(&json!("1,000,000")), Ok(1_000_000));
    assert_matches!(
        comma_int().validate(&json!("1,000,000.0")),
        Err(ConvertError::Format(_))
    );
}

#[test]
fn kanji_yen_amounts() {
    assert_eq!(kanji_yen_int().validate(&json!("1,000 円")), Ok(1000));
    assert_matches!(
        kanji_yen_int().validate(&json!("1000000")),
        Err(ConvertError::Format(_))
    );
}

/// The backslash yen rule takes the first amount it finds and ignores the
/// rest of the string.
#[test]
fn symbol_yen_first_match_wins() {
    assert_eq!(symbol_yen_int().validate(&json!(r" \1")), Ok(1));
    assert_eq!(
        symbol_yen_int().validate(&json!(r"\1,000,000 \1,000,000")),
        Ok(1_000_000)
    );
    assert_matches!(symbol_yen_int().validate(&json!("¥1")), Err(ConvertError::Format(_)));
}

#[test]
fn optional_integer_scenarios() {
    let rule = string_to_int().constrained(NumericConstraints::new().multiple_of(5));
    assert_eq!(rule.validate_optional(&json!("")), Ok(None));
    assert_eq!(rule.validate_optional(&Value::Null), Ok(None));
    assert_eq!(rule.validate_optional(&json!("5")), Ok(Some(5)));
    assert_matches!(
        rule.validate_optional(&json!("7")),
        Err(ConvertError::Constraint(ConstraintViolation::MultipleOf { limit: 5, value: 7 }))
    );
}

#[test]
fn non_string_inputs_are_type_mismatches() {
    for raw in [json!(1), json!(1.0), json!([]), json!({}), json!(true)] {
        assert_matches!(
            comma_int().validate_optional(&raw),
            Err(ConvertError::TypeMismatch { .. })
        );
        assert_matches!(
            kanji_yen_int().validate(&raw),
            Err(ConvertError::TypeMismatch { .. })
        );
    }
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

#[test]
fn half_width_katakana() {
    assert!(half_width_string().validate(&json!("ｱｲｳｴｵ")).is_ok());
    assert_matches!(
        half_width_string().validate(&json!("アイウエオ")),
        Err(ConvertError::Constraint(ConstraintViolation::NotHalfWidth { index: 0, .. }))
    );
}

#[test]
fn exact_length() {
    let rule = constrained_string(LengthConstraints::new().equal_to(4));
    assert!(rule.validate(&json!("abcd")).is_ok());
    assert_matches!(
        rule.validate(&json!("abc")),
        Err(ConvertError::Constraint(ConstraintViolation::EqualLength { .. }))
    );
}

#[test]
fn normalizer_is_idempotent() {
    for raw in [Value::Null, json!(""), json!("abc")] {
        let first = normalize_optional(&raw).unwrap().map(str::to_string);
        let fed_back = first.clone().map_or(Value::Null, Value::String);
        let second = normalize_optional(&fed_back).unwrap().map(str::to_string);
        assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

#[test]
fn eight_digit_dates_round_trip() {
    for input in ["20200101", "20241231", "19040229"] {
        let parsed = DateFormat::EightDigits.parse(input).unwrap();
        assert_eq!(DateFormat::EightDigits.format(&parsed), input);
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A rule set loaded from JSON coerces a CSV-style row and reports every
/// failing field.
#[test]
fn rule_set_on_a_row() {
    let rules = RuleSet::from_json(
        r#"[
            {"field_name": "amount", "type": "integer", "decoration": "comma",
             "constraints": {"ge": 0}},
            {"field_name": "fee", "type": "integer", "decoration": "symbol_yen", "optional": true},
            {"field_name": "kana", "type": "string", "half_width": true},
            {"field_name": "posted", "type": "date", "format": "slash"},
            {"field_name": "settled", "type": "flag"}
        ]"#,
    )
    .unwrap();

    let good = json!({
        "amount": "12,345",
        "fee": "",
        "kana": "ｶﾀｶﾅ",
        "posted": "2024/03/31",
        "settled": "1"
    });
    let result = typedstr_core::evaluate_record(&rules, good.as_object().unwrap());
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(result.values.len(), 5);

    let bad = json!({
        "amount": "-1",
        "fee": r"\1.5",
        "kana": "カタカナ",
        "posted": "2024-03-31",
        "settled": "true"
    });
    let result = typedstr_core::evaluate_record(&rules, bad.as_object().unwrap());
    assert!(!result.is_valid);
    let failed: Vec<_> = result.errors.iter().map(|v| v.field.as_str()).collect();
    assert_eq!(failed, ["amount", "fee", "kana", "posted", "settled"]);
    assert_eq!(result.errors[0].bound.as_deref(), Some("ge"));
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

/// Rules are immutable values that can be shared across threads.
#[test]
fn rules_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<typedstr_core::IntegerRule<typedstr_core::Decoration>>();
    assert_send_sync::<typedstr_core::OptionalStrRule>();
    assert_send_sync::<RuleSet>();

    let rule = comma_int().constrained(NumericConstraints::new().ge(0));
    std::thread::scope(|s| {
        for n in 0..4_i64 {
            let rule = &rule;
            s.spawn(move || {
                assert_eq!(rule.validate(&json!(format!("{n},000"))), Ok(n * 1000));
            });
        }
    });
}
