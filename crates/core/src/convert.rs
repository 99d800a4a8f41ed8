//! String-to-integer converters.
//!
//! Each converter strips one kind of decoration (digit-grouping commas, a
//! `円` suffix, a backslash yen prefix) and parses what is left as a
//! base-10 `i64`. Converters are strategies plugged into
//! [`IntegerRule`](crate::rules::IntegerRule).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

static PLAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+$").expect("valid regex"));

/// Digits and grouping commas followed by at most one space and `円`.
static KANJI_YEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9,]+) ?円$").expect("valid regex"));

/// First backslash followed by an amount. `.` is captured so that decimal
/// amounts fail the integer parse instead of being silently truncated.
static BACKSLASH_YEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([0-9,.]+)").expect("valid regex"));

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Convert a string to an integer, failing with [`FormatError`] when the
/// string does not have the expected shape.
///
/// Any `Fn(&str) -> Result<i64, FormatError>` is a converter too.
pub trait StringToInt {
    fn convert(&self, input: &str) -> Result<i64, FormatError>;
}

impl<F> StringToInt for F
where
    F: Fn(&str) -> Result<i64, FormatError>,
{
    fn convert(&self, input: &str) -> Result<i64, FormatError> {
        self(input)
    }
}

/// Optional leading `-` and ASCII digits, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl StringToInt for Plain {
    fn convert(&self, input: &str) -> Result<i64, FormatError> {
        parse_integer("integer", input, input)
    }
}

/// Digits with grouping commas in any position: `"1,000,000"`, `"1,23"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaGrouped;

impl StringToInt for CommaGrouped {
    fn convert(&self, input: &str) -> Result<i64, FormatError> {
        parse_integer("comma-grouped integer", input, &strip_commas(input))
    }
}

/// A whole-string amount with a kanji yen suffix: `"1,000 円"`, `"1000円"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KanjiYenSuffixed;

impl StringToInt for KanjiYenSuffixed {
    fn convert(&self, input: &str) -> Result<i64, FormatError> {
        const NAME: &str = "kanji yen amount";
        let caps = KANJI_YEN_RE
            .captures(input)
            .ok_or_else(|| FormatError::new(NAME, input, "expected digits followed by 円"))?;
        parse_integer(NAME, input, &strip_commas(&caps[1]))
    }
}

/// A backslash yen amount found anywhere in the string: `"\1,000"`.
///
/// The search is loose. Text before and after the amount is
/// ignored and only the first `\<amount>` run is used, so `" \1"` gives 1
/// and `"\1,000,000 \1,000,000"` gives 1000000.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackslashYenPrefixed;

impl StringToInt for BackslashYenPrefixed {
    fn convert(&self, input: &str) -> Result<i64, FormatError> {
        const NAME: &str = "symbol yen amount";
        let caps = BACKSLASH_YEN_RE
            .captures(input)
            .ok_or_else(|| FormatError::new(NAME, input, "expected \\ followed by digits"))?;
        parse_integer(NAME, input, &strip_commas(&caps[1]))
    }
}

// ---------------------------------------------------------------------------
// Configurable selection
// ---------------------------------------------------------------------------

/// Converter chosen by name, for rules built from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    #[default]
    None,
    Comma,
    KanjiYen,
    SymbolYen,
}

impl StringToInt for Decoration {
    fn convert(&self, input: &str) -> Result<i64, FormatError> {
        match self {
            Decoration::None => Plain.convert(input),
            Decoration::Comma => CommaGrouped.convert(input),
            Decoration::KanjiYen => KanjiYenSuffixed.convert(input),
            Decoration::SymbolYen => BackslashYenPrefixed.convert(input),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn strip_commas(s: &str) -> String {
    s.replace(',', "")
}

/// Parse `digits` as a base-10 integer; `input` is the original text
/// reported on failure.
fn parse_integer(converter: &'static str, input: &str, digits: &str) -> Result<i64, FormatError> {
    if !PLAIN_RE.is_match(digits) {
        return Err(FormatError::new(
            converter,
            input,
            format!("{digits:?} is not a base-10 integer"),
        ));
    }
    digits
        .parse::<i64>()
        .map_err(|e| FormatError::new(converter, input, e.to_string()))
}
