//! Fixed-format date strings to `NaiveDateTime`.
//!
//! Only the date part is parsed; the time is always midnight.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Year given to month/day strings. 1904 is a leap year, so `02/29` is
/// accepted.
const PLACEHOLDER_YEAR: i32 = 1904;

/// Four-digit year, then one- or two-digit month and day.
static SLASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})/([0-9]{1,2})/([0-9]{1,2})$").expect("valid regex")
});

static MONTH_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})$").expect("valid regex"));

const SLASH_FORMAT: &str = "%Y/%m/%d";
const DIGITS_FORMAT: &str = "%Y%m%d";
const MONTH_DAY_FORMAT: &str = "%m/%d";

/// Supported date layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `YYYY/MM/DD`
    Slash,
    /// `YYYYMMDD`, exactly eight characters.
    EightDigits,
    /// `MM/DD`; the year of the result is a placeholder and carries no meaning.
    SlashMonthDay,
}

impl DateFormat {
    pub fn name(&self) -> &'static str {
        match self {
            DateFormat::Slash => "slash date",
            DateFormat::EightDigits => "eight-digit date",
            DateFormat::SlashMonthDay => "slash month/day",
        }
    }

    /// chrono format string used to render a parsed value back to text.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Slash => SLASH_FORMAT,
            DateFormat::EightDigits => DIGITS_FORMAT,
            DateFormat::SlashMonthDay => MONTH_DAY_FORMAT,
        }
    }

    pub fn parse(&self, input: &str) -> Result<NaiveDateTime, FormatError> {
        let date = match self {
            DateFormat::Slash => parse_slash(self.name(), input)?,
            DateFormat::EightDigits => parse_eight_digits(self.name(), input)?,
            DateFormat::SlashMonthDay => parse_month_day(self.name(), input)?,
        };
        Ok(date.and_time(chrono::NaiveTime::MIN))
    }

    pub fn format(&self, value: &NaiveDateTime) -> String {
        value.format(self.pattern()).to_string()
    }
}

fn parse_slash(name: &'static str, input: &str) -> Result<NaiveDate, FormatError> {
    let caps = SLASH_RE
        .captures(input)
        .ok_or_else(|| FormatError::new(name, input, "expected YYYY/MM/DD"))?;
    build_date(name, input, digits(&caps[1]) as i32, digits(&caps[2]), digits(&caps[3]))
}

fn parse_month_day(name: &'static str, input: &str) -> Result<NaiveDate, FormatError> {
    let caps = MONTH_DAY_RE
        .captures(input)
        .ok_or_else(|| FormatError::new(name, input, "expected MM/DD"))?;
    build_date(name, input, PLACEHOLDER_YEAR, digits(&caps[1]), digits(&caps[2]))
}

fn parse_eight_digits(name: &'static str, input: &str) -> Result<NaiveDate, FormatError> {
    if input.chars().count() != 8 {
        return Err(FormatError::new(name, input, "8 digits required"));
    }
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::new(name, input, "only digits allowed"));
    }
    let year = digits(&input[0..4]) as i32;
    build_date(name, input, year, digits(&input[4..6]), digits(&input[6..8]))
}

fn build_date(
    name: &'static str,
    input: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Result<NaiveDate, FormatError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FormatError::new(name, input, "month or day out of range"))
}

/// Value of a run of at most four ASCII digits.
fn digits(s: &str) -> u32 {
    s.bytes().fold(0, |n, b| n * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn slash_date() {
        assert_eq!(DateFormat::Slash.parse("2020/01/31"), Ok(ymd(2020, 1, 31)));
        assert_eq!(DateFormat::Slash.parse("2024/02/29"), Ok(ymd(2024, 2, 29)));
    }

    #[test]
    fn slash_date_rejects() {
        for input in ["2020-01-01", "2020/13/01", "2020/02/30", "2020/aa/01", "20200101", ""] {
            assert!(DateFormat::Slash.parse(input).is_err(), "{input:?} should fail");
        }
    }

    #[test]
    fn slash_date_requires_exact_digit_counts() {
        for input in [
            "020/01/01",
            "+2020/01/01",
            " 2020/01/01",
            "2020/01/01 ",
            "02020/01/01",
            "2020/001/01",
            "2020/01/001",
            "２０２０/01/01",
        ] {
            let err = DateFormat::Slash.parse(input).unwrap_err();
            assert_eq!(err.reason, "expected YYYY/MM/DD", "{input:?}");
        }
    }

    #[test]
    fn slash_date_single_digit_month_and_day() {
        assert_eq!(DateFormat::Slash.parse("2020/1/5"), Ok(ymd(2020, 1, 5)));
    }

    #[test]
    fn eight_digits() {
        assert_eq!(DateFormat::EightDigits.parse("20200131"), Ok(ymd(2020, 1, 31)));
    }

    #[test]
    fn eight_digits_length_precheck() {
        let err = DateFormat::EightDigits.parse("2020011").unwrap_err();
        assert_eq!(err.reason, "8 digits required");
        assert!(DateFormat::EightDigits.parse("202001011").is_err());
    }

    #[test]
    fn eight_digits_rejects() {
        for input in ["2020/1/1", "20201301", "20200230", "2020010a", "２０２００１０１"] {
            assert!(DateFormat::EightDigits.parse(input).is_err(), "{input:?} should fail");
        }
    }

    #[test]
    fn eight_digits_round_trip() {
        for input in ["20200101", "19991231", "20240229", "00010101"] {
            let parsed = DateFormat::EightDigits.parse(input).unwrap();
            assert_eq!(DateFormat::EightDigits.format(&parsed), input);
        }
    }

    #[test]
    fn month_day_uses_leap_placeholder() {
        let parsed = DateFormat::SlashMonthDay.parse("02/29").unwrap();
        assert_eq!(parsed, ymd(1904, 2, 29));
        assert_eq!(DateFormat::SlashMonthDay.format(&parsed), "02/29");
    }

    #[test]
    fn month_day_rejects() {
        for input in ["2020/01/01", "13/01", "01-01", "0101", "", " 1/1", "1/1 ", "+1/1", "001/01"] {
            assert!(DateFormat::SlashMonthDay.parse(input).is_err(), "{input:?} should fail");
        }
        assert_eq!(DateFormat::SlashMonthDay.parse("1/1"), Ok(ymd(1904, 1, 1)));
    }
}
