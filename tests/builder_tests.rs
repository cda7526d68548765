//! Builder behaviour: padding, adjacent value parsing and optional sections.

use chrono::{NaiveDate, NaiveTime};
use chronofmt::{
    ChronoField, DateTimeFormatter, FormatError, FormatterBuilder, ParsePosition, ResolverStyle,
    SignStyle, TextStyle,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Padding
// ============================================================================

#[test]
fn test_pad_literal_char() {
    let formatter = FormatterBuilder::new()
        .pad_next_with(3, '-')
        .unwrap()
        .append_literal_char('Z')
        .to_formatter();
    assert_eq!(formatter.format(&date(2020, 1, 1)).unwrap(), "--Z");
}

#[test]
fn test_pad_too_narrow() {
    let formatter = FormatterBuilder::new()
        .pad_next(3)
        .unwrap()
        .append_literal("WXYZ")
        .to_formatter();
    assert_eq!(
        formatter.format(&date(2020, 1, 1)).unwrap_err(),
        FormatError::PadWidthExceeded { len: 4, width: 3 }
    );
}

#[test]
fn test_pad_parses_fill() {
    let formatter = FormatterBuilder::new()
        .pad_next_with(4, '*')
        .unwrap()
        .append_value(ChronoField::DayOfYear)
        .parse_defaulting(ChronoField::Year, 2020)
        .to_formatter();
    assert_eq!(formatter.format(&date(2020, 2, 1)).unwrap(), "**32");
    assert_eq!(formatter.parse_date("**32").unwrap(), date(2020, 2, 1));
}

#[test]
fn test_padded_value_then_fixed_values() {
    let formatter = FormatterBuilder::new()
        .pad_next(5)
        .unwrap()
        .append_value(ChronoField::Year)
        .append_value_fixed(ChronoField::MonthOfYear, 2)
        .unwrap()
        .append_value_fixed(ChronoField::DayOfMonth, 2)
        .unwrap()
        .to_formatter();
    assert_eq!(formatter.format(&date(2020, 7, 4)).unwrap(), " 20200704");
    assert_eq!(formatter.parse_date(" 20200704").unwrap(), date(2020, 7, 4));
}

// ============================================================================
// Adjacent values
// ============================================================================

fn yy_mm_dd(lenient: bool) -> DateTimeFormatter {
    let mut builder = FormatterBuilder::new();
    if lenient {
        builder.parse_lenient();
    }
    builder.append_pattern("yyMMdd").unwrap().to_formatter()
}

fn parse_unresolved(formatter: &DateTimeFormatter, text: &str) -> (usize, Option<i64>, Option<i64>, Option<i64>) {
    let mut position = ParsePosition::new(0);
    let parsed = formatter
        .parse_unresolved(text, &mut position)
        .expect("text should parse");
    let values = parsed.field_values();
    (
        position.index,
        values.get(ChronoField::YearOfEra),
        values.get(ChronoField::MonthOfYear),
        values.get(ChronoField::DayOfMonth),
    )
}

#[test]
fn test_adjacent_reduced_year_strict() {
    let formatter = yy_mm_dd(false);
    assert_eq!(parse_unresolved(&formatter, "990703"), (6, Some(2099), Some(7), Some(3)));
}

#[test]
fn test_adjacent_lenient_consumes_wide_year() {
    let formatter = yy_mm_dd(true);
    assert_eq!(parse_unresolved(&formatter, "19990703"), (8, Some(1999), Some(7), Some(3)));
}

#[test]
fn test_adjacent_strict_stops_at_pattern_width() {
    let formatter = yy_mm_dd(false);
    assert_eq!(parse_unresolved(&formatter, "19990703"), (6, Some(2019), Some(99), Some(7)));
}

#[test]
fn test_adjacent_value_with_fraction() {
    let formatter = FormatterBuilder::new()
        .append_value(ChronoField::HourOfDay)
        .append_value_fixed(ChronoField::MinuteOfHour, 2)
        .unwrap()
        .append_value_fixed(ChronoField::SecondOfMinute, 2)
        .unwrap()
        .append_fraction(ChronoField::NanoOfSecond, 3, 3, false)
        .unwrap()
        .to_formatter();
    let time = formatter.parse_time("93015250").unwrap();
    assert_eq!(time, NaiveTime::from_hms_milli_opt(9, 30, 15, 250).unwrap());
    assert_eq!(formatter.format(&time).unwrap(), "93015250");
}

// ============================================================================
// Sections and settings
// ============================================================================

#[test]
fn test_optional_section_skipped_when_absent() {
    let formatter = FormatterBuilder::new()
        .append_value_fixed(ChronoField::HourOfDay, 2)
        .unwrap()
        .optional_start()
        .append_literal_char(':')
        .append_value_fixed(ChronoField::MinuteOfHour, 2)
        .unwrap()
        .optional_end()
        .unwrap()
        .to_formatter();
    assert_eq!(formatter.parse_time("09").unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    assert_eq!(formatter.parse_time("09:45").unwrap(), NaiveTime::from_hms_opt(9, 45, 0).unwrap());
    assert!(formatter.parse_time("09:4").is_err());
}

#[test]
fn test_case_insensitive_text() {
    let formatter = FormatterBuilder::new()
        .parse_case_insensitive()
        .append_text(ChronoField::MonthOfYear, TextStyle::Short)
        .append_literal_char(' ')
        .append_value(ChronoField::DayOfMonth)
        .append_literal_char(' ')
        .append_value_with(ChronoField::Year, 4, 4, SignStyle::NotNegative)
        .unwrap()
        .to_formatter();
    assert_eq!(formatter.parse_date("mAr 5 2021").unwrap(), date(2021, 3, 5));
}

#[test]
fn test_case_sensitive_by_default() {
    let formatter = FormatterBuilder::new()
        .append_text(ChronoField::MonthOfYear, TextStyle::Short)
        .parse_defaulting(ChronoField::Year, 2021)
        .parse_defaulting(ChronoField::DayOfMonth, 1)
        .to_formatter();
    assert_eq!(formatter.parse_date("Mar").unwrap(), date(2021, 3, 1));
    assert!(formatter.parse_date("MAR").is_err());
}

#[test]
fn test_text_map() {
    let map = [(1, "one".to_string()), (2, "two".to_string())].into_iter().collect();
    let formatter = FormatterBuilder::new()
        .append_text_map(ChronoField::MonthOfYear, map)
        .to_formatter();
    assert_eq!(formatter.format(&date(2020, 2, 1)).unwrap(), "two");
    assert_eq!(formatter.format(&date(2020, 3, 1)).unwrap(), "3");
    let mut position = ParsePosition::new(0);
    let parsed = formatter.parse_unresolved("one", &mut position).unwrap();
    assert_eq!(parsed.field_values().get(ChronoField::MonthOfYear), Some(1));
}

#[test]
fn test_reduced_base_window() {
    let formatter = FormatterBuilder::new()
        .append_value_reduced(ChronoField::Year, 2, 2, 1950)
        .unwrap()
        .parse_defaulting(ChronoField::DayOfYear, 1)
        .to_formatter()
        .with_resolver_style(ResolverStyle::Strict);
    assert_eq!(formatter.format(&date(1975, 1, 1)).unwrap(), "75");
    assert_eq!(formatter.parse_date("49").unwrap(), date(2049, 1, 1));
    assert_eq!(formatter.parse_date("50").unwrap(), date(1950, 1, 1));
}
