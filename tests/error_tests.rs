use chrono::{NaiveDate, NaiveTime};
use chronofmt::{
    BuildError, ChronoField, DateTimeFormatter, Field, FormatError, FormatterBuilder, ParseError, ResolveError,
    SignStyle, Zone,
};

#[test]
fn test_pattern_error_display() {
    let err = DateTimeFormatter::of_pattern("yyyy-MM-ddd").unwrap_err();
    assert!(matches!(err, BuildError::Pattern { position: 8, .. }));
    let msg = format!("{}", err);
    assert!(msg.contains("'yyyy-MM-ddd'"));
    assert!(msg.contains("position 8"));
}

#[test]
fn test_width_error_display() {
    let err = FormatterBuilder::new()
        .append_value_fixed(ChronoField::DayOfMonth, 20)
        .unwrap_err();
    assert!(matches!(err, BuildError::InvalidWidth { width: 20, .. }));
    assert!(err.to_string().contains("was 20"));
}

#[test]
fn test_field_unavailable() {
    let formatter = DateTimeFormatter::of_pattern("uuuu").unwrap();
    let err = formatter.format(&NaiveTime::from_hms_opt(10, 0, 0).unwrap()).unwrap_err();
    assert_eq!(
        err,
        FormatError::FieldUnavailable {
            field: Field::Chrono(ChronoField::Year)
        }
    );
    assert!(err.to_string().contains("Year"));
}

#[test]
fn test_value_exceeds_width() {
    let formatter = FormatterBuilder::new()
        .append_value_fixed(ChronoField::Year, 2)
        .unwrap()
        .to_formatter();
    let err = formatter.format(&NaiveDate::from_ymd_opt(2011, 1, 1).unwrap()).unwrap_err();
    assert!(matches!(err, FormatError::ExceedsWidth { value: 2011, max_width: 2, .. }));
}

#[test]
fn test_negative_value_rejected() {
    let formatter = FormatterBuilder::new()
        .append_value_with(ChronoField::Year, 1, 4, SignStyle::NotNegative)
        .unwrap()
        .to_formatter();
    let err = formatter.format(&NaiveDate::from_ymd_opt(-5, 1, 1).unwrap()).unwrap_err();
    assert!(matches!(err, FormatError::NegativeValue { value: -5, .. }));
    assert!(err.to_string().contains("cannot be negative"));
}

#[test]
fn test_parse_mismatch_index() {
    let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd").unwrap();
    let err = formatter.parse_date("2011/12/03").unwrap_err();
    assert!(matches!(err, ParseError::Mismatch { index: 4, .. }));
    assert_eq!(err.to_string(), "text '2011/12/03' could not be parsed at index 4");
}

#[test]
fn test_parse_unparsed_text() {
    let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd").unwrap();
    let err = formatter.parse_date("2011-12-03 and more").unwrap_err();
    assert!(matches!(err, ParseError::Unparsed { index: 10, .. }));
    assert!(err.to_string().contains("unparsed text found at index 10"));
}

#[test]
fn test_long_text_is_abbreviated() {
    let formatter = DateTimeFormatter::of_pattern("uuuu").unwrap();
    let text = format!("x{}", "0".repeat(100));
    let msg = formatter.parse_date(&text).unwrap_err().to_string();
    assert!(msg.contains("..."));
    assert!(msg.len() < text.len() + 20);
}

#[test]
fn test_resolve_error_is_source() {
    use std::error::Error;

    let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd").unwrap();
    let err = formatter.parse_date("2011-02-32").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Resolve {
            source: ResolveError::Range { value: 32, .. },
            ..
        }
    ));
    assert!(err.source().is_some());
}

#[test]
fn test_second_zone_must_agree() {
    let formatter = DateTimeFormatter::of_pattern("VV' 'VV").unwrap();
    let parsed = formatter.parse("UTC UTC").unwrap();
    assert_eq!(parsed.zone(), Some(&Zone::region("UTC")));

    let err = formatter.parse("UTC GMT").unwrap_err();
    assert!(matches!(err, ParseError::Mismatch { index: 4, .. }));
}
