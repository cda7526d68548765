//! State threaded through the node tree while formatting and parsing.

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::chronology::{self, Chronology};
use crate::error::{FormatError, ResolveError};
use crate::field::{ChronoField, Field, WeekFields};
use crate::formatter::DateTimeFormatter;
use crate::locale::TextProvider;
use crate::options::DecimalStyle;
use crate::parsed::Parsed;
use crate::temporal::TemporalAccessor;
use crate::zone::Zone;

/// Formatting state: the value being printed and the optional-section depth.
pub(crate) struct FormatContext<'a> {
    temporal: &'a dyn TemporalAccessor,
    formatter: &'a DateTimeFormatter,
    optional: usize,
}

impl<'a> FormatContext<'a> {
    pub(crate) fn new(temporal: &'a dyn TemporalAccessor, formatter: &'a DateTimeFormatter) -> Self {
        FormatContext {
            temporal,
            formatter,
            optional: 0,
        }
    }

    pub(crate) fn temporal(&self) -> &'a dyn TemporalAccessor {
        self.temporal
    }

    pub(crate) fn provider(&self) -> &'a dyn TextProvider {
        self.formatter.provider()
    }

    pub(crate) fn decimal_style(&self) -> DecimalStyle {
        self.formatter.decimal_style()
    }

    pub(crate) fn week_fields(&self) -> WeekFields {
        self.formatter.provider().week_fields()
    }

    pub(crate) fn start_optional(&mut self) {
        self.optional += 1;
    }

    pub(crate) fn end_optional(&mut self) {
        self.optional = self.optional.saturating_sub(1);
    }

    /// The value of `field`. Inside an optional section a missing value is
    /// `Ok(None)`, outside it is an error.
    pub(crate) fn value(&self, field: &Field) -> Result<Option<i64>, FormatError> {
        match self.temporal.get_long(field) {
            Some(value) => Ok(Some(value)),
            None if self.optional > 0 => Ok(None),
            None => Err(FormatError::FieldUnavailable { field: field.clone() }),
        }
    }

    pub(crate) fn zone(&self) -> Result<Option<Zone>, FormatError> {
        match self.temporal.query_zone() {
            Some(zone) => Ok(Some(zone)),
            None if self.optional > 0 => Ok(None),
            None => Err(FormatError::ZoneUnavailable),
        }
    }

    pub(crate) fn chronology(&self) -> Result<Option<&'a dyn Chronology>, FormatError> {
        match self.temporal.query_chronology() {
            Some(chrono) => Ok(Some(chrono)),
            None if self.optional > 0 => Ok(None),
            None => Err(FormatError::ChronologyUnavailable),
        }
    }
}

/// Parsing state: the ambient settings and the values recorded so far.
pub(crate) struct ParseContext<'a> {
    formatter: &'a DateTimeFormatter,
    pub(crate) case_sensitive: bool,
    pub(crate) strict: bool,
    pub(crate) parsed: Parsed,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(formatter: &'a DateTimeFormatter) -> Self {
        ParseContext {
            formatter,
            case_sensitive: true,
            strict: true,
            parsed: Parsed::with_zone_rules(formatter.zone_rules_arc()),
        }
    }

    /// A context with the same settings and nothing parsed yet.
    pub(crate) fn fork(&self) -> ParseContext<'a> {
        ParseContext {
            case_sensitive: self.case_sensitive,
            strict: self.strict,
            ..ParseContext::new(self.formatter)
        }
    }

    pub(crate) fn formatter(&self) -> &'a DateTimeFormatter {
        self.formatter
    }

    pub(crate) fn provider(&self) -> &'a dyn TextProvider {
        self.formatter.provider()
    }

    pub(crate) fn decimal_style(&self) -> DecimalStyle {
        self.formatter.decimal_style()
    }

    pub(crate) fn week_fields(&self) -> WeekFields {
        self.formatter.provider().week_fields()
    }

    pub(crate) fn settings(&self) -> (bool, bool) {
        (self.case_sensitive, self.strict)
    }

    pub(crate) fn restore_settings(&mut self, (case_sensitive, strict): (bool, bool)) {
        self.case_sensitive = case_sensitive;
        self.strict = strict;
    }

    pub(crate) fn char_equals(&self, a: char, b: char) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            char_equals_ignore_case(a, b)
        }
    }

    /// Whether `literal` occurs in `text` at `position`.
    pub(crate) fn matches_at(&self, text: &[char], position: usize, literal: &str) -> bool {
        let mut pos = position;
        for expected in literal.chars() {
            match text.get(pos) {
                Some(&actual) if self.char_equals(actual, expected) => pos += 1,
                _ => return false,
            }
        }
        true
    }

    pub(crate) fn parsed_value(&self, field: impl Into<Field>) -> Option<i64> {
        self.parsed.field_values.get(field)
    }

    /// Records a parsed value. A different value already recorded for the
    /// field fails at `error_pos`.
    pub(crate) fn set_parsed_field(
        &mut self,
        field: impl Into<Field>,
        value: i64,
        error_pos: usize,
        success_pos: usize,
    ) -> Result<usize, usize> {
        match self.parsed.field_values.insert(field, value) {
            Some(previous) if previous != value => Err(error_pos),
            _ => Ok(success_pos),
        }
    }

    /// Records a parsed zone. A different zone already recorded fails at
    /// `error_pos`.
    pub(crate) fn set_parsed_zone(&mut self, zone: Zone, error_pos: usize, success_pos: usize) -> Result<usize, usize> {
        match &self.parsed.zone {
            Some(previous) if *previous != zone => Err(error_pos),
            _ => {
                self.parsed.zone = Some(zone);
                Ok(success_pos)
            }
        }
    }

    pub(crate) fn into_parsed(self) -> Parsed {
        self.parsed
    }
}

pub(crate) fn char_equals_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase()) || a.to_lowercase().eq(b.to_lowercase())
}

/// The value being formatted, viewed through the formatter's zone and
/// chronology overrides.
pub(crate) struct Adjusted<'a> {
    base: Base<'a>,
    zone: Option<Zone>,
    chronology: Option<&'a dyn Chronology>,
}

enum Base<'a> {
    Borrowed(&'a dyn TemporalAccessor),
    Converted(DateTime<FixedOffset>),
}

impl<'a> Adjusted<'a> {
    pub(crate) fn new(
        temporal: &'a dyn TemporalAccessor,
        formatter: &'a DateTimeFormatter,
    ) -> Result<Self, FormatError> {
        let mut chrono = formatter.chronology();
        let mut zone = formatter.zone().cloned();
        if let (Some(wanted), Some(actual)) = (chrono, temporal.query_chronology()) {
            if chronology::same_chronology(wanted, actual) {
                chrono = None;
            }
        }
        if zone.is_some() && zone == temporal.query_zone() {
            zone = None;
        }
        let instant = Field::Chrono(ChronoField::InstantSeconds);
        let base = match &zone {
            Some(zone) if temporal.is_supported(&instant) => {
                let seconds = temporal.get_long(&instant).ok_or(FormatError::FieldUnavailable {
                    field: instant.clone(),
                })?;
                let nanos = temporal
                    .get_long(&Field::Chrono(ChronoField::NanoOfSecond))
                    .unwrap_or(0);
                let nanos = ChronoField::NanoOfSecond.check_valid_int_value(nanos)?;
                let utc = DateTime::from_timestamp(seconds, nanos as u32)
                    .ok_or(ResolveError::Overflow {
                        operation: "instant conversion",
                    })?
                    .naive_utc();
                let offset = zone
                    .fixed_offset()
                    .or_else(|| formatter.zone_rules().offset_at(zone, utc))
                    .ok_or(FormatError::ZoneUnavailable)?;
                Base::Converted(offset.from_utc_datetime(&utc))
            }
            _ => Base::Borrowed(temporal),
        };
        Ok(Adjusted {
            base,
            zone,
            chronology: chrono,
        })
    }

    fn base(&self) -> &dyn TemporalAccessor {
        match &self.base {
            Base::Borrowed(temporal) => *temporal,
            Base::Converted(date_time) => date_time,
        }
    }
}

impl TemporalAccessor for Adjusted<'_> {
    fn is_supported(&self, field: &Field) -> bool {
        self.base().is_supported(field)
    }

    fn get_long(&self, field: &Field) -> Option<i64> {
        self.base().get_long(field)
    }

    fn query_date(&self) -> Option<chrono::NaiveDate> {
        self.base().query_date()
    }

    fn query_time(&self) -> Option<chrono::NaiveTime> {
        self.base().query_time()
    }

    fn query_zone(&self) -> Option<Zone> {
        self.zone.clone().or_else(|| self.base().query_zone())
    }

    fn query_chronology(&self) -> Option<&dyn Chronology> {
        self.chronology.or_else(|| self.base().query_chronology())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_equals_ignore_case() {
        assert!(char_equals_ignore_case('t', 'T'));
        assert!(char_equals_ignore_case('Z', 'z'));
        assert!(!char_equals_ignore_case('a', 'b'));
    }

    #[test]
    fn test_zone_override_converts_instant() {
        let formatter = DateTimeFormatter::iso_local_date_time()
            .with_zone(Some(Zone::offset_seconds(3600).unwrap()));
        let utc = FixedOffset::east_opt(0).unwrap();
        let value = utc.with_ymd_and_hms(2020, 1, 1, 23, 30, 0).unwrap();
        let adjusted = Adjusted::new(&value, &formatter).unwrap();
        assert_eq!(
            adjusted.query_date(),
            chrono::NaiveDate::from_ymd_opt(2020, 1, 2)
        );
        assert_eq!(adjusted.query_zone(), Zone::offset_seconds(3600));
    }

    #[test]
    fn test_matches_at() {
        let formatter = DateTimeFormatter::iso_local_date();
        let mut ctx = ParseContext::new(&formatter);
        let text: Vec<char> = "2020-Jan".chars().collect();
        assert!(ctx.matches_at(&text, 5, "Jan"));
        assert!(!ctx.matches_at(&text, 5, "JAN"));
        ctx.case_sensitive = false;
        assert!(ctx.matches_at(&text, 5, "JAN"));
        assert!(!ctx.matches_at(&text, 6, "Jan"));
    }
}
