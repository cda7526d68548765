//! The immutable formatter and its format and parse entry points.

mod composite;
mod context;
mod instant;
mod number;
mod offset;
mod predefined;
mod text;
mod zone;

pub(crate) use context::{FormatContext, ParseContext};

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::ast::Composite;
use crate::builder::compile_pattern;
use crate::chronology::{Chronology, IsoChronology};
use crate::error::{BuildError, FormatError, ParseError};
use crate::field::{ChronoField, Field};
use crate::locale::{Locale, TextProvider};
use crate::options::{DecimalStyle, ResolverStyle};
use crate::parsed::Parsed;
use crate::temporal::TemporalAccessor;
use crate::zone::{FixedZoneRules, Zone, ZoneRules};
use context::Adjusted;

/// Longest text quoted in parse errors before it is abbreviated.
const MAX_ERROR_TEXT: usize = 64;

/// Progress through the text of a parse.
///
/// `index` is where parsing starts and, after success, the index after
/// the last character consumed. Indexes count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsePosition {
    pub index: usize,
    /// Set when parsing fails, to the index of the offending character.
    pub error_index: Option<usize>,
}

impl ParsePosition {
    pub fn new(index: usize) -> Self {
        ParsePosition {
            index,
            error_index: None,
        }
    }
}

/// A compiled formatter for printing and parsing date-time text.
///
/// Built by [`FormatterBuilder`](crate::FormatterBuilder), from a pattern
/// with [`DateTimeFormatter::of_pattern`], or taken from one of the
/// predefined ISO formatters. It is immutable: the `with_*` methods return
/// a changed copy that shares the node tree.
#[derive(Debug, Clone)]
pub struct DateTimeFormatter {
    root: Arc<Composite>,
    locale: Arc<dyn TextProvider>,
    decimal_style: DecimalStyle,
    resolver_style: ResolverStyle,
    resolver_fields: Option<Arc<BTreeSet<Field>>>,
    chronology: Option<Arc<dyn Chronology>>,
    zone: Option<Zone>,
    zone_rules: Arc<dyn ZoneRules>,
    chronologies: Vec<Arc<dyn Chronology>>,
}

impl DateTimeFormatter {
    pub(crate) fn from_root(root: Composite, locale: Arc<dyn TextProvider>) -> Self {
        DateTimeFormatter {
            root: Arc::new(root),
            locale,
            decimal_style: DecimalStyle::default(),
            resolver_style: ResolverStyle::Smart,
            resolver_fields: None,
            chronology: None,
            zone: None,
            zone_rules: Arc::new(FixedZoneRules::default()),
            chronologies: vec![Arc::new(IsoChronology)],
        }
    }

    /// Compiles a letter pattern such as `uuuu-MM-dd HH:mm`.
    pub fn of_pattern(pattern: &str) -> Result<Self, BuildError> {
        let root = compile_pattern(pattern)?;
        Ok(DateTimeFormatter::from_root(root, Arc::new(Locale::default())))
    }

    /// Compiles a letter pattern using the texts of `locale`.
    pub fn of_pattern_with_locale(pattern: &str, locale: impl TextProvider + 'static) -> Result<Self, BuildError> {
        Ok(DateTimeFormatter::of_pattern(pattern)?.with_locale(locale))
    }

    pub fn root(&self) -> &Composite {
        &self.root
    }

    pub fn provider(&self) -> &dyn TextProvider {
        self.locale.as_ref()
    }

    pub fn decimal_style(&self) -> DecimalStyle {
        self.decimal_style
    }

    pub fn resolver_style(&self) -> ResolverStyle {
        self.resolver_style
    }

    pub fn resolver_fields(&self) -> Option<&BTreeSet<Field>> {
        self.resolver_fields.as_deref()
    }

    /// The chronology override, if any.
    pub fn chronology(&self) -> Option<&dyn Chronology> {
        self.chronology.as_deref()
    }

    /// The zone override, if any.
    pub fn zone(&self) -> Option<&Zone> {
        self.zone.as_ref()
    }

    pub fn zone_rules(&self) -> &dyn ZoneRules {
        self.zone_rules.as_ref()
    }

    pub(crate) fn zone_rules_arc(&self) -> Arc<dyn ZoneRules> {
        Arc::clone(&self.zone_rules)
    }

    /// The chronologies that chronology ids and names are parsed against.
    pub fn chronologies(&self) -> &[Arc<dyn Chronology>] {
        &self.chronologies
    }

    pub fn with_locale(self, locale: impl TextProvider + 'static) -> Self {
        self.with_provider(Arc::new(locale))
    }

    pub fn with_provider(self, provider: Arc<dyn TextProvider>) -> Self {
        DateTimeFormatter {
            locale: provider,
            ..self
        }
    }

    pub fn with_decimal_style(self, decimal_style: DecimalStyle) -> Self {
        DateTimeFormatter { decimal_style, ..self }
    }

    pub fn with_resolver_style(self, resolver_style: ResolverStyle) -> Self {
        DateTimeFormatter { resolver_style, ..self }
    }

    /// Restricts resolution to `fields`; parsed values of any other field
    /// are discarded before resolving.
    pub fn with_resolver_fields<I, F>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        let fields: BTreeSet<Field> = fields.into_iter().map(Into::into).collect();
        DateTimeFormatter {
            resolver_fields: Some(Arc::new(fields)),
            ..self
        }
    }

    /// Removes any restriction set by [`with_resolver_fields`](Self::with_resolver_fields).
    pub fn without_resolver_fields(self) -> Self {
        DateTimeFormatter {
            resolver_fields: None,
            ..self
        }
    }

    /// Formats values as if they were in `chronology`, and resolves parsed
    /// fields with it when the text names none.
    pub fn with_chronology(self, chronology: Option<Arc<dyn Chronology>>) -> Self {
        DateTimeFormatter { chronology, ..self }
    }

    /// Converts instants into `zone` before formatting, and supplies the
    /// zone when parsed text names none.
    pub fn with_zone(self, zone: Option<Zone>) -> Self {
        DateTimeFormatter { zone, ..self }
    }

    pub fn with_zone_rules(self, zone_rules: Arc<dyn ZoneRules>) -> Self {
        DateTimeFormatter { zone_rules, ..self }
    }

    pub fn with_chronologies(self, chronologies: Vec<Arc<dyn Chronology>>) -> Self {
        DateTimeFormatter { chronologies, ..self }
    }

    /// Formats `temporal` to a new string.
    pub fn format(&self, temporal: &dyn TemporalAccessor) -> Result<String, FormatError> {
        let mut buf = String::with_capacity(32);
        self.format_to(temporal, &mut buf)?;
        Ok(buf)
    }

    /// Appends the formatted `temporal` to `buf`. On failure `buf` is left
    /// as it was.
    pub fn format_to(&self, temporal: &dyn TemporalAccessor, buf: &mut String) -> Result<(), FormatError> {
        let adjusted = Adjusted::new(temporal, self)?;
        let mut ctx = FormatContext::new(&adjusted, self);
        let mut out = String::new();
        self.root.format(&mut ctx, &mut out)?;
        buf.push_str(&out);
        Ok(())
    }

    /// Parses `text` from `position` without resolving.
    ///
    /// On success the position is moved past the parsed text and the raw
    /// field values are returned. On failure `error_index` is set and
    /// `None` is returned.
    pub fn parse_unresolved(&self, text: &str, position: &mut ParsePosition) -> Option<Parsed> {
        let chars: Vec<char> = text.chars().collect();
        self.parse_chars(&chars, position)
    }

    fn parse_chars(&self, text: &[char], position: &mut ParsePosition) -> Option<Parsed> {
        if position.index > text.len() {
            position.error_index = Some(position.index);
            return None;
        }
        let mut ctx = ParseContext::new(self);
        match self.root.parse(&mut ctx, text, position.index) {
            Ok(end) => {
                position.index = end;
                Some(ctx.into_parsed())
            }
            Err(index) => {
                position.error_index = Some(index);
                None
            }
        }
    }

    /// Parses and resolves the whole of `text`.
    pub fn parse(&self, text: &str) -> Result<Parsed, ParseError> {
        let chars: Vec<char> = text.chars().collect();
        let mut position = ParsePosition::new(0);
        let Some(parsed) = self.parse_chars(&chars, &mut position) else {
            let index = position.error_index.unwrap_or(0);
            debug!("text {:?} could not be parsed at index {}", text, index);
            return Err(ParseError::Mismatch {
                text: abbreviate(text),
                index,
            });
        };
        if position.index < chars.len() {
            debug!("text {:?} has unparsed text at index {}", text, position.index);
            return Err(ParseError::Unparsed {
                text: abbreviate(text),
                index: position.index,
            });
        }
        self.resolve(parsed, text)
    }

    /// Parses and resolves `text` from `position`, leaving any text after
    /// the parsed portion alone.
    pub fn parse_at(&self, text: &str, position: &mut ParsePosition) -> Result<Parsed, ParseError> {
        let Some(parsed) = self.parse_unresolved(text, position) else {
            return Err(ParseError::Mismatch {
                text: abbreviate(text),
                index: position.error_index.unwrap_or(position.index),
            });
        };
        self.resolve(parsed, text)
    }

    fn resolve(&self, mut parsed: Parsed, text: &str) -> Result<Parsed, ParseError> {
        if parsed.chronology.is_none() {
            let chronology = self.chronology.clone().unwrap_or_else(|| Arc::new(IsoChronology));
            parsed.chronology = Some(chronology);
        }
        if parsed.zone.is_none() {
            parsed.zone = self.zone.clone();
        }
        parsed
            .resolve(self.resolver_style, self.resolver_fields.as_deref())
            .map_err(|source| ParseError::Resolve {
                text: abbreviate(text),
                source,
            })?;
        Ok(parsed)
    }

    pub fn parse_date(&self, text: &str) -> Result<NaiveDate, ParseError> {
        let parsed = self.parse(text)?;
        parsed.date().ok_or_else(|| incomplete(text, "date"))
    }

    pub fn parse_time(&self, text: &str) -> Result<NaiveTime, ParseError> {
        let parsed = self.parse(text)?;
        parsed.time().ok_or_else(|| incomplete(text, "time"))
    }

    pub fn parse_date_time(&self, text: &str) -> Result<NaiveDateTime, ParseError> {
        let parsed = self.parse(text)?;
        match (parsed.date(), parsed.time()) {
            (Some(date), Some(time)) => Ok(date.and_time(time)),
            _ => Err(incomplete(text, "date-time")),
        }
    }

    /// Parses a date-time with an offset, taken from the parsed offset or
    /// else from a fixed-offset zone.
    pub fn parse_offset_date_time(&self, text: &str) -> Result<DateTime<FixedOffset>, ParseError> {
        let parsed = self.parse(text)?;
        let offset = parsed
            .field_values()
            .get(ChronoField::OffsetSeconds)
            .and_then(|seconds| i32::try_from(seconds).ok())
            .and_then(FixedOffset::east_opt)
            .or_else(|| parsed.zone().and_then(Zone::fixed_offset));
        match (parsed.date(), parsed.time(), offset) {
            (Some(date), Some(time), Some(offset)) => offset
                .from_local_datetime(&date.and_time(time))
                .single()
                .ok_or_else(|| incomplete(text, "offset date-time")),
            _ => Err(incomplete(text, "offset date-time")),
        }
    }
}

impl fmt::Display for DateTimeFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = self.root.to_string();
        if self.root.is_optional() {
            f.write_str(&pattern)
        } else {
            // strip the outer parentheses
            let inner = pattern
                .strip_prefix('(')
                .and_then(|rest| rest.strip_suffix(')'))
                .unwrap_or(&pattern);
            f.write_str(inner)
        }
    }
}

fn abbreviate(text: &str) -> String {
    if text.chars().count() > MAX_ERROR_TEXT {
        let mut short: String = text.chars().take(MAX_ERROR_TEXT).collect();
        short.push_str("...");
        short
    } else {
        text.to_string()
    }
}

fn incomplete(text: &str, what: &'static str) -> ParseError {
    ParseError::Incomplete {
        text: abbreviate(text),
        what,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormatterBuilder;
    use chrono::NaiveDate;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_formatter_is_send_sync() {
        assert_send_sync::<DateTimeFormatter>();
    }

    #[test]
    fn test_parse_unresolved_positions() {
        let formatter = DateTimeFormatter::iso_local_date();
        let mut position = ParsePosition::new(2);
        let parsed = formatter.parse_unresolved("->2020-01-02!", &mut position).unwrap();
        assert_eq!(position.index, 12);
        assert_eq!(parsed.field_values().get(ChronoField::DayOfMonth), Some(2));

        let mut position = ParsePosition::new(0);
        assert!(formatter.parse_unresolved("2020-x", &mut position).is_none());
        assert_eq!(position.error_index, Some(5));

        let mut position = ParsePosition::new(9);
        assert!(formatter.parse_unresolved("2020", &mut position).is_none());
        assert_eq!(position.error_index, Some(9));
    }

    #[test]
    fn test_parse_errors() {
        let formatter = DateTimeFormatter::iso_local_date();
        assert_eq!(
            formatter.parse("2020-01-02x").unwrap_err(),
            ParseError::Unparsed {
                text: "2020-01-02x".to_string(),
                index: 10,
            }
        );
        assert!(matches!(
            formatter.parse("2020-13-01").unwrap_err(),
            ParseError::Resolve { .. }
        ));
        let long = format!("{}!", "9".repeat(70));
        match formatter.parse(&long).unwrap_err() {
            ParseError::Mismatch { text, .. } => {
                assert_eq!(text.chars().count(), MAX_ERROR_TEXT + 3);
                assert!(text.ends_with("..."));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_at_leaves_trailing_text() {
        let formatter = DateTimeFormatter::iso_local_date();
        let mut position = ParsePosition::new(0);
        let parsed = formatter.parse_at("2020-01-02 rest", &mut position).unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2020, 1, 2));
        assert_eq!(position.index, 10);
    }

    #[test]
    fn test_typed_entry_points() {
        let formatter = DateTimeFormatter::iso_local_date();
        assert_eq!(
            formatter.parse_time("2020-01-02").unwrap_err(),
            ParseError::Incomplete {
                text: "2020-01-02".to_string(),
                what: "time",
            }
        );
        let offset = DateTimeFormatter::iso_offset_date_time()
            .parse_offset_date_time("2020-01-02T03:04:05+01:00")
            .unwrap();
        assert_eq!(offset.to_rfc3339(), "2020-01-02T03:04:05+01:00");
    }

    #[test]
    fn test_format_to_keeps_buffer_on_error() {
        let formatter = DateTimeFormatter::iso_local_date_time();
        let mut buf = "prefix:".to_string();
        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        assert!(formatter.format_to(&date, &mut buf).is_err());
        assert_eq!(buf, "prefix:");
    }

    #[test]
    fn test_resolver_fields_filter() {
        let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd")
            .unwrap()
            .with_resolver_fields([ChronoField::Year, ChronoField::MonthOfYear]);
        let parsed = formatter.parse("2020-03-04").unwrap();
        assert_eq!(parsed.date(), None);
        assert_eq!(parsed.field_values().get(ChronoField::MonthOfYear), Some(3));
        assert_eq!(parsed.field_values().get(ChronoField::DayOfMonth), None);
    }

    #[test]
    fn test_display_strips_outer_parens() {
        let formatter = FormatterBuilder::new()
            .append_value(ChronoField::Year)
            .append_literal_char('-')
            .to_formatter();
        assert_eq!(formatter.to_string(), "Value(Year)'-'");
    }

    #[test]
    fn test_zone_fills_parsed() {
        let formatter = DateTimeFormatter::iso_local_date_time().with_zone(Some(Zone::utc()));
        let parsed = formatter.parse("1970-01-02T00:00:00").unwrap();
        assert_eq!(parsed.zone(), Some(&Zone::utc()));
        assert_eq!(parsed.field_values().get(ChronoField::InstantSeconds), Some(86_400));
    }
}
