//! Localized text and conventions.

mod builtin;

use std::fmt;

pub use builtin::Locale;

use crate::field::{Field, WeekFields};
use crate::options::{DecimalStyle, FormatStyle, TextStyle};

/// Source of localized text for field values, zones and chronologies.
pub trait TextProvider: Send + Sync + fmt::Debug {
    /// The text for `value` of `field`, `None` if there is none.
    fn text(&self, field: &Field, value: i64, style: TextStyle) -> Option<String>;

    /// Every `(text, value)` pair usable when parsing `field`, longest text
    /// first. A `None` style yields the texts of all styles.
    fn parse_texts(&self, field: &Field, style: Option<TextStyle>) -> Vec<(String, i64)>;

    /// The week definition of the locale.
    fn week_fields(&self) -> WeekFields {
        WeekFields::ISO
    }

    /// The pattern for the requested date and time lengths.
    fn localized_pattern(&self, date: Option<FormatStyle>, time: Option<FormatStyle>) -> Option<String>;

    fn zone_name(&self, zone_id: &str, style: TextStyle) -> Option<String> {
        let _ = (zone_id, style);
        None
    }

    fn chronology_name(&self, id: &str) -> Option<String> {
        let _ = id;
        None
    }

    /// The prefix of localized offsets.
    fn gmt_text(&self) -> &str {
        "GMT"
    }

    fn decimal_style(&self) -> DecimalStyle {
        DecimalStyle::default()
    }
}

/// Orders `(text, value)` pairs longest first and drops texts that name
/// more than one value.
pub(crate) fn sort_parse_texts(mut texts: Vec<(String, i64)>) -> Vec<(String, i64)> {
    texts.sort_by(|a, b| {
        b.0.chars()
            .count()
            .cmp(&a.0.chars().count())
            .then_with(|| a.0.cmp(&b.0))
            .then_with(|| a.1.cmp(&b.1))
    });
    texts.dedup();
    let ambiguous: Vec<String> = texts
        .windows(2)
        .filter(|pair| pair[0].0 == pair[1].0)
        .map(|pair| pair[0].0.clone())
        .collect();
    texts.retain(|(text, _)| !ambiguous.contains(text));
    texts
}
