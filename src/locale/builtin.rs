//! Built-in locale data.

use chrono::Weekday;

use crate::field::{iso, ChronoField, Field, WeekFields};
use crate::locale::{sort_parse_texts, TextProvider};
use crate::options::{FormatStyle, TextStyle};

/// Locale settings for formatting and parsing.
///
/// Day names start on Monday, matching ISO day-of-week numbering.
#[derive(Debug, Clone)]
pub struct Locale {
    pub id: &'static str,
    pub am_pm: [&'static str; 2],
    pub am_pm_narrow: [&'static str; 2],
    pub month_names_short: [&'static str; 12],
    pub month_names_full: [&'static str; 12],
    pub month_names_narrow: [&'static str; 12],
    pub day_names_short: [&'static str; 7],
    pub day_names_full: [&'static str; 7],
    pub day_names_narrow: [&'static str; 7],
    pub era_names_short: [&'static str; 2],
    pub era_names_full: [&'static str; 2],
    pub era_names_narrow: [&'static str; 2],
    pub quarter_names_short: [&'static str; 4],
    pub quarter_names_full: [&'static str; 4],
    pub first_day_of_week: Weekday,
    pub minimal_days_in_first_week: u8,
    /// Date patterns, from FULL to SHORT.
    pub date_patterns: [&'static str; 4],
    /// Time patterns, from FULL to SHORT.
    pub time_patterns: [&'static str; 4],
    /// Region id, short name and full name of known zones.
    pub zone_names: &'static [(&'static str, &'static str, &'static str)],
}

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_FULL: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_NARROW: [&str; 12] = ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];

const DAYS_SHORT: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const DAYS_FULL: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const DAYS_NARROW: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

const ZONE_NAMES: &[(&str, &str, &str)] = &[
    ("UTC", "UTC", "Coordinated Universal Time"),
    ("GMT", "GMT", "Greenwich Mean Time"),
    ("Europe/Paris", "CET", "Central European Time"),
    ("America/New_York", "ET", "Eastern Time"),
];

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl Locale {
    /// US English locale, weeks start on Sunday.
    pub fn en_us() -> Self {
        Locale {
            id: "en_US",
            am_pm: ["AM", "PM"],
            am_pm_narrow: ["a", "p"],
            month_names_short: MONTHS_SHORT,
            month_names_full: MONTHS_FULL,
            month_names_narrow: MONTHS_NARROW,
            day_names_short: DAYS_SHORT,
            day_names_full: DAYS_FULL,
            day_names_narrow: DAYS_NARROW,
            era_names_short: ["BC", "AD"],
            era_names_full: ["Before Christ", "Anno Domini"],
            era_names_narrow: ["B", "A"],
            quarter_names_short: ["Q1", "Q2", "Q3", "Q4"],
            quarter_names_full: ["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"],
            first_day_of_week: Weekday::Sun,
            minimal_days_in_first_week: 1,
            date_patterns: ["EEEE, MMMM d, y", "MMMM d, y", "MMM d, y", "M/d/yy"],
            time_patterns: ["h:mm:ss a zzzz", "h:mm:ss a z", "h:mm:ss a", "h:mm a"],
            zone_names: ZONE_NAMES,
        }
    }

    /// British English locale, ISO weeks.
    pub fn en_gb() -> Self {
        Locale {
            id: "en_GB",
            am_pm: ["am", "pm"],
            first_day_of_week: Weekday::Mon,
            minimal_days_in_first_week: 4,
            date_patterns: ["EEEE, d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
            time_patterns: ["HH:mm:ss zzzz", "HH:mm:ss z", "HH:mm:ss", "HH:mm"],
            ..Self::en_us()
        }
    }

    fn names(&self, field: &Field, style: TextStyle) -> Option<(i64, Vec<&'static str>)> {
        let style = style.as_normal();
        let pick = |short: &[&'static str], full: &[&'static str], narrow: &[&'static str]| match style {
            TextStyle::Short => short.to_vec(),
            TextStyle::Narrow => narrow.to_vec(),
            _ => full.to_vec(),
        };
        match field {
            Field::Chrono(ChronoField::MonthOfYear) => Some((
                1,
                pick(&self.month_names_short, &self.month_names_full, &self.month_names_narrow),
            )),
            Field::Chrono(ChronoField::DayOfWeek) => Some((
                1,
                pick(&self.day_names_short, &self.day_names_full, &self.day_names_narrow),
            )),
            Field::Chrono(ChronoField::Era) => Some((
                0,
                pick(&self.era_names_short, &self.era_names_full, &self.era_names_narrow),
            )),
            Field::Chrono(ChronoField::AmPmOfDay) => {
                Some((0, pick(&self.am_pm, &self.am_pm, &self.am_pm_narrow)))
            }
            Field::Custom(_) if *field == iso::quarter_of_year() => Some((
                1,
                pick(&self.quarter_names_short, &self.quarter_names_full, &["1", "2", "3", "4"]),
            )),
            _ => None,
        }
    }
}

fn style_index(style: FormatStyle) -> usize {
    match style {
        FormatStyle::Full => 0,
        FormatStyle::Long => 1,
        FormatStyle::Medium => 2,
        FormatStyle::Short => 3,
    }
}

impl TextProvider for Locale {
    fn text(&self, field: &Field, value: i64, style: TextStyle) -> Option<String> {
        let (first, names) = self.names(field, style)?;
        let index = usize::try_from(value.checked_sub(first)?).ok()?;
        names.get(index).map(|name| name.to_string())
    }

    fn parse_texts(&self, field: &Field, style: Option<TextStyle>) -> Vec<(String, i64)> {
        let styles: Vec<TextStyle> = match style {
            Some(style) => vec![style.as_normal()],
            None => vec![TextStyle::Full, TextStyle::Short, TextStyle::Narrow],
        };
        let mut texts = Vec::new();
        for style in styles {
            if let Some((first, names)) = self.names(field, style) {
                texts.extend(
                    names
                        .iter()
                        .enumerate()
                        .map(|(index, name)| (name.to_string(), first + index as i64)),
                );
            }
        }
        sort_parse_texts(texts)
    }

    fn week_fields(&self) -> WeekFields {
        WeekFields::of(self.first_day_of_week, self.minimal_days_in_first_week)
            .unwrap_or(WeekFields::ISO)
    }

    fn localized_pattern(&self, date: Option<FormatStyle>, time: Option<FormatStyle>) -> Option<String> {
        match (date, time) {
            (Some(date), Some(time)) => {
                let date_pattern = self.date_patterns[style_index(date)];
                let time_pattern = self.time_patterns[style_index(time)];
                let join = match date {
                    FormatStyle::Full | FormatStyle::Long => " 'at' ",
                    FormatStyle::Medium | FormatStyle::Short => ", ",
                };
                Some(format!("{date_pattern}{join}{time_pattern}"))
            }
            (Some(date), None) => Some(self.date_patterns[style_index(date)].to_string()),
            (None, Some(time)) => Some(self.time_patterns[style_index(time)].to_string()),
            (None, None) => None,
        }
    }

    fn zone_name(&self, zone_id: &str, style: TextStyle) -> Option<String> {
        let (_, short, full) = self.zone_names.iter().find(|(id, _, _)| *id == zone_id)?;
        Some(match style.as_normal() {
            TextStyle::Full => full.to_string(),
            _ => short.to_string(),
        })
    }

    fn chronology_name(&self, id: &str) -> Option<String> {
        match id {
            "ISO" => Some("ISO".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_text() {
        let locale = Locale::en_us();
        let month = Field::Chrono(ChronoField::MonthOfYear);
        assert_eq!(locale.text(&month, 1, TextStyle::Full).as_deref(), Some("January"));
        assert_eq!(locale.text(&month, 12, TextStyle::ShortStandalone).as_deref(), Some("Dec"));
        assert_eq!(locale.text(&month, 13, TextStyle::Full), None);
        let dow = Field::Chrono(ChronoField::DayOfWeek);
        assert_eq!(locale.text(&dow, 7, TextStyle::Short).as_deref(), Some("Sun"));
        assert_eq!(
            locale.text(&iso::quarter_of_year(), 2, TextStyle::Full).as_deref(),
            Some("2nd quarter")
        );
        assert_eq!(locale.text(&Field::Chrono(ChronoField::Year), 2020, TextStyle::Full), None);
    }

    #[test]
    fn test_parse_texts_longest_first() {
        let locale = Locale::en_us();
        let texts = locale.parse_texts(&Field::Chrono(ChronoField::MonthOfYear), None);
        assert_eq!(texts[0], ("September".to_string(), 9));
        // narrow "J" names three months and cannot be parsed
        assert!(!texts.iter().any(|(text, _)| text == "J"));
        assert!(texts.iter().any(|(text, value)| text == "D" && *value == 12));
    }

    #[test]
    fn test_week_fields_by_locale() {
        assert_eq!(Locale::en_us().week_fields(), WeekFields::SUNDAY_START);
        assert_eq!(Locale::en_gb().week_fields(), WeekFields::ISO);
    }

    #[test]
    fn test_localized_patterns() {
        let locale = Locale::en_gb();
        assert_eq!(
            locale.localized_pattern(Some(FormatStyle::Medium), Some(FormatStyle::Short)).as_deref(),
            Some("d MMM y, HH:mm")
        );
        assert_eq!(locale.localized_pattern(None, None), None);
        assert_eq!(locale.zone_name("UTC", TextStyle::Full).as_deref(), Some("Coordinated Universal Time"));
    }
}
