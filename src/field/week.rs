//! Localized week definitions and the fields derived from them.
//!
//! A week definition is a first day-of-week plus the minimal number of days
//! that the first week of a month or year must contain. Week numbers can be
//! 0 when a partial week at the start of the period is too short; such days
//! belong to the last week of the previous period for week-based-year
//! purposes.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::chronology::{self, Chronology};
use crate::error::{BuildError, ResolveError};
use crate::field::{ChronoField, Field, FieldValues, TemporalField, ValueRange};
use crate::math;
use crate::options::ResolverStyle;
use crate::temporal::{ChronoUnit, Resolved, TemporalAccessor};

/// A definition of the first day of the week and the minimal days in the
/// first week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekFields {
    first_day_of_week: Weekday,
    minimal_days: u8,
}

const DAY_OF_WEEK_RANGE: ValueRange = ValueRange::of(1, 7);
const WEEK_OF_MONTH_RANGE: ValueRange = ValueRange::of_variable(0, 1, 4, 6);
const WEEK_OF_YEAR_RANGE: ValueRange = ValueRange::of_variable(0, 1, 52, 54);
const WEEK_OF_WEEK_BASED_YEAR_RANGE: ValueRange = ValueRange::of_variable_max(1, 52, 53);

impl WeekFields {
    /// Monday start, four days minimum: the ISO-8601 definition.
    pub const ISO: WeekFields = WeekFields {
        first_day_of_week: Weekday::Mon,
        minimal_days: 4,
    };

    /// Sunday start, one day minimum.
    pub const SUNDAY_START: WeekFields = WeekFields {
        first_day_of_week: Weekday::Sun,
        minimal_days: 1,
    };

    pub fn of(first_day_of_week: Weekday, minimal_days: u8) -> Result<Self, BuildError> {
        if !(1..=7).contains(&minimal_days) {
            return Err(BuildError::InvalidMinimalDays { days: minimal_days });
        }
        Ok(WeekFields {
            first_day_of_week,
            minimal_days,
        })
    }

    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    pub fn minimal_days_in_first_week(&self) -> u8 {
        self.minimal_days
    }

    fn field(&self, kind: WeekKind) -> Field {
        Field::custom(WeekField::new(kind, *self))
    }

    /// Localized day-of-week, 1 on the first day of the week.
    pub fn day_of_week(&self) -> Field {
        self.field(WeekKind::DayOfWeek)
    }

    pub fn week_of_month(&self) -> Field {
        self.field(WeekKind::WeekOfMonth)
    }

    pub fn week_of_year(&self) -> Field {
        self.field(WeekKind::WeekOfYear)
    }

    pub fn week_of_week_based_year(&self) -> Field {
        self.field(WeekKind::WeekOfWeekBasedYear)
    }

    pub fn week_based_year(&self) -> Field {
        self.field(WeekKind::WeekBasedYear)
    }
}

impl Default for WeekFields {
    fn default() -> Self {
        WeekFields::ISO
    }
}

impl fmt::Display for WeekFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = match self.first_day_of_week {
            Weekday::Mon => "MONDAY",
            Weekday::Tue => "TUESDAY",
            Weekday::Wed => "WEDNESDAY",
            Weekday::Thu => "THURSDAY",
            Weekday::Fri => "FRIDAY",
            Weekday::Sat => "SATURDAY",
            Weekday::Sun => "SUNDAY",
        };
        write!(f, "WeekFields[{},{}]", day, self.minimal_days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeekKind {
    DayOfWeek,
    WeekOfMonth,
    WeekOfYear,
    WeekOfWeekBasedYear,
    WeekBasedYear,
}

impl WeekKind {
    fn name(&self) -> &'static str {
        match self {
            WeekKind::DayOfWeek => "DayOfWeek",
            WeekKind::WeekOfMonth => "WeekOfMonth",
            WeekKind::WeekOfYear => "WeekOfYear",
            WeekKind::WeekOfWeekBasedYear => "WeekOfWeekBasedYear",
            WeekKind::WeekBasedYear => "WeekBasedYear",
        }
    }
}

/// A field computed from a week definition.
#[derive(Debug)]
struct WeekField {
    kind: WeekKind,
    weeks: WeekFields,
    id: String,
}

fn iso_day_of_week(date: NaiveDate) -> i32 {
    date.weekday().number_from_monday() as i32
}

fn year_length(date: NaiveDate) -> i32 {
    if date.leap_year() {
        366
    } else {
        365
    }
}

impl WeekField {
    fn new(kind: WeekKind, weeks: WeekFields) -> Self {
        WeekField {
            kind,
            weeks,
            id: format!("{}[{}]", kind.name(), weeks),
        }
    }

    fn partner(&self, kind: WeekKind) -> Field {
        self.weeks.field(kind)
    }

    fn minimal_days(&self) -> i32 {
        i32::from(self.weeks.minimal_days)
    }

    fn localized_day_of_week_from_iso(&self, iso_dow: i32) -> i32 {
        let start = self.weeks.first_day_of_week.number_from_monday() as i32;
        math::floor_mod_i32(iso_dow - start, 7) + 1
    }

    fn localized_day_of_week(&self, date: NaiveDate) -> i32 {
        self.localized_day_of_week_from_iso(iso_day_of_week(date))
    }

    /// Offset from `day` to the start of the first full week of the period.
    fn start_of_week_offset(&self, day: i32, dow: i32) -> i32 {
        let week_start = math::floor_mod_i32(day - dow, 7);
        if week_start + 1 > self.minimal_days() {
            7 - week_start
        } else {
            -week_start
        }
    }

    fn compute_week(offset: i32, day: i32) -> i32 {
        (7 + offset + (day - 1)) / 7
    }

    fn localized_week_of_month(&self, date: NaiveDate) -> i32 {
        let dow = self.localized_day_of_week(date);
        let dom = date.day() as i32;
        let offset = self.start_of_week_offset(dom, dow);
        Self::compute_week(offset, dom)
    }

    fn localized_week_of_year(&self, date: NaiveDate) -> i32 {
        let dow = self.localized_day_of_week(date);
        let doy = date.ordinal() as i32;
        let offset = self.start_of_week_offset(doy, dow);
        Self::compute_week(offset, doy)
    }

    fn localized_week_based_year(&self, date: NaiveDate) -> i64 {
        let dow = self.localized_day_of_week(date);
        let year = i64::from(date.year());
        let doy = date.ordinal() as i32;
        let offset = self.start_of_week_offset(doy, dow);
        let week = Self::compute_week(offset, doy);
        if week == 0 {
            return year - 1;
        }
        let new_year_week = Self::compute_week(offset, year_length(date) + self.minimal_days());
        if week >= new_year_week {
            year + 1
        } else {
            year
        }
    }

    fn localized_week_of_week_based_year(&self, date: NaiveDate) -> Result<i32, ResolveError> {
        let dow = self.localized_day_of_week(date);
        let doy = date.ordinal() as i32;
        let offset = self.start_of_week_offset(doy, dow);
        let week = Self::compute_week(offset, doy);
        if week == 0 {
            // the last week of the previous year
            let previous = chronology::plus_days(date, -i64::from(doy))?;
            return self.localized_week_of_week_based_year(previous);
        }
        if week > 50 {
            let new_year_week = Self::compute_week(offset, year_length(date) + self.minimal_days());
            if week >= new_year_week {
                return Ok(week - new_year_week + 1);
            }
        }
        Ok(week)
    }

    /// The number of weeks in week-based-year `year`.
    fn weeks_in_week_based_year(&self, year: i64) -> Result<i64, ResolveError> {
        let date = chronology::date_of(year, 1, 1)?;
        let offset = self.start_of_week_offset(1, self.localized_day_of_week(date));
        let new_year_week = Self::compute_week(offset, year_length(date) + self.minimal_days());
        Ok(i64::from(new_year_week) - 1)
    }

    /// The date in week-based-year `year`, week `week`, localized `dow`.
    /// A week past the end of the year is clamped to its last week.
    fn of_week_based_year(&self, year: i64, week: i64, dow: i64) -> Result<NaiveDate, ResolveError> {
        let date = chronology::date_of(year, 1, 1)?;
        let offset = self.start_of_week_offset(1, self.localized_day_of_week(date));
        let week = week.min(self.weeks_in_week_based_year(year)?);
        let days = -i64::from(offset) + (dow - 1) + (week - 1) * 7;
        chronology::plus_days(date, days)
    }

    fn range_by_week(&self, day: i32, dow: i32, max_day: i32) -> ValueRange {
        let offset = self.start_of_week_offset(day, dow);
        ValueRange::of(
            i64::from(Self::compute_week(offset, 1)),
            i64::from(Self::compute_week(offset, max_day)),
        )
    }

    fn range_week_year(&self, date: NaiveDate) -> ValueRange {
        let dow = self.localized_day_of_week(date);
        let doy = date.ordinal() as i32;
        let offset = self.start_of_week_offset(doy, dow);
        let week = Self::compute_week(offset, doy);
        if week == 0 {
            return match chronology::plus_days(date, -i64::from(doy + 7)) {
                Ok(previous) => self.range_week_year(previous),
                Err(_) => WEEK_OF_WEEK_BASED_YEAR_RANGE,
            };
        }
        let year_len = year_length(date);
        let new_year_week = Self::compute_week(offset, year_len + self.minimal_days());
        if week >= new_year_week {
            return match chronology::plus_days(date, i64::from(year_len - doy + 1 + 7)) {
                Ok(next) => self.range_week_year(next),
                Err(_) => WEEK_OF_WEEK_BASED_YEAR_RANGE,
            };
        }
        ValueRange::of(1, i64::from(new_year_week - 1))
    }

    fn date_of(temporal: &dyn TemporalAccessor) -> Option<NaiveDate> {
        temporal.query_date().or_else(|| {
            let epoch_day = temporal.get_long(&Field::Chrono(ChronoField::EpochDay))?;
            chronology::date_epoch_day(epoch_day).ok()
        })
    }

    fn resolve_week_of_month(
        &self,
        values: &mut FieldValues,
        chrono: &dyn Chronology,
        year: i64,
        month: i64,
        week: i64,
        local_dow: i32,
        style: ResolverStyle,
    ) -> Result<NaiveDate, ResolveError> {
        let date = if style == ResolverStyle::Lenient {
            let start = chronology::plus_months(chrono.date(year, 1, 1)?, math::subtract(month, 1)?)?;
            let weeks = math::subtract(week, i64::from(self.localized_week_of_month(start)))?;
            let days = i64::from(local_dow - self.localized_day_of_week(start));
            chronology::plus_days(start, math::add(math::multiply(weeks, 7)?, days)?)?
        } else {
            let month_valid = ChronoField::MonthOfYear.check_valid_int_value(month)?;
            let start = chrono.date(year, i64::from(month_valid), 1)?;
            let week_int = self.range().check_valid_int_value(week, &self.partner(self.kind))?;
            let weeks = week_int - self.localized_week_of_month(start);
            let days = local_dow - self.localized_day_of_week(start);
            let date = chronology::plus_days(start, i64::from(weeks * 7 + days))?;
            if style == ResolverStyle::Strict && i64::from(date.month()) != month {
                return Err(ResolveError::Rollover {
                    field: self.partner(self.kind),
                    value: week,
                    unit: ChronoUnit::Months,
                });
            }
            date
        };
        values.remove(self.partner(self.kind));
        values.remove(ChronoField::Year);
        values.remove(ChronoField::MonthOfYear);
        values.remove(ChronoField::DayOfWeek);
        Ok(date)
    }

    fn resolve_week_of_year(
        &self,
        values: &mut FieldValues,
        chrono: &dyn Chronology,
        year: i64,
        week: i64,
        local_dow: i32,
        style: ResolverStyle,
    ) -> Result<NaiveDate, ResolveError> {
        let start = chrono.date(year, 1, 1)?;
        let date = if style == ResolverStyle::Lenient {
            let weeks = math::subtract(week, i64::from(self.localized_week_of_year(start)))?;
            let days = i64::from(local_dow - self.localized_day_of_week(start));
            chronology::plus_days(start, math::add(math::multiply(weeks, 7)?, days)?)?
        } else {
            let week_int = self.range().check_valid_int_value(week, &self.partner(self.kind))?;
            let weeks = week_int - self.localized_week_of_year(start);
            let days = local_dow - self.localized_day_of_week(start);
            let date = chronology::plus_days(start, i64::from(weeks * 7 + days))?;
            if style == ResolverStyle::Strict && i64::from(date.year()) != year {
                return Err(ResolveError::Rollover {
                    field: self.partner(self.kind),
                    value: week,
                    unit: ChronoUnit::Years,
                });
            }
            date
        };
        values.remove(self.partner(self.kind));
        values.remove(ChronoField::Year);
        values.remove(ChronoField::DayOfWeek);
        Ok(date)
    }

    fn resolve_week_based_year(
        &self,
        values: &mut FieldValues,
        local_dow: i32,
        style: ResolverStyle,
    ) -> Result<Option<NaiveDate>, ResolveError> {
        let year_field = self.partner(WeekKind::WeekBasedYear);
        let week_field = self.partner(WeekKind::WeekOfWeekBasedYear);
        let (Some(year_value), Some(week_value)) =
            (values.get(&year_field), values.get(&week_field))
        else {
            return Ok(None);
        };
        let year = i64::from(ChronoField::Year.range().check_valid_int_value(year_value, &year_field)?);
        let dow = i64::from(local_dow);
        let date = if style == ResolverStyle::Lenient {
            let start = self.of_week_based_year(year, 1, dow)?;
            chronology::plus_weeks(start, math::subtract(week_value, 1)?)?
        } else {
            let week = if style == ResolverStyle::Strict {
                ValueRange::of(1, self.weeks_in_week_based_year(year)?).check_valid_int_value(week_value, &week_field)?
            } else {
                WEEK_OF_WEEK_BASED_YEAR_RANGE.check_valid_int_value(week_value, &week_field)?
            };
            let date = self.of_week_based_year(year, i64::from(week), dow)?;
            if style == ResolverStyle::Strict && self.localized_week_based_year(date) != year {
                return Err(ResolveError::Rollover {
                    field: week_field,
                    value: week_value,
                    unit: ChronoUnit::WeekBasedYears,
                });
            }
            date
        };
        values.remove(self.partner(self.kind));
        values.remove(&year_field);
        values.remove(&week_field);
        values.remove(ChronoField::DayOfWeek);
        Ok(Some(date))
    }
}

impl TemporalField for WeekField {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        match self.kind {
            WeekKind::DayOfWeek => "Day of Week".to_string(),
            _ => "Week".to_string(),
        }
    }

    fn base_unit(&self) -> ChronoUnit {
        match self.kind {
            WeekKind::DayOfWeek => ChronoUnit::Days,
            WeekKind::WeekBasedYear => ChronoUnit::WeekBasedYears,
            _ => ChronoUnit::Weeks,
        }
    }

    fn range_unit(&self) -> ChronoUnit {
        match self.kind {
            WeekKind::DayOfWeek => ChronoUnit::Weeks,
            WeekKind::WeekOfMonth => ChronoUnit::Months,
            WeekKind::WeekOfYear => ChronoUnit::Years,
            WeekKind::WeekOfWeekBasedYear => ChronoUnit::WeekBasedYears,
            WeekKind::WeekBasedYear => ChronoUnit::Forever,
        }
    }

    fn range(&self) -> ValueRange {
        match self.kind {
            WeekKind::DayOfWeek => DAY_OF_WEEK_RANGE,
            WeekKind::WeekOfMonth => WEEK_OF_MONTH_RANGE,
            WeekKind::WeekOfYear => WEEK_OF_YEAR_RANGE,
            WeekKind::WeekOfWeekBasedYear => WEEK_OF_WEEK_BASED_YEAR_RANGE,
            WeekKind::WeekBasedYear => ChronoField::Year.range(),
        }
    }

    fn is_date_based(&self) -> bool {
        true
    }

    fn is_time_based(&self) -> bool {
        false
    }

    fn is_supported_by(&self, temporal: &dyn TemporalAccessor) -> bool {
        let supports = |field: ChronoField| temporal.is_supported(&Field::Chrono(field));
        if !supports(ChronoField::DayOfWeek) {
            return false;
        }
        match self.kind {
            WeekKind::DayOfWeek => true,
            WeekKind::WeekOfMonth => supports(ChronoField::DayOfMonth),
            WeekKind::WeekOfYear => supports(ChronoField::DayOfYear),
            WeekKind::WeekOfWeekBasedYear => supports(ChronoField::EpochDay),
            WeekKind::WeekBasedYear => supports(ChronoField::Year),
        }
    }

    fn range_refined_by(&self, temporal: &dyn TemporalAccessor) -> ValueRange {
        let Some(date) = Self::date_of(temporal) else {
            return self.range();
        };
        let dow = self.localized_day_of_week(date);
        match self.kind {
            WeekKind::DayOfWeek | WeekKind::WeekBasedYear => self.range(),
            WeekKind::WeekOfMonth => {
                let max = crate::temporal::month_length(date) as i32;
                self.range_by_week(date.day() as i32, dow, max)
            }
            WeekKind::WeekOfYear => self.range_by_week(date.ordinal() as i32, dow, year_length(date)),
            WeekKind::WeekOfWeekBasedYear => self.range_week_year(date),
        }
    }

    fn get_from(&self, temporal: &dyn TemporalAccessor) -> Option<i64> {
        if self.kind == WeekKind::DayOfWeek {
            let iso = temporal.get_long(&Field::Chrono(ChronoField::DayOfWeek))?;
            return Some(i64::from(self.localized_day_of_week_from_iso(iso as i32)));
        }
        let date = Self::date_of(temporal)?;
        let value = match self.kind {
            WeekKind::DayOfWeek => return None,
            WeekKind::WeekOfMonth => i64::from(self.localized_week_of_month(date)),
            WeekKind::WeekOfYear => i64::from(self.localized_week_of_year(date)),
            WeekKind::WeekOfWeekBasedYear => i64::from(self.localized_week_of_week_based_year(date).ok()?),
            WeekKind::WeekBasedYear => self.localized_week_based_year(date),
        };
        Some(value)
    }

    fn adjust_into(&self, date: NaiveDate, new_value: i64) -> Result<NaiveDate, ResolveError> {
        let field = self.partner(self.kind);
        let new_value = i64::from(self.range().check_valid_int_value(new_value, &field)?);
        let current = self.get_from(&date).ok_or(ResolveError::InvalidDate {
            reason: format!("{field} is not available for {date}"),
        })?;
        if new_value == current {
            return Ok(date);
        }
        match self.kind {
            WeekKind::WeekBasedYear => {
                let dow = i64::from(self.localized_day_of_week(date));
                let week = i64::from(self.localized_week_of_week_based_year(date)?);
                self.of_week_based_year(new_value, week, dow)
            }
            WeekKind::DayOfWeek => chronology::plus_days(date, new_value - current),
            _ => chronology::plus_weeks(date, new_value - current),
        }
    }

    fn resolve(
        &self,
        values: &mut FieldValues,
        partial: &dyn TemporalAccessor,
        style: ResolverStyle,
    ) -> Result<Option<Resolved>, ResolveError> {
        let me = self.partner(self.kind);
        let Some(value) = values.get(&me) else {
            return Ok(None);
        };
        let value_int = i64::from(math::to_int(value)?);
        if self.kind == WeekKind::DayOfWeek {
            // always strict, two conflicting day-of-week values cannot be reconciled leniently
            let checked = DAY_OF_WEEK_RANGE.check_valid_int_value(value_int, &me)?;
            let start = self.weeks.first_day_of_week.number_from_monday() as i32;
            let iso = i64::from(math::floor_mod_i32((start - 1) + (checked - 1), 7) + 1);
            values.remove(&me);
            values.add_checked(ChronoField::DayOfWeek, iso)?;
            return Ok(None);
        }
        let Some(iso_dow) = values.get(ChronoField::DayOfWeek) else {
            return Ok(None);
        };
        let iso_dow = ChronoField::DayOfWeek.check_valid_int_value(iso_dow)?;
        let local_dow = self.localized_day_of_week_from_iso(iso_dow);
        let chrono = chronology::of_temporal(partial);
        if let Some(year) = values.get(ChronoField::Year) {
            let year = i64::from(ChronoField::Year.check_valid_int_value(year)?);
            if self.kind == WeekKind::WeekOfMonth {
                if let Some(month) = values.get(ChronoField::MonthOfYear) {
                    let date = self.resolve_week_of_month(values, chrono, year, month, value_int, local_dow, style)?;
                    return Ok(Some(Resolved::Date(date)));
                }
            }
            if self.kind == WeekKind::WeekOfYear {
                let date = self.resolve_week_of_year(values, chrono, year, value_int, local_dow, style)?;
                return Ok(Some(Resolved::Date(date)));
            }
        } else if matches!(self.kind, WeekKind::WeekOfWeekBasedYear | WeekKind::WeekBasedYear) {
            return Ok(self
                .resolve_week_based_year(values, local_dow, style)?
                .map(Resolved::Date));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn get(field: &Field, date: NaiveDate) -> i64 {
        field.get_from(&date).unwrap()
    }

    #[test]
    fn test_ids() {
        assert_eq!(
            WeekFields::ISO.week_of_month().to_string(),
            "WeekOfMonth[WeekFields[MONDAY,4]]"
        );
        assert_eq!(WeekFields::SUNDAY_START.to_string(), "WeekFields[SUNDAY,1]");
        assert!(WeekFields::of(Weekday::Mon, 0).is_err());
        assert!(WeekFields::of(Weekday::Mon, 8).is_err());
    }

    #[test]
    fn test_localized_day_of_week() {
        let date = ymd(2011, 12, 31); // Saturday
        assert_eq!(get(&WeekFields::ISO.day_of_week(), date), 6);
        assert_eq!(get(&WeekFields::SUNDAY_START.day_of_week(), date), 7);
    }

    #[test]
    fn test_week_based_year_boundary() {
        let iso = WeekFields::ISO;
        let date = ymd(2011, 12, 31);
        assert_eq!(get(&iso.week_of_week_based_year(), date), 52);
        assert_eq!(get(&iso.week_based_year(), date), 2011);

        let date = ymd(2012, 1, 1); // Sunday, still in 2011's last week
        assert_eq!(get(&iso.week_of_week_based_year(), date), 52);
        assert_eq!(get(&iso.week_based_year(), date), 2011);
        assert_eq!(get(&iso.week_of_year(), date), 0);

        let date = ymd(2008, 12, 29); // Monday of 2009-W01
        assert_eq!(get(&iso.week_of_week_based_year(), date), 1);
        assert_eq!(get(&iso.week_based_year(), date), 2009);
    }

    #[test]
    fn test_week_of_month() {
        let iso = WeekFields::ISO;
        // October 2023 starts on a Sunday: the first day is week 0
        assert_eq!(get(&iso.week_of_month(), ymd(2023, 10, 1)), 0);
        assert_eq!(get(&iso.week_of_month(), ymd(2023, 10, 2)), 1);
        assert_eq!(get(&WeekFields::SUNDAY_START.week_of_month(), ymd(2023, 10, 1)), 1);
    }

    #[test]
    fn test_ranges_refined() {
        let iso = WeekFields::ISO;
        let date = ymd(2023, 10, 15);
        assert_eq!(iso.week_of_month().range_refined_by(&date), ValueRange::of(0, 5));
        // 2020 is a 53 week ISO year
        let date = ymd(2020, 6, 1);
        assert_eq!(
            iso.week_of_week_based_year().range_refined_by(&date),
            ValueRange::of(1, 53)
        );
    }

    #[test]
    fn test_adjust_into() {
        let iso = WeekFields::ISO;
        let date = ymd(2011, 12, 31);
        let adjusted = adjust(&iso.week_based_year(), date, 2012);
        assert_eq!(get(&iso.week_based_year(), adjusted), 2012);
        assert_eq!(get(&iso.week_of_week_based_year(), adjusted), 52);
        assert_eq!(get(&iso.day_of_week(), adjusted), 6);
    }

    fn adjust(field: &Field, date: NaiveDate, value: i64) -> NaiveDate {
        match field {
            Field::Custom(custom) => custom.inner().adjust_into(date, value).unwrap(),
            Field::Chrono(_) => panic!("not a week field"),
        }
    }
}
