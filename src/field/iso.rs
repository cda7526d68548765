//! Fields specific to the ISO-8601 calendar: quarters and week-based years.
//!
//! The week-based year starts on the Monday of the week containing the
//! first Thursday of the calendar year, so its first and last few days may
//! belong to the neighbouring calendar year.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::chronology::{self, Chronology, IsoChronology};
use crate::error::ResolveError;
use crate::field::{ChronoField, Field, FieldValues, TemporalField, ValueRange};
use crate::math;
use crate::options::ResolverStyle;
use crate::temporal::{ChronoUnit, Resolved, TemporalAccessor};

/// Day-of-year at the start of each quarter, common years then leap years.
const QUARTER_DAYS: [i64; 8] = [0, 90, 181, 273, 0, 91, 182, 274];

const WEEK_OF_WEEK_BASED_YEAR_RANGE: ValueRange = ValueRange::of_variable_max(1, 52, 53);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IsoKind {
    QuarterOfYear,
    DayOfQuarter,
    WeekOfWeekBasedYear,
    WeekBasedYear,
}

#[derive(Debug)]
struct IsoField(IsoKind);

/// The quarter-of-year, 1 to 4.
pub fn quarter_of_year() -> Field {
    Field::custom(IsoField(IsoKind::QuarterOfYear))
}

/// The day-of-quarter, 1 to 90, 91 or 92.
pub fn day_of_quarter() -> Field {
    Field::custom(IsoField(IsoKind::DayOfQuarter))
}

/// The ISO week within the week-based year, 1 to 52 or 53.
pub fn week_of_week_based_year() -> Field {
    Field::custom(IsoField(IsoKind::WeekOfWeekBasedYear))
}

/// The ISO week-based year.
pub fn week_based_year() -> Field {
    Field::custom(IsoField(IsoKind::WeekBasedYear))
}

fn is_iso(temporal: &dyn TemporalAccessor) -> bool {
    chronology::same_chronology(chronology::of_temporal(temporal), &IsoChronology)
}

fn weeks_in_year(week_based_year: i64) -> i64 {
    let has_53 = i32::try_from(week_based_year)
        .ok()
        .and_then(|year| NaiveDate::from_isoywd_opt(year, 53, Weekday::Mon))
        .is_some();
    if has_53 {
        53
    } else {
        52
    }
}

fn week_range(date: NaiveDate) -> ValueRange {
    ValueRange::of(1, weeks_in_year(i64::from(date.iso_week().year())))
}

fn quarter_of(date: NaiveDate) -> i64 {
    i64::from(date.month() + 2) / 3
}

fn day_of_quarter_range(date: NaiveDate) -> ValueRange {
    match quarter_of(date) {
        1 if date.leap_year() => ValueRange::of(1, 91),
        1 => ValueRange::of(1, 90),
        2 => ValueRange::of(1, 91),
        _ => ValueRange::of(1, 92),
    }
}

impl IsoField {
    fn me(&self) -> Field {
        Field::custom(IsoField(self.0))
    }

    fn ensure_iso(&self, temporal: &dyn TemporalAccessor) -> Result<(), ResolveError> {
        if is_iso(temporal) {
            return Ok(());
        }
        Err(ResolveError::UnsupportedChronology {
            field: self.me(),
            chronology: chronology::of_temporal(temporal).id().to_string(),
        })
    }

    fn resolve_day_of_quarter(
        &self,
        values: &mut FieldValues,
        partial: &dyn TemporalAccessor,
        style: ResolverStyle,
    ) -> Result<Option<Resolved>, ResolveError> {
        let (Some(year), Some(quarter), Some(doq)) = (
            values.get(ChronoField::Year),
            values.get(quarter_of_year()),
            values.get(self.me()),
        ) else {
            return Ok(None);
        };
        let year = i64::from(ChronoField::Year.check_valid_int_value(year)?);
        self.ensure_iso(partial)?;
        let date = if style == ResolverStyle::Lenient {
            let months = math::multiply(math::subtract(quarter, 1)?, 3)?;
            let start = chronology::plus_months(chronology::date_of(year, 1, 1)?, months)?;
            chronology::plus_days(start, math::subtract(doq, 1)?)?
        } else {
            let quarter = quarter_of_year().check_valid_int_value(quarter)?;
            let start = chronology::date_of(year, i64::from((quarter - 1) * 3 + 1), 1)?;
            if !(1..=90).contains(&doq) {
                if style == ResolverStyle::Strict {
                    day_of_quarter_range(start).check_valid_value(doq, &self.me())?;
                } else {
                    self.range().check_valid_value(doq, &self.me())?;
                }
            }
            chronology::plus_days(start, doq - 1)?
        };
        values.remove(self.me());
        values.remove(ChronoField::Year);
        values.remove(quarter_of_year());
        Ok(Some(Resolved::Date(date)))
    }

    fn resolve_week_of_week_based_year(
        &self,
        values: &mut FieldValues,
        partial: &dyn TemporalAccessor,
        style: ResolverStyle,
    ) -> Result<Option<Resolved>, ResolveError> {
        let (Some(wby), Some(dow), Some(week)) = (
            values.get(week_based_year()),
            values.get(ChronoField::DayOfWeek),
            values.get(self.me()),
        ) else {
            return Ok(None);
        };
        let wby = i64::from(week_based_year().check_valid_int_value(wby)?);
        self.ensure_iso(partial)?;
        // January 4th is always in week 1
        let mut date = chronology::date_of(wby, 1, 4)?;
        if style == ResolverStyle::Lenient {
            let mut dow = dow;
            if dow > 7 {
                date = chronology::plus_weeks(date, (dow - 1) / 7)?;
                dow = (dow - 1) % 7 + 1;
            } else if dow < 1 {
                date = chronology::plus_weeks(date, math::subtract(dow, 7)? / 7)?;
                dow = (dow + 6) % 7 + 1;
            }
            date = chronology::plus_weeks(date, math::subtract(week, 1)?)?;
            date = chronology::with_day_of_week(date, dow)?;
        } else {
            let dow = ChronoField::DayOfWeek.check_valid_int_value(dow)?;
            if !(1..=52).contains(&week) {
                if style == ResolverStyle::Strict {
                    week_range(date).check_valid_value(week, &self.me())?;
                } else {
                    self.range().check_valid_value(week, &self.me())?;
                }
            }
            date = chronology::plus_weeks(date, week - 1)?;
            date = chronology::with_day_of_week(date, i64::from(dow))?;
        }
        values.remove(self.me());
        values.remove(week_based_year());
        values.remove(ChronoField::DayOfWeek);
        Ok(Some(Resolved::Date(date)))
    }
}

impl TemporalField for IsoField {
    fn id(&self) -> &str {
        match self.0 {
            IsoKind::QuarterOfYear => "QuarterOfYear",
            IsoKind::DayOfQuarter => "DayOfQuarter",
            IsoKind::WeekOfWeekBasedYear => "WeekOfWeekBasedYear",
            IsoKind::WeekBasedYear => "WeekBasedYear",
        }
    }

    fn display_name(&self) -> String {
        match self.0 {
            IsoKind::QuarterOfYear => "Quarter",
            IsoKind::DayOfQuarter => "DayOfQuarter",
            IsoKind::WeekOfWeekBasedYear => "Week",
            IsoKind::WeekBasedYear => "Year",
        }
        .to_string()
    }

    fn base_unit(&self) -> ChronoUnit {
        match self.0 {
            IsoKind::QuarterOfYear => ChronoUnit::QuarterYears,
            IsoKind::DayOfQuarter => ChronoUnit::Days,
            IsoKind::WeekOfWeekBasedYear => ChronoUnit::Weeks,
            IsoKind::WeekBasedYear => ChronoUnit::WeekBasedYears,
        }
    }

    fn range_unit(&self) -> ChronoUnit {
        match self.0 {
            IsoKind::QuarterOfYear => ChronoUnit::Years,
            IsoKind::DayOfQuarter => ChronoUnit::QuarterYears,
            IsoKind::WeekOfWeekBasedYear => ChronoUnit::WeekBasedYears,
            IsoKind::WeekBasedYear => ChronoUnit::Forever,
        }
    }

    fn range(&self) -> ValueRange {
        match self.0 {
            IsoKind::QuarterOfYear => ValueRange::of(1, 4),
            IsoKind::DayOfQuarter => ValueRange::of_variable_max(1, 90, 92),
            IsoKind::WeekOfWeekBasedYear => WEEK_OF_WEEK_BASED_YEAR_RANGE,
            IsoKind::WeekBasedYear => ChronoField::Year.range(),
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
        let fields = match self.0 {
            IsoKind::QuarterOfYear => supports(ChronoField::MonthOfYear),
            IsoKind::DayOfQuarter => {
                supports(ChronoField::DayOfYear)
                    && supports(ChronoField::MonthOfYear)
                    && supports(ChronoField::Year)
            }
            IsoKind::WeekOfWeekBasedYear | IsoKind::WeekBasedYear => {
                supports(ChronoField::EpochDay)
            }
        };
        fields && is_iso(temporal)
    }

    fn range_refined_by(&self, temporal: &dyn TemporalAccessor) -> ValueRange {
        match (self.0, temporal.query_date()) {
            (IsoKind::DayOfQuarter, Some(date)) => day_of_quarter_range(date),
            (IsoKind::WeekOfWeekBasedYear, Some(date)) => week_range(date),
            _ => self.range(),
        }
    }

    fn get_from(&self, temporal: &dyn TemporalAccessor) -> Option<i64> {
        if !self.is_supported_by(temporal) {
            return None;
        }
        if self.0 == IsoKind::QuarterOfYear {
            let month = temporal.get_long(&Field::Chrono(ChronoField::MonthOfYear))?;
            return Some((month + 2) / 3);
        }
        let date = temporal.query_date()?;
        let value = match self.0 {
            IsoKind::QuarterOfYear => quarter_of(date),
            IsoKind::DayOfQuarter => {
                let index = (quarter_of(date) - 1) as usize + if date.leap_year() { 4 } else { 0 };
                i64::from(date.ordinal()) - QUARTER_DAYS[index]
            }
            IsoKind::WeekOfWeekBasedYear => i64::from(date.iso_week().week()),
            IsoKind::WeekBasedYear => i64::from(date.iso_week().year()),
        };
        Some(value)
    }

    fn adjust_into(&self, date: NaiveDate, new_value: i64) -> Result<NaiveDate, ResolveError> {
        let me = self.me();
        let current = self.get_from(&date).ok_or_else(|| ResolveError::InvalidDate {
            reason: format!("{me} is not available for {date}"),
        })?;
        match self.0 {
            IsoKind::QuarterOfYear => {
                self.range().check_valid_value(new_value, &me)?;
                chronology::plus_months(date, (new_value - current) * 3)
            }
            IsoKind::DayOfQuarter => {
                self.range_refined_by(&date).check_valid_value(new_value, &me)?;
                chronology::plus_days(date, new_value - current)
            }
            IsoKind::WeekOfWeekBasedYear => {
                self.range_refined_by(&date).check_valid_value(new_value, &me)?;
                chronology::plus_weeks(date, new_value - current)
            }
            IsoKind::WeekBasedYear => {
                let new_year = i64::from(self.range().check_valid_int_value(new_value, &me)?);
                let dow = i64::from(date.weekday().number_from_monday());
                let mut week = i64::from(date.iso_week().week());
                if week == 53 && weeks_in_year(new_year) == 52 {
                    week = 52;
                }
                let anchor = chronology::date_of(new_year, 1, 4)?;
                let anchor_dow = i64::from(anchor.weekday().number_from_monday());
                chronology::plus_days(anchor, (dow - anchor_dow) + (week - 1) * 7)
            }
        }
    }

    fn resolve(
        &self,
        values: &mut FieldValues,
        partial: &dyn TemporalAccessor,
        style: ResolverStyle,
    ) -> Result<Option<Resolved>, ResolveError> {
        match self.0 {
            IsoKind::DayOfQuarter => self.resolve_day_of_quarter(values, partial, style),
            IsoKind::WeekOfWeekBasedYear => {
                self.resolve_week_of_week_based_year(values, partial, style)
            }
            IsoKind::QuarterOfYear | IsoKind::WeekBasedYear => Ok(None),
        }
    }
}
