//! Read access to date and time values.
//!
//! [`TemporalAccessor`] is the view the formatter and the field algorithms
//! take of a value. It is implemented for the `chrono` value types and for
//! [`Parsed`](crate::Parsed).

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::chronology::{Chronology, IsoChronology};
use crate::field::{ChronoField, Field, ValueRange, MAX_YEAR};
use crate::zone::Zone;

/// Units of time, used to describe the base and range of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChronoUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
    Eras,
    Forever,
    /// Years of a week-based calendar.
    WeekBasedYears,
    /// Quarters of a year.
    QuarterYears,
}

impl fmt::Display for ChronoUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChronoUnit::Nanos => "Nanos",
            ChronoUnit::Micros => "Micros",
            ChronoUnit::Millis => "Millis",
            ChronoUnit::Seconds => "Seconds",
            ChronoUnit::Minutes => "Minutes",
            ChronoUnit::Hours => "Hours",
            ChronoUnit::HalfDays => "HalfDays",
            ChronoUnit::Days => "Days",
            ChronoUnit::Weeks => "Weeks",
            ChronoUnit::Months => "Months",
            ChronoUnit::Years => "Years",
            ChronoUnit::Decades => "Decades",
            ChronoUnit::Centuries => "Centuries",
            ChronoUnit::Millennia => "Millennia",
            ChronoUnit::Eras => "Eras",
            ChronoUnit::Forever => "Forever",
            ChronoUnit::WeekBasedYears => "WeekBasedYears",
            ChronoUnit::QuarterYears => "QuarterYears",
        })
    }
}

/// The outcome of a custom field resolving itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    /// A local date-time tagged with the zone it belongs to.
    Zoned(NaiveDateTime, Zone),
}

/// Read-only access to the fields of a date, time or both.
pub trait TemporalAccessor {
    /// Whether `field` can be queried.
    fn is_supported(&self, field: &Field) -> bool;

    /// The value of `field`, `None` if it is not supported.
    fn get_long(&self, field: &Field) -> Option<i64>;

    fn query_date(&self) -> Option<NaiveDate> {
        None
    }

    fn query_time(&self) -> Option<NaiveTime> {
        None
    }

    fn query_zone(&self) -> Option<Zone> {
        None
    }

    fn query_chronology(&self) -> Option<&dyn Chronology> {
        None
    }
}

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// The value of a date-based built-in field.
pub(crate) fn date_field(date: NaiveDate, field: ChronoField) -> Option<i64> {
    let dom = i64::from(date.day());
    let doy = i64::from(date.ordinal());
    let year = i64::from(date.year());
    let value = match field {
        ChronoField::DayOfWeek => i64::from(date.weekday().number_from_monday()),
        ChronoField::AlignedDayOfWeekInMonth => (dom - 1) % 7 + 1,
        ChronoField::AlignedDayOfWeekInYear => (doy - 1) % 7 + 1,
        ChronoField::DayOfMonth => dom,
        ChronoField::DayOfYear => doy,
        ChronoField::EpochDay => epoch_day(date),
        ChronoField::AlignedWeekOfMonth => (dom - 1) / 7 + 1,
        ChronoField::AlignedWeekOfYear => (doy - 1) / 7 + 1,
        ChronoField::MonthOfYear => i64::from(date.month()),
        ChronoField::ProlepticMonth => year * 12 + i64::from(date.month0()),
        ChronoField::YearOfEra => {
            if year >= 1 {
                year
            } else {
                1 - year
            }
        }
        ChronoField::Year => year,
        ChronoField::Era => i64::from(year >= 1),
        _ => return None,
    };
    Some(value)
}

/// The value of a time-based built-in field.
pub(crate) fn time_field(time: NaiveTime, field: ChronoField) -> Option<i64> {
    let hour = i64::from(time.hour());
    let second_of_day = i64::from(time.num_seconds_from_midnight());
    // chrono stores a leap second as an overflowing nano-of-second
    let nano = i64::from(time.nanosecond()) % NANOS_PER_SECOND;
    let nano_of_day = second_of_day * NANOS_PER_SECOND + nano;
    let value = match field {
        ChronoField::NanoOfSecond => nano,
        ChronoField::NanoOfDay => nano_of_day,
        ChronoField::MicroOfSecond => nano / 1_000,
        ChronoField::MicroOfDay => nano_of_day / 1_000,
        ChronoField::MilliOfSecond => nano / 1_000_000,
        ChronoField::MilliOfDay => nano_of_day / 1_000_000,
        ChronoField::SecondOfMinute => i64::from(time.second()),
        ChronoField::SecondOfDay => second_of_day,
        ChronoField::MinuteOfHour => i64::from(time.minute()),
        ChronoField::MinuteOfDay => hour * 60 + i64::from(time.minute()),
        ChronoField::HourOfAmPm => hour % 12,
        ChronoField::ClockHourOfAmPm => {
            if hour % 12 == 0 {
                12
            } else {
                hour % 12
            }
        }
        ChronoField::HourOfDay => hour,
        ChronoField::ClockHourOfDay => {
            if hour == 0 {
                24
            } else {
                hour
            }
        }
        ChronoField::AmPmOfDay => hour / 12,
        _ => return None,
    };
    Some(value)
}

/// The range of a date-based built-in field refined by `date`.
pub(crate) fn date_range(date: NaiveDate, field: ChronoField) -> ValueRange {
    match field {
        ChronoField::DayOfMonth => ValueRange::of(1, i64::from(month_length(date))),
        ChronoField::DayOfYear => ValueRange::of(1, if date.leap_year() { 366 } else { 365 }),
        ChronoField::AlignedWeekOfMonth => {
            let max = if date.month() == 2 && !date.leap_year() { 4 } else { 5 };
            ValueRange::of(1, max)
        }
        ChronoField::YearOfEra => {
            let max = if date.year() <= 0 { MAX_YEAR + 1 } else { MAX_YEAR };
            ValueRange::of(1, max)
        }
        _ => field.range(),
    }
}

pub(crate) fn epoch_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - 719_163
}

pub(crate) fn month_length(date: NaiveDate) -> u32 {
    match date.month() {
        2 if date.leap_year() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn custom_value(field: &Field, temporal: &dyn TemporalAccessor) -> Option<i64> {
    match field {
        Field::Custom(custom) if custom.inner().is_supported_by(temporal) => {
            custom.inner().get_from(temporal)
        }
        _ => None,
    }
}

impl TemporalAccessor for NaiveDate {
    fn is_supported(&self, field: &Field) -> bool {
        match field {
            Field::Chrono(field) => field.is_date_based(),
            Field::Custom(custom) => custom.inner().is_supported_by(self),
        }
    }

    fn get_long(&self, field: &Field) -> Option<i64> {
        match field {
            Field::Chrono(chrono_field) => date_field(*self, *chrono_field),
            Field::Custom(_) => custom_value(field, self),
        }
    }

    fn query_date(&self) -> Option<NaiveDate> {
        Some(*self)
    }

    fn query_chronology(&self) -> Option<&dyn Chronology> {
        Some(&IsoChronology)
    }
}

impl TemporalAccessor for NaiveTime {
    fn is_supported(&self, field: &Field) -> bool {
        match field {
            Field::Chrono(field) => field.is_time_based(),
            Field::Custom(custom) => custom.inner().is_supported_by(self),
        }
    }

    fn get_long(&self, field: &Field) -> Option<i64> {
        match field {
            Field::Chrono(chrono_field) => time_field(*self, *chrono_field),
            Field::Custom(_) => custom_value(field, self),
        }
    }

    fn query_time(&self) -> Option<NaiveTime> {
        Some(*self)
    }
}

impl TemporalAccessor for NaiveDateTime {
    fn is_supported(&self, field: &Field) -> bool {
        match field {
            Field::Chrono(field) => field.is_date_based() || field.is_time_based(),
            Field::Custom(custom) => custom.inner().is_supported_by(self),
        }
    }

    fn get_long(&self, field: &Field) -> Option<i64> {
        match field {
            Field::Chrono(chrono_field) if chrono_field.is_date_based() => {
                date_field(self.date(), *chrono_field)
            }
            Field::Chrono(chrono_field) => time_field(self.time(), *chrono_field),
            Field::Custom(_) => custom_value(field, self),
        }
    }

    fn query_date(&self) -> Option<NaiveDate> {
        Some(self.date())
    }

    fn query_time(&self) -> Option<NaiveTime> {
        Some(self.time())
    }

    fn query_chronology(&self) -> Option<&dyn Chronology> {
        Some(&IsoChronology)
    }
}

impl TemporalAccessor for DateTime<FixedOffset> {
    fn is_supported(&self, field: &Field) -> bool {
        match field {
            Field::Chrono(_) => true,
            Field::Custom(custom) => custom.inner().is_supported_by(self),
        }
    }

    fn get_long(&self, field: &Field) -> Option<i64> {
        match field {
            Field::Chrono(ChronoField::InstantSeconds) => Some(self.timestamp()),
            Field::Chrono(ChronoField::OffsetSeconds) => {
                Some(i64::from(self.offset().local_minus_utc()))
            }
            Field::Chrono(_) => self.naive_local().get_long(field),
            Field::Custom(_) => custom_value(field, self),
        }
    }

    fn query_date(&self) -> Option<NaiveDate> {
        Some(self.date_naive())
    }

    fn query_time(&self) -> Option<NaiveTime> {
        Some(self.time())
    }

    fn query_zone(&self) -> Option<Zone> {
        Some(Zone::Offset(*self.offset()))
    }

    fn query_chronology(&self) -> Option<&dyn Chronology> {
        Some(&IsoChronology)
    }
}
