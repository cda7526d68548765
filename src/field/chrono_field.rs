//! The built-in field enumeration.

use std::fmt;

use crate::error::ResolveError;
use crate::field::{Field, ValueRange};
use crate::temporal::ChronoUnit;

/// The standard set of date and time fields.
///
/// Declaration order is significant: it is the iteration order of
/// [`FieldValues`](crate::field::FieldValues), which keeps resolution
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChronoField {
    NanoOfSecond,
    NanoOfDay,
    MicroOfSecond,
    MicroOfDay,
    MilliOfSecond,
    MilliOfDay,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfAmPm,
    ClockHourOfAmPm,
    HourOfDay,
    ClockHourOfDay,
    AmPmOfDay,
    DayOfWeek,
    AlignedDayOfWeekInMonth,
    AlignedDayOfWeekInYear,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    AlignedWeekOfMonth,
    AlignedWeekOfYear,
    MonthOfYear,
    ProlepticMonth,
    YearOfEra,
    Year,
    Era,
    InstantSeconds,
    OffsetSeconds,
}

/// Largest year the field ranges admit.
pub const MAX_YEAR: i64 = 999_999_999;
/// Smallest year the field ranges admit.
pub const MIN_YEAR: i64 = -999_999_999;

const NANOS_PER_DAY: i64 = 86_400 * 1_000_000_000;

impl ChronoField {
    pub const ALL: [ChronoField; 30] = [
        ChronoField::NanoOfSecond,
        ChronoField::NanoOfDay,
        ChronoField::MicroOfSecond,
        ChronoField::MicroOfDay,
        ChronoField::MilliOfSecond,
        ChronoField::MilliOfDay,
        ChronoField::SecondOfMinute,
        ChronoField::SecondOfDay,
        ChronoField::MinuteOfHour,
        ChronoField::MinuteOfDay,
        ChronoField::HourOfAmPm,
        ChronoField::ClockHourOfAmPm,
        ChronoField::HourOfDay,
        ChronoField::ClockHourOfDay,
        ChronoField::AmPmOfDay,
        ChronoField::DayOfWeek,
        ChronoField::AlignedDayOfWeekInMonth,
        ChronoField::AlignedDayOfWeekInYear,
        ChronoField::DayOfMonth,
        ChronoField::DayOfYear,
        ChronoField::EpochDay,
        ChronoField::AlignedWeekOfMonth,
        ChronoField::AlignedWeekOfYear,
        ChronoField::MonthOfYear,
        ChronoField::ProlepticMonth,
        ChronoField::YearOfEra,
        ChronoField::Year,
        ChronoField::Era,
        ChronoField::InstantSeconds,
        ChronoField::OffsetSeconds,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChronoField::NanoOfSecond => "NanoOfSecond",
            ChronoField::NanoOfDay => "NanoOfDay",
            ChronoField::MicroOfSecond => "MicroOfSecond",
            ChronoField::MicroOfDay => "MicroOfDay",
            ChronoField::MilliOfSecond => "MilliOfSecond",
            ChronoField::MilliOfDay => "MilliOfDay",
            ChronoField::SecondOfMinute => "SecondOfMinute",
            ChronoField::SecondOfDay => "SecondOfDay",
            ChronoField::MinuteOfHour => "MinuteOfHour",
            ChronoField::MinuteOfDay => "MinuteOfDay",
            ChronoField::HourOfAmPm => "HourOfAmPm",
            ChronoField::ClockHourOfAmPm => "ClockHourOfAmPm",
            ChronoField::HourOfDay => "HourOfDay",
            ChronoField::ClockHourOfDay => "ClockHourOfDay",
            ChronoField::AmPmOfDay => "AmPmOfDay",
            ChronoField::DayOfWeek => "DayOfWeek",
            ChronoField::AlignedDayOfWeekInMonth => "AlignedDayOfWeekInMonth",
            ChronoField::AlignedDayOfWeekInYear => "AlignedDayOfWeekInYear",
            ChronoField::DayOfMonth => "DayOfMonth",
            ChronoField::DayOfYear => "DayOfYear",
            ChronoField::EpochDay => "EpochDay",
            ChronoField::AlignedWeekOfMonth => "AlignedWeekOfMonth",
            ChronoField::AlignedWeekOfYear => "AlignedWeekOfYear",
            ChronoField::MonthOfYear => "MonthOfYear",
            ChronoField::ProlepticMonth => "ProlepticMonth",
            ChronoField::YearOfEra => "YearOfEra",
            ChronoField::Year => "Year",
            ChronoField::Era => "Era",
            ChronoField::InstantSeconds => "InstantSeconds",
            ChronoField::OffsetSeconds => "OffsetSeconds",
        }
    }

    pub fn base_unit(&self) -> ChronoUnit {
        use ChronoField::*;
        match self {
            NanoOfSecond | NanoOfDay => ChronoUnit::Nanos,
            MicroOfSecond | MicroOfDay => ChronoUnit::Micros,
            MilliOfSecond | MilliOfDay => ChronoUnit::Millis,
            SecondOfMinute | SecondOfDay | InstantSeconds | OffsetSeconds => ChronoUnit::Seconds,
            MinuteOfHour | MinuteOfDay => ChronoUnit::Minutes,
            HourOfAmPm | ClockHourOfAmPm | HourOfDay | ClockHourOfDay => ChronoUnit::Hours,
            AmPmOfDay => ChronoUnit::HalfDays,
            DayOfWeek | AlignedDayOfWeekInMonth | AlignedDayOfWeekInYear | DayOfMonth
            | DayOfYear | EpochDay => ChronoUnit::Days,
            AlignedWeekOfMonth | AlignedWeekOfYear => ChronoUnit::Weeks,
            MonthOfYear | ProlepticMonth => ChronoUnit::Months,
            YearOfEra | Year => ChronoUnit::Years,
            Era => ChronoUnit::Eras,
        }
    }

    pub fn range_unit(&self) -> ChronoUnit {
        use ChronoField::*;
        match self {
            NanoOfSecond | MicroOfSecond | MilliOfSecond => ChronoUnit::Seconds,
            SecondOfMinute => ChronoUnit::Minutes,
            MinuteOfHour => ChronoUnit::Hours,
            HourOfAmPm | ClockHourOfAmPm => ChronoUnit::HalfDays,
            NanoOfDay | MicroOfDay | MilliOfDay | SecondOfDay | MinuteOfDay | HourOfDay
            | ClockHourOfDay | AmPmOfDay => ChronoUnit::Days,
            DayOfWeek | AlignedDayOfWeekInMonth | AlignedDayOfWeekInYear => ChronoUnit::Weeks,
            DayOfMonth | AlignedWeekOfMonth => ChronoUnit::Months,
            DayOfYear | AlignedWeekOfYear | MonthOfYear => ChronoUnit::Years,
            YearOfEra => ChronoUnit::Eras,
            EpochDay | ProlepticMonth | Year | Era | InstantSeconds | OffsetSeconds => {
                ChronoUnit::Forever
            }
        }
    }

    /// The nominal range of the field, independent of any date.
    pub fn range(&self) -> ValueRange {
        use ChronoField::*;
        match self {
            NanoOfSecond => ValueRange::of(0, 999_999_999),
            NanoOfDay => ValueRange::of(0, NANOS_PER_DAY - 1),
            MicroOfSecond => ValueRange::of(0, 999_999),
            MicroOfDay => ValueRange::of(0, NANOS_PER_DAY / 1_000 - 1),
            MilliOfSecond => ValueRange::of(0, 999),
            MilliOfDay => ValueRange::of(0, NANOS_PER_DAY / 1_000_000 - 1),
            SecondOfMinute => ValueRange::of(0, 59),
            SecondOfDay => ValueRange::of(0, 86_400 - 1),
            MinuteOfHour => ValueRange::of(0, 59),
            MinuteOfDay => ValueRange::of(0, 24 * 60 - 1),
            HourOfAmPm => ValueRange::of(0, 11),
            ClockHourOfAmPm => ValueRange::of(1, 12),
            HourOfDay => ValueRange::of(0, 23),
            ClockHourOfDay => ValueRange::of(1, 24),
            AmPmOfDay => ValueRange::of(0, 1),
            DayOfWeek | AlignedDayOfWeekInMonth | AlignedDayOfWeekInYear => ValueRange::of(1, 7),
            DayOfMonth => ValueRange::of_variable_max(1, 28, 31),
            DayOfYear => ValueRange::of_variable_max(1, 365, 366),
            EpochDay => ValueRange::of(-365_243_219_162, 365_241_780_471),
            AlignedWeekOfMonth => ValueRange::of_variable_max(1, 4, 5),
            AlignedWeekOfYear => ValueRange::of(1, 53),
            MonthOfYear => ValueRange::of(1, 12),
            ProlepticMonth => ValueRange::of(MIN_YEAR * 12, MAX_YEAR * 12 + 11),
            YearOfEra => ValueRange::of_variable_max(1, MAX_YEAR, MAX_YEAR + 1),
            Year => ValueRange::of(MIN_YEAR, MAX_YEAR),
            Era => ValueRange::of(0, 1),
            InstantSeconds => ValueRange::of(i64::MIN, i64::MAX),
            OffsetSeconds => ValueRange::of(-18 * 3600, 18 * 3600),
        }
    }

    pub fn is_date_based(&self) -> bool {
        *self >= ChronoField::DayOfWeek && *self <= ChronoField::Era
    }

    pub fn is_time_based(&self) -> bool {
        *self < ChronoField::DayOfWeek
    }

    /// Validates against the nominal range.
    pub fn check_valid_value(&self, value: i64) -> Result<i64, ResolveError> {
        self.range().check_valid_value(value, &Field::Chrono(*self))
    }

    /// Validates against the nominal range and narrows to `i32`.
    pub fn check_valid_int_value(&self, value: i64) -> Result<i32, ResolveError> {
        self.range().check_valid_int_value(value, &Field::Chrono(*self))
    }
}

impl fmt::Display for ChronoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_partition() {
        for field in ChronoField::ALL {
            // instant and offset are neither
            let either = field.is_date_based() || field.is_time_based();
            let special = matches!(field, ChronoField::InstantSeconds | ChronoField::OffsetSeconds);
            assert_eq!(either, !special, "{field}");
            assert!(!(field.is_date_based() && field.is_time_based()));
        }
    }

    #[test]
    fn test_ranges() {
        assert_eq!(ChronoField::DayOfMonth.range().to_string(), "1 - 28/31");
        assert_eq!(ChronoField::ClockHourOfDay.range().maximum(), 24);
        assert!(ChronoField::HourOfDay.check_valid_value(24).is_err());
        assert_eq!(ChronoField::MonthOfYear.check_valid_int_value(12), Ok(12));
    }

    #[test]
    fn test_units() {
        assert_eq!(ChronoField::DayOfMonth.base_unit(), ChronoUnit::Days);
        assert_eq!(ChronoField::DayOfMonth.range_unit(), ChronoUnit::Months);
        assert_eq!(ChronoField::Year.range_unit(), ChronoUnit::Forever);
    }
}
