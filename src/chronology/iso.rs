//! The proleptic ISO calendar and date arithmetic helpers.

use chrono::{Datelike, Days, NaiveDate};

use crate::chronology::Chronology;
use crate::error::ResolveError;
use crate::field::{ChronoField, Field, FieldValues};
use crate::math;
use crate::options::ResolverStyle;
use crate::temporal::{self, ChronoUnit};

/// The ISO-8601 calendar, extended proleptically before 1582.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsoChronology;

pub(crate) fn is_leap(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn year_length(year: i64) -> i64 {
    if is_leap(year) {
        366
    } else {
        365
    }
}

fn invalid(reason: String) -> ResolveError {
    ResolveError::InvalidDate { reason }
}

pub(crate) fn date_of(year: i64, month: i64, day: i64) -> Result<NaiveDate, ResolveError> {
    let build = || -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::try_from(year).ok()?,
            u32::try_from(month).ok()?,
            u32::try_from(day).ok()?,
        )
    };
    build().ok_or_else(|| invalid(format!("year {year} month {month} day {day} does not exist")))
}

pub(crate) fn date_year_day(year: i64, day_of_year: i64) -> Result<NaiveDate, ResolveError> {
    let build = || -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(i32::try_from(year).ok()?, u32::try_from(day_of_year).ok()?)
    };
    build().ok_or_else(|| invalid(format!("day-of-year {day_of_year} does not exist in year {year}")))
}

pub(crate) fn date_epoch_day(epoch_day: i64) -> Result<NaiveDate, ResolveError> {
    let days_from_ce = math::add(epoch_day, 719_163)?;
    i32::try_from(days_from_ce)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| invalid(format!("epoch-day {epoch_day} is outside the supported range")))
}

pub(crate) fn plus_days(date: NaiveDate, days: i64) -> Result<NaiveDate, ResolveError> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| invalid(format!("{date} plus {days} days is outside the supported range")))
}

pub(crate) fn plus_weeks(date: NaiveDate, weeks: i64) -> Result<NaiveDate, ResolveError> {
    plus_days(date, math::multiply(weeks, 7)?)
}

/// Adds months, clamping the day-of-month to the length of the new month.
pub(crate) fn plus_months(date: NaiveDate, months: i64) -> Result<NaiveDate, ResolveError> {
    if months == 0 {
        return Ok(date);
    }
    let current = i64::from(date.year()) * 12 + i64::from(date.month0());
    let total = math::add(current, months)?;
    let year = math::floor_div(total, 12)?;
    let month = math::floor_mod(total, 12)? + 1;
    let first = date_of(year, month, 1)?;
    let day = i64::from(date.day()).min(i64::from(temporal::month_length(first)));
    date_of(year, month, day)
}

/// The first date on or after `date` falling on ISO day-of-week `dow`.
pub(crate) fn next_or_same(date: NaiveDate, dow: i64) -> Result<NaiveDate, ResolveError> {
    let current = i64::from(date.weekday().number_from_monday());
    plus_days(date, (dow - current).rem_euclid(7))
}

/// The date in the same Monday-based week falling on ISO day-of-week `dow`.
pub(crate) fn with_day_of_week(date: NaiveDate, dow: i64) -> Result<NaiveDate, ResolveError> {
    let current = i64::from(date.weekday().number_from_monday());
    plus_days(date, dow - current)
}

fn take(values: &mut FieldValues, field: ChronoField) -> Result<i64, ResolveError> {
    // callers check presence first
    values.remove(field).ok_or(ResolveError::InvalidDate {
        reason: format!("{field} is missing"),
    })
}

fn check_int(field: ChronoField, value: i64) -> Result<i64, ResolveError> {
    field.check_valid_int_value(value).map(i64::from)
}

fn rollover(field: ChronoField, value: i64, unit: ChronoUnit) -> ResolveError {
    ResolveError::Rollover {
        field: Field::Chrono(field),
        value,
        unit,
    }
}

impl IsoChronology {
    fn resolve_proleptic_month(
        &self,
        values: &mut FieldValues,
        style: ResolverStyle,
    ) -> Result<(), ResolveError> {
        if let Some(proleptic) = values.remove(ChronoField::ProlepticMonth) {
            if style != ResolverStyle::Lenient {
                ChronoField::ProlepticMonth.check_valid_value(proleptic)?;
            }
            values.add_checked(ChronoField::MonthOfYear, math::floor_mod(proleptic, 12)? + 1)?;
            values.add_checked(ChronoField::Year, math::floor_div(proleptic, 12)?)?;
        }
        Ok(())
    }

    fn resolve_year_of_era(
        &self,
        values: &mut FieldValues,
        style: ResolverStyle,
    ) -> Result<(), ResolveError> {
        let Some(year_of_era) = values.remove(ChronoField::YearOfEra) else {
            if let Some(era) = values.get(ChronoField::Era) {
                ChronoField::Era.check_valid_value(era)?;
            }
            return Ok(());
        };
        if style != ResolverStyle::Lenient {
            ChronoField::YearOfEra.check_valid_value(year_of_era)?;
        }
        match values.remove(ChronoField::Era) {
            None => {
                let year = values.get(ChronoField::Year);
                if style == ResolverStyle::Strict {
                    // no era is invented, but an explicit year is cross-checked
                    match year {
                        Some(year) => {
                            let proleptic = if year > 0 {
                                year_of_era
                            } else {
                                math::subtract(1, year_of_era)?
                            };
                            values.add_checked(ChronoField::Year, proleptic)?;
                        }
                        None => {
                            values.insert(ChronoField::YearOfEra, year_of_era);
                        }
                    }
                } else {
                    let proleptic = match year {
                        Some(year) if year <= 0 => math::subtract(1, year_of_era)?,
                        _ => year_of_era,
                    };
                    values.add_checked(ChronoField::Year, proleptic)?;
                }
            }
            Some(1) => values.add_checked(ChronoField::Year, year_of_era)?,
            Some(0) => values.add_checked(ChronoField::Year, math::subtract(1, year_of_era)?)?,
            Some(era) => {
                ChronoField::Era.check_valid_value(era)?;
            }
        }
        Ok(())
    }

    fn resolve_ymd(&self, values: &mut FieldValues, style: ResolverStyle) -> Result<NaiveDate, ResolveError> {
        let year = check_int(ChronoField::Year, take(values, ChronoField::Year)?)?;
        if style == ResolverStyle::Lenient {
            let months = math::subtract(take(values, ChronoField::MonthOfYear)?, 1)?;
            let days = math::subtract(take(values, ChronoField::DayOfMonth)?, 1)?;
            let date = plus_months(date_of(year, 1, 1)?, months)?;
            return plus_days(date, days);
        }
        let month = check_int(ChronoField::MonthOfYear, take(values, ChronoField::MonthOfYear)?)?;
        let mut day = check_int(ChronoField::DayOfMonth, take(values, ChronoField::DayOfMonth)?)?;
        if style == ResolverStyle::Smart {
            // clamp to the last valid day of the month
            let length = match month {
                4 | 6 | 9 | 11 => 30,
                2 if is_leap(year) => 29,
                2 => 28,
                _ => 31,
            };
            day = day.min(length);
        }
        date_of(year, month, day)
    }

    fn resolve_ymaa(&self, values: &mut FieldValues, style: ResolverStyle) -> Result<NaiveDate, ResolveError> {
        let year = check_int(ChronoField::Year, take(values, ChronoField::Year)?)?;
        if style == ResolverStyle::Lenient {
            let months = math::subtract(take(values, ChronoField::MonthOfYear)?, 1)?;
            let weeks = math::subtract(take(values, ChronoField::AlignedWeekOfMonth)?, 1)?;
            let days = math::subtract(take(values, ChronoField::AlignedDayOfWeekInMonth)?, 1)?;
            let date = plus_months(date_of(year, 1, 1)?, months)?;
            return plus_days(plus_weeks(date, weeks)?, days);
        }
        let month = check_int(ChronoField::MonthOfYear, take(values, ChronoField::MonthOfYear)?)?;
        let week = check_int(
            ChronoField::AlignedWeekOfMonth,
            take(values, ChronoField::AlignedWeekOfMonth)?,
        )?;
        let day = check_int(
            ChronoField::AlignedDayOfWeekInMonth,
            take(values, ChronoField::AlignedDayOfWeekInMonth)?,
        )?;
        let date = plus_days(date_of(year, month, 1)?, (week - 1) * 7 + (day - 1))?;
        if style == ResolverStyle::Strict && i64::from(date.month()) != month {
            return Err(rollover(ChronoField::AlignedWeekOfMonth, week, ChronoUnit::Months));
        }
        Ok(date)
    }

    fn resolve_ymad(&self, values: &mut FieldValues, style: ResolverStyle) -> Result<NaiveDate, ResolveError> {
        let year = check_int(ChronoField::Year, take(values, ChronoField::Year)?)?;
        if style == ResolverStyle::Lenient {
            let months = math::subtract(take(values, ChronoField::MonthOfYear)?, 1)?;
            let weeks = math::subtract(take(values, ChronoField::AlignedWeekOfMonth)?, 1)?;
            let dow = take(values, ChronoField::DayOfWeek)?;
            return resolve_aligned(date_of(year, 1, 1)?, months, weeks, dow);
        }
        let month = check_int(ChronoField::MonthOfYear, take(values, ChronoField::MonthOfYear)?)?;
        let week = check_int(
            ChronoField::AlignedWeekOfMonth,
            take(values, ChronoField::AlignedWeekOfMonth)?,
        )?;
        let dow = check_int(ChronoField::DayOfWeek, take(values, ChronoField::DayOfWeek)?)?;
        let date = plus_days(date_of(year, month, 1)?, (week - 1) * 7)?;
        let date = next_or_same(date, dow)?;
        if style == ResolverStyle::Strict && i64::from(date.month()) != month {
            return Err(rollover(ChronoField::AlignedWeekOfMonth, week, ChronoUnit::Months));
        }
        Ok(date)
    }

    fn resolve_yd(&self, values: &mut FieldValues, style: ResolverStyle) -> Result<NaiveDate, ResolveError> {
        let year = check_int(ChronoField::Year, take(values, ChronoField::Year)?)?;
        if style == ResolverStyle::Lenient {
            let days = math::subtract(take(values, ChronoField::DayOfYear)?, 1)?;
            return plus_days(date_year_day(year, 1)?, days);
        }
        let day = check_int(ChronoField::DayOfYear, take(values, ChronoField::DayOfYear)?)?;
        // smart behaves as strict
        date_year_day(year, day)
    }

    fn resolve_yaa(&self, values: &mut FieldValues, style: ResolverStyle) -> Result<NaiveDate, ResolveError> {
        let year = check_int(ChronoField::Year, take(values, ChronoField::Year)?)?;
        if style == ResolverStyle::Lenient {
            let weeks = math::subtract(take(values, ChronoField::AlignedWeekOfYear)?, 1)?;
            let days = math::subtract(take(values, ChronoField::AlignedDayOfWeekInYear)?, 1)?;
            return plus_days(plus_weeks(date_year_day(year, 1)?, weeks)?, days);
        }
        let week = check_int(
            ChronoField::AlignedWeekOfYear,
            take(values, ChronoField::AlignedWeekOfYear)?,
        )?;
        let day = check_int(
            ChronoField::AlignedDayOfWeekInYear,
            take(values, ChronoField::AlignedDayOfWeekInYear)?,
        )?;
        let date = plus_days(date_year_day(year, 1)?, (week - 1) * 7 + (day - 1))?;
        if style == ResolverStyle::Strict && i64::from(date.year()) != year {
            return Err(rollover(ChronoField::AlignedWeekOfYear, week, ChronoUnit::Years));
        }
        Ok(date)
    }

    fn resolve_yad(&self, values: &mut FieldValues, style: ResolverStyle) -> Result<NaiveDate, ResolveError> {
        let year = check_int(ChronoField::Year, take(values, ChronoField::Year)?)?;
        if style == ResolverStyle::Lenient {
            let weeks = math::subtract(take(values, ChronoField::AlignedWeekOfYear)?, 1)?;
            let dow = take(values, ChronoField::DayOfWeek)?;
            return resolve_aligned(date_year_day(year, 1)?, 0, weeks, dow);
        }
        let week = check_int(
            ChronoField::AlignedWeekOfYear,
            take(values, ChronoField::AlignedWeekOfYear)?,
        )?;
        let dow = check_int(ChronoField::DayOfWeek, take(values, ChronoField::DayOfWeek)?)?;
        let date = plus_days(date_year_day(year, 1)?, (week - 1) * 7)?;
        let date = next_or_same(date, dow)?;
        if style == ResolverStyle::Strict && i64::from(date.year()) != year {
            return Err(rollover(ChronoField::AlignedWeekOfYear, week, ChronoUnit::Years));
        }
        Ok(date)
    }
}

/// Lenient aligned-week arithmetic on an ISO `dow`; values outside 1..=7
/// spill into whole weeks.
fn resolve_aligned(
    base: NaiveDate,
    months: i64,
    weeks: i64,
    mut dow: i64,
) -> Result<NaiveDate, ResolveError> {
    let mut date = plus_weeks(plus_months(base, months)?, weeks)?;
    if dow > 7 {
        date = plus_weeks(date, (dow - 1) / 7)?;
        dow = (dow - 1) % 7 + 1;
    } else if dow < 1 {
        date = plus_weeks(date, math::subtract(dow, 7)? / 7)?;
        dow = (dow + 6) % 7 + 1;
    }
    next_or_same(date, dow)
}

impl Chronology for IsoChronology {
    fn id(&self) -> &str {
        "ISO"
    }

    fn date(&self, year: i64, month: i64, day: i64) -> Result<NaiveDate, ResolveError> {
        date_of(year, month, day)
    }

    fn date_year_day(&self, year: i64, day_of_year: i64) -> Result<NaiveDate, ResolveError> {
        date_year_day(year, day_of_year)
    }

    fn date_epoch_day(&self, epoch_day: i64) -> Result<NaiveDate, ResolveError> {
        date_epoch_day(epoch_day)
    }

    fn resolve_date(
        &self,
        values: &mut FieldValues,
        style: ResolverStyle,
    ) -> Result<Option<NaiveDate>, ResolveError> {
        if let Some(epoch_day) = values.remove(ChronoField::EpochDay) {
            if style != ResolverStyle::Lenient {
                ChronoField::EpochDay.check_valid_value(epoch_day)?;
            }
            return date_epoch_day(epoch_day).map(Some);
        }
        self.resolve_proleptic_month(values, style)?;
        self.resolve_year_of_era(values, style)?;
        if !values.contains(ChronoField::Year) {
            return Ok(None);
        }
        if values.contains(ChronoField::MonthOfYear) {
            if values.contains(ChronoField::DayOfMonth) {
                return self.resolve_ymd(values, style).map(Some);
            }
            if values.contains(ChronoField::AlignedWeekOfMonth) {
                if values.contains(ChronoField::AlignedDayOfWeekInMonth) {
                    return self.resolve_ymaa(values, style).map(Some);
                }
                if values.contains(ChronoField::DayOfWeek) {
                    return self.resolve_ymad(values, style).map(Some);
                }
            }
        }
        if values.contains(ChronoField::DayOfYear) {
            return self.resolve_yd(values, style).map(Some);
        }
        if values.contains(ChronoField::AlignedWeekOfYear) {
            if values.contains(ChronoField::AlignedDayOfWeekInYear) {
                return self.resolve_yaa(values, style).map(Some);
            }
            if values.contains(ChronoField::DayOfWeek) {
                return self.resolve_yad(values, style).map(Some);
            }
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

    fn values(entries: &[(ChronoField, i64)]) -> FieldValues {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_plus_months_clamps() {
        assert_eq!(plus_months(ymd(2011, 1, 31), 1).unwrap(), ymd(2011, 2, 28));
        assert_eq!(plus_months(ymd(2011, 1, 31), -2).unwrap(), ymd(2010, 11, 30));
        assert_eq!(plus_months(ymd(2011, 5, 15), 12).unwrap(), ymd(2012, 5, 15));
    }

    #[test]
    fn test_plus_days_bounds() {
        assert!(plus_days(ymd(2011, 1, 1), i64::MAX).is_err());
        assert_eq!(plus_days(ymd(2011, 1, 1), -1).unwrap(), ymd(2010, 12, 31));
        assert_eq!(next_or_same(ymd(2011, 1, 1), 1).unwrap(), ymd(2011, 1, 3));
    }

    #[test]
    fn test_resolve_ymd_styles() {
        let chrono = IsoChronology;
        let fields = [
            (ChronoField::Year, 2011),
            (ChronoField::MonthOfYear, 2),
            (ChronoField::DayOfMonth, 31),
        ];
        let mut smart = values(&fields);
        assert_eq!(
            chrono.resolve_date(&mut smart, ResolverStyle::Smart).unwrap(),
            Some(ymd(2011, 2, 28))
        );
        assert!(smart.is_empty());

        let mut lenient = values(&fields);
        assert_eq!(
            chrono.resolve_date(&mut lenient, ResolverStyle::Lenient).unwrap(),
            Some(ymd(2011, 3, 3))
        );

        let mut strict = values(&fields);
        assert!(matches!(
            chrono.resolve_date(&mut strict, ResolverStyle::Strict),
            Err(ResolveError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_year_of_era_strict_keeps_bare_value() {
        let mut fields = values(&[
            (ChronoField::YearOfEra, 2011),
            (ChronoField::MonthOfYear, 1),
            (ChronoField::DayOfMonth, 1),
        ]);
        let resolved = IsoChronology
            .resolve_date(&mut fields, ResolverStyle::Strict)
            .unwrap();
        assert_eq!(resolved, None);
        assert_eq!(fields.get(ChronoField::YearOfEra), Some(2011));

        let resolved = IsoChronology
            .resolve_date(&mut fields, ResolverStyle::Smart)
            .unwrap();
        assert_eq!(resolved, Some(ymd(2011, 1, 1)));
    }

    #[test]
    fn test_era_bce() {
        let mut fields = values(&[
            (ChronoField::YearOfEra, 5),
            (ChronoField::Era, 0),
            (ChronoField::DayOfYear, 1),
        ]);
        let resolved = IsoChronology
            .resolve_date(&mut fields, ResolverStyle::Strict)
            .unwrap();
        assert_eq!(resolved, Some(ymd(-4, 1, 1)));
    }

    #[test]
    fn test_proleptic_month_conflict() {
        let mut fields = values(&[
            (ChronoField::ProlepticMonth, 2011 * 12 + 4),
            (ChronoField::MonthOfYear, 6),
            (ChronoField::DayOfMonth, 1),
        ]);
        let err = IsoChronology
            .resolve_date(&mut fields, ResolverStyle::Smart)
            .unwrap_err();
        assert!(matches!(err, ResolveError::Conflict { .. }));
    }

    #[test]
    fn test_aligned_week_strict_rollover() {
        let fields = [
            (ChronoField::Year, 2011),
            (ChronoField::MonthOfYear, 2),
            (ChronoField::AlignedWeekOfMonth, 5),
            (ChronoField::AlignedDayOfWeekInMonth, 2),
        ];
        let mut strict = values(&fields);
        assert!(matches!(
            IsoChronology.resolve_date(&mut strict, ResolverStyle::Strict),
            Err(ResolveError::Rollover { .. })
        ));
        let mut smart = values(&fields);
        assert_eq!(
            IsoChronology.resolve_date(&mut smart, ResolverStyle::Smart).unwrap(),
            Some(ymd(2011, 3, 2))
        );
    }

    #[test]
    fn test_lenient_aligned_day_of_week() {
        let mut fields = values(&[
            (ChronoField::Year, 2011),
            (ChronoField::AlignedWeekOfYear, 1),
            (ChronoField::DayOfWeek, 1),
        ]);
        // 2011-01-01 is a Saturday; the first Monday on or after it
        let resolved = IsoChronology
            .resolve_date(&mut fields, ResolverStyle::Smart)
            .unwrap();
        assert_eq!(resolved, Some(ymd(2011, 1, 3)));
    }

    #[test]
    fn test_lenient_aligned_matches_smart_in_range() {
        let resolve = |week: i64, dow: i64| {
            let mut fields = values(&[
                (ChronoField::Year, 2011),
                (ChronoField::AlignedWeekOfYear, week),
                (ChronoField::DayOfWeek, dow),
            ]);
            IsoChronology.resolve_date(&mut fields, ResolverStyle::Lenient).unwrap()
        };
        assert_eq!(resolve(1, 1), Some(ymd(2011, 1, 3)));
        assert_eq!(resolve(1, 6), Some(ymd(2011, 1, 1)));
        assert_eq!(resolve(2, 1), Some(ymd(2011, 1, 10)));
        assert_eq!(resolve(1, 8), Some(ymd(2011, 1, 10)));
        assert_eq!(resolve(1, 0), Some(ymd(2010, 12, 26)));

        let mut fields = values(&[
            (ChronoField::Year, 2011),
            (ChronoField::MonthOfYear, 3),
            (ChronoField::AlignedWeekOfMonth, 1),
            (ChronoField::DayOfWeek, 3),
        ]);
        assert_eq!(
            IsoChronology.resolve_date(&mut fields, ResolverStyle::Lenient).unwrap(),
            Some(ymd(2011, 3, 2))
        );
    }
}
