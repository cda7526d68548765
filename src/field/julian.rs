//! Day counts from astronomical and historical epochs.

use chrono::NaiveDate;

use crate::chronology;
use crate::error::ResolveError;
use crate::field::{ChronoField, Field, FieldValues, TemporalField, ValueRange};
use crate::math;
use crate::options::ResolverStyle;
use crate::temporal::{self, ChronoUnit, Resolved, TemporalAccessor};

#[derive(Debug)]
struct DayCountField {
    name: &'static str,
    /// Value of the field on 1970-01-01.
    offset: i64,
}

const JULIAN_DAY: DayCountField = DayCountField {
    name: "JulianDay",
    offset: 2_440_588,
};

const MODIFIED_JULIAN_DAY: DayCountField = DayCountField {
    name: "ModifiedJulianDay",
    offset: 40_587,
};

const RATA_DIE: DayCountField = DayCountField {
    name: "RataDie",
    offset: 719_163,
};

/// Days since noon on 4713-11-24 BCE in the proleptic Gregorian calendar,
/// counted at midnight.
pub fn julian_day() -> Field {
    Field::custom(JULIAN_DAY)
}

/// Days since 1858-11-17.
pub fn modified_julian_day() -> Field {
    Field::custom(MODIFIED_JULIAN_DAY)
}

/// Days since 0001-01-01, which is day 1.
pub fn rata_die() -> Field {
    Field::custom(RATA_DIE)
}

impl DayCountField {
    fn me(&self) -> Field {
        Field::custom(DayCountField {
            name: self.name,
            offset: self.offset,
        })
    }
}

impl TemporalField for DayCountField {
    fn id(&self) -> &str {
        self.name
    }

    fn base_unit(&self) -> ChronoUnit {
        ChronoUnit::Days
    }

    fn range_unit(&self) -> ChronoUnit {
        ChronoUnit::Forever
    }

    fn range(&self) -> ValueRange {
        let epoch = ChronoField::EpochDay.range();
        ValueRange::of(epoch.minimum() + self.offset, epoch.maximum() + self.offset)
    }

    fn is_date_based(&self) -> bool {
        true
    }

    fn is_time_based(&self) -> bool {
        false
    }

    fn is_supported_by(&self, temporal: &dyn TemporalAccessor) -> bool {
        temporal.is_supported(&Field::Chrono(ChronoField::EpochDay))
    }

    fn get_from(&self, temporal: &dyn TemporalAccessor) -> Option<i64> {
        let epoch_day = match temporal.query_date() {
            Some(date) => temporal::epoch_day(date),
            None => temporal.get_long(&Field::Chrono(ChronoField::EpochDay))?,
        };
        epoch_day.checked_add(self.offset)
    }

    fn adjust_into(&self, _date: NaiveDate, new_value: i64) -> Result<NaiveDate, ResolveError> {
        let new_value = self.range().check_valid_value(new_value, &self.me())?;
        chronology::date_epoch_day(new_value - self.offset)
    }

    fn resolve(
        &self,
        values: &mut FieldValues,
        partial: &dyn TemporalAccessor,
        style: ResolverStyle,
    ) -> Result<Option<Resolved>, ResolveError> {
        let Some(value) = values.remove(self.me()) else {
            return Ok(None);
        };
        let chrono = chronology::of_temporal(partial);
        let epoch_day = if style == ResolverStyle::Lenient {
            math::subtract(value, self.offset)?
        } else {
            self.range().check_valid_value(value, &self.me())?;
            value - self.offset
        };
        Ok(Some(Resolved::Date(chrono.date_epoch_day(epoch_day)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_counts() {
        let epoch = ymd(1970, 1, 1);
        assert_eq!(julian_day().get_from(&epoch), Some(2_440_588));
        assert_eq!(modified_julian_day().get_from(&epoch), Some(40_587));
        assert_eq!(rata_die().get_from(&epoch), Some(719_163));
        assert_eq!(rata_die().get_from(&ymd(1, 1, 1)), Some(1));
        assert_eq!(modified_julian_day().get_from(&ymd(1858, 11, 17)), Some(0));
    }

    #[test]
    fn test_resolve() {
        let mut values: FieldValues = [(modified_julian_day(), 0)].into_iter().collect();
        let Field::Custom(field) = modified_julian_day() else {
            panic!("custom field expected");
        };
        let resolved = field
            .inner()
            .resolve(&mut values, &ymd(2000, 1, 1), ResolverStyle::Smart)
            .unwrap();
        assert_eq!(resolved, Some(Resolved::Date(ymd(1858, 11, 17))));
        assert!(values.is_empty());
    }

    #[test]
    fn test_range() {
        let range = julian_day().range();
        assert_eq!(range.minimum(), ChronoField::EpochDay.range().minimum() + 2_440_588);
        assert!(julian_day().check_valid_value(range.maximum() + 1).is_err());
    }
}
