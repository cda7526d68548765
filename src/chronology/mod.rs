//! Calendar systems.
//!
//! A [`Chronology`] constructs dates and folds date-shaped field values into
//! a date. Only the proleptic ISO calendar ships with the crate.

mod iso;

use std::fmt;

use chrono::NaiveDate;

pub use iso::IsoChronology;
pub(crate) use iso::{
    date_epoch_day, date_of, date_year_day, is_leap, next_or_same, plus_days, plus_months,
    plus_weeks, with_day_of_week, year_length,
};

use crate::error::ResolveError;
use crate::field::{ChronoField, FieldValues, ValueRange};
use crate::options::ResolverStyle;
use crate::temporal::TemporalAccessor;

/// A calendar system.
pub trait Chronology: Send + Sync + fmt::Debug {
    /// Unique id, such as `ISO`.
    fn id(&self) -> &str;

    /// Builds a date from a proleptic year, month and day-of-month.
    fn date(&self, year: i64, month: i64, day: i64) -> Result<NaiveDate, ResolveError>;

    /// Builds a date from a proleptic year and day-of-year.
    fn date_year_day(&self, year: i64, day_of_year: i64) -> Result<NaiveDate, ResolveError>;

    /// Builds a date from days since 1970-01-01.
    fn date_epoch_day(&self, epoch_day: i64) -> Result<NaiveDate, ResolveError>;

    /// The range of a built-in field in this calendar.
    fn range(&self, field: ChronoField) -> ValueRange {
        field.range()
    }

    /// Resolves built-in date fields in `values` into a date, removing
    /// the entries it consumes.
    fn resolve_date(
        &self,
        values: &mut FieldValues,
        style: ResolverStyle,
    ) -> Result<Option<NaiveDate>, ResolveError>;
}

/// The chronology of `temporal`, ISO if it does not name one.
pub fn of_temporal(temporal: &dyn TemporalAccessor) -> &dyn Chronology {
    temporal.query_chronology().unwrap_or(&IsoChronology)
}

pub(crate) fn same_chronology(a: &dyn Chronology, b: &dyn Chronology) -> bool {
    a.id() == b.id()
}
