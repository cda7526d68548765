//! Field identity, the field capability trait and the field-value map.
//!
//! A [`Field`] is either one of the built-in [`ChronoField`] values or an
//! opaque [`CustomField`] handle. Custom fields carry their own algorithms
//! through the [`TemporalField`] trait and are compared by their unique id,
//! so two handles built from equal definitions are the same map key.

mod chrono_field;
pub mod iso;
pub mod julian;
mod range;
pub mod week;

use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::NaiveDate;

pub use chrono_field::{ChronoField, MAX_YEAR, MIN_YEAR};
pub use range::ValueRange;
pub use week::WeekFields;

use crate::error::ResolveError;
use crate::options::ResolverStyle;
use crate::temporal::{self, ChronoUnit, Resolved, TemporalAccessor};

/// The capability set shared by every custom date or time field.
pub trait TemporalField: Send + Sync + fmt::Debug {
    /// Unique identifier; equality of fields is equality of ids.
    fn id(&self) -> &str;

    /// Human readable name.
    fn display_name(&self) -> String {
        self.id().to_string()
    }

    fn base_unit(&self) -> ChronoUnit;

    fn range_unit(&self) -> ChronoUnit;

    /// The nominal range of the field.
    fn range(&self) -> ValueRange;

    fn is_date_based(&self) -> bool;

    fn is_time_based(&self) -> bool;

    fn is_supported_by(&self, temporal: &dyn TemporalAccessor) -> bool;

    /// The range of valid values for this field in the context of `temporal`.
    fn range_refined_by(&self, temporal: &dyn TemporalAccessor) -> ValueRange {
        let _ = temporal;
        self.range()
    }

    /// Extracts the field value from `temporal`, `None` if it is unsupported.
    fn get_from(&self, temporal: &dyn TemporalAccessor) -> Option<i64>;

    /// Returns a copy of `date` with this field set to `new_value`.
    fn adjust_into(&self, date: NaiveDate, new_value: i64) -> Result<NaiveDate, ResolveError>;

    /// Folds this field, and any partner fields it needs, out of `values`.
    ///
    /// Implementations either return a resolved value, remove or replace
    /// entries in `values` and return `None`, or leave everything untouched
    /// and return `None` when the information is insufficient.
    fn resolve(
        &self,
        values: &mut FieldValues,
        partial: &dyn TemporalAccessor,
        style: ResolverStyle,
    ) -> Result<Option<Resolved>, ResolveError> {
        let _ = (values, partial, style);
        Ok(None)
    }
}

/// A shared handle to a custom field.
#[derive(Clone)]
pub struct CustomField(Arc<dyn TemporalField>);

impl CustomField {
    pub fn new<F: TemporalField + 'static>(field: F) -> Self {
        CustomField(Arc::new(field))
    }

    pub fn from_arc(field: Arc<dyn TemporalField>) -> Self {
        CustomField(field)
    }

    pub fn id(&self) -> &str {
        self.0.id()
    }

    pub fn inner(&self) -> &dyn TemporalField {
        self.0.as_ref()
    }
}

impl fmt::Debug for CustomField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomField").field(&self.id()).finish()
    }
}

impl PartialEq for CustomField {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for CustomField {}

impl Hash for CustomField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl PartialOrd for CustomField {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CustomField {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(other.id())
    }
}

/// Identity of a date or time field.
///
/// Built-in fields order before custom fields; built-in fields follow the
/// [`ChronoField`] declaration order and custom fields sort by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Chrono(ChronoField),
    Custom(CustomField),
}

impl From<ChronoField> for Field {
    fn from(field: ChronoField) -> Self {
        Field::Chrono(field)
    }
}

impl From<CustomField> for Field {
    fn from(field: CustomField) -> Self {
        Field::Custom(field)
    }
}

impl From<&Field> for Field {
    fn from(field: &Field) -> Self {
        field.clone()
    }
}

impl Field {
    /// Wraps a custom field implementation.
    pub fn custom<F: TemporalField + 'static>(field: F) -> Self {
        Field::Custom(CustomField::new(field))
    }

    pub fn as_chrono(&self) -> Option<ChronoField> {
        match self {
            Field::Chrono(field) => Some(*field),
            Field::Custom(_) => None,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Field::Chrono(field) => field.name().to_string(),
            Field::Custom(field) => field.inner().display_name(),
        }
    }

    pub fn base_unit(&self) -> ChronoUnit {
        match self {
            Field::Chrono(field) => field.base_unit(),
            Field::Custom(field) => field.inner().base_unit(),
        }
    }

    pub fn range_unit(&self) -> ChronoUnit {
        match self {
            Field::Chrono(field) => field.range_unit(),
            Field::Custom(field) => field.inner().range_unit(),
        }
    }

    pub fn range(&self) -> ValueRange {
        match self {
            Field::Chrono(field) => field.range(),
            Field::Custom(field) => field.inner().range(),
        }
    }

    pub fn is_date_based(&self) -> bool {
        match self {
            Field::Chrono(field) => field.is_date_based(),
            Field::Custom(field) => field.inner().is_date_based(),
        }
    }

    pub fn is_time_based(&self) -> bool {
        match self {
            Field::Chrono(field) => field.is_time_based(),
            Field::Custom(field) => field.inner().is_time_based(),
        }
    }

    pub fn is_supported_by(&self, temporal: &dyn TemporalAccessor) -> bool {
        temporal.is_supported(self)
    }

    /// The range of the field refined by the date held in `temporal`.
    pub fn range_refined_by(&self, temporal: &dyn TemporalAccessor) -> ValueRange {
        match self {
            Field::Chrono(field) => match temporal.query_date() {
                Some(date) if field.is_date_based() => temporal::date_range(date, *field),
                _ => field.range(),
            },
            Field::Custom(field) => field.inner().range_refined_by(temporal),
        }
    }

    pub fn get_from(&self, temporal: &dyn TemporalAccessor) -> Option<i64> {
        temporal.get_long(self)
    }

    /// Validates `value` against the nominal range of the field.
    pub fn check_valid_value(&self, value: i64) -> Result<i64, ResolveError> {
        self.range().check_valid_value(value, self)
    }

    pub fn check_valid_int_value(&self, value: i64) -> Result<i32, ResolveError> {
        self.range().check_valid_int_value(value, self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Chrono(field) => f.write_str(field.name()),
            Field::Custom(field) => f.write_str(field.id()),
        }
    }
}

/// Map from field to value with a deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    map: BTreeMap<Field, i64>,
}

impl FieldValues {
    pub fn new() -> Self {
        FieldValues::default()
    }

    pub fn get(&self, field: impl Into<Field>) -> Option<i64> {
        self.map.get(&field.into()).copied()
    }

    pub fn contains(&self, field: impl Into<Field>) -> bool {
        self.map.contains_key(&field.into())
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<Field>, value: i64) -> Option<i64> {
        self.map.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: impl Into<Field>) -> Option<i64> {
        self.map.remove(&field.into())
    }

    /// Inserts a value, failing if a different value is already present.
    pub fn add_checked(&mut self, field: impl Into<Field>, value: i64) -> Result<(), ResolveError> {
        let field = field.into();
        match self.map.get(&field) {
            Some(&existing) if existing != value => Err(ResolveError::Conflict {
                field,
                existing,
                value,
            }),
            _ => {
                self.map.insert(field, value);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// A snapshot of the keys, safe to hold while the map is mutated.
    pub fn keys(&self) -> Vec<Field> {
        self.map.keys().cloned().collect()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Field, i64> {
        self.map.iter()
    }

    pub fn retain<F: FnMut(&Field, &mut i64) -> bool>(&mut self, f: F) {
        self.map.retain(f)
    }

    pub fn clear(&mut self) {
        self.map.clear()
    }
}

impl<'a> IntoIterator for &'a FieldValues {
    type Item = (&'a Field, &'a i64);
    type IntoIter = btree_map::Iter<'a, Field, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl<F: Into<Field>> FromIterator<(F, i64)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (F, i64)>>(iter: I) -> Self {
        FieldValues {
            map: iter.into_iter().map(|(f, v)| (f.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_declaration_then_id() {
        let mut values = FieldValues::new();
        values.insert(iso::quarter_of_year(), 2);
        values.insert(ChronoField::Year, 2020);
        values.insert(ChronoField::NanoOfSecond, 5);
        values.insert(iso::day_of_quarter(), 10);
        let keys: Vec<String> = values.keys().iter().map(|f| f.to_string()).collect();
        assert_eq!(
            keys,
            vec!["NanoOfSecond", "Year", "DayOfQuarter", "QuarterOfYear"]
        );
    }

    #[test]
    fn test_custom_equality_by_id() {
        let a = WeekFields::ISO.week_of_month();
        let b = WeekFields::ISO.week_of_month();
        let c = WeekFields::SUNDAY_START.week_of_month();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_add_checked_conflict() {
        let mut values = FieldValues::new();
        values.add_checked(ChronoField::Year, 2020).unwrap();
        values.add_checked(ChronoField::Year, 2020).unwrap();
        let err = values.add_checked(ChronoField::Year, 2021).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Conflict {
                field: Field::Chrono(ChronoField::Year),
                existing: 2020,
                value: 2021,
            }
        );
    }
}
