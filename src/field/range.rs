//! The range of valid values for a field.

use std::fmt;

use crate::error::ResolveError;
use crate::field::Field;

/// An inclusive range of valid values, where the minimum and maximum may
/// themselves vary with context.
///
/// Day-of-month is `1 - 28/31`: the smallest maximum is 28 and the largest
/// is 31. Day-of-quarter is `1 - 90/92`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min_smallest: i64,
    min_largest: i64,
    max_smallest: i64,
    max_largest: i64,
}

impl ValueRange {
    /// A fixed range where both the minimum and maximum are constant.
    pub const fn of(min: i64, max: i64) -> Self {
        ValueRange {
            min_smallest: min,
            min_largest: min,
            max_smallest: max,
            max_largest: max,
        }
    }

    /// A range with a fixed minimum and a variable maximum.
    pub const fn of_variable_max(min: i64, max_smallest: i64, max_largest: i64) -> Self {
        ValueRange {
            min_smallest: min,
            min_largest: min,
            max_smallest,
            max_largest,
        }
    }

    /// A fully variable range.
    pub const fn of_variable(
        min_smallest: i64,
        min_largest: i64,
        max_smallest: i64,
        max_largest: i64,
    ) -> Self {
        ValueRange {
            min_smallest,
            min_largest,
            max_smallest,
            max_largest,
        }
    }

    pub fn minimum(&self) -> i64 {
        self.min_smallest
    }

    pub fn largest_minimum(&self) -> i64 {
        self.min_largest
    }

    pub fn smallest_maximum(&self) -> i64 {
        self.max_smallest
    }

    pub fn maximum(&self) -> i64 {
        self.max_largest
    }

    /// Returns true if the minimum and maximum never vary.
    pub fn is_fixed(&self) -> bool {
        self.min_smallest == self.min_largest && self.max_smallest == self.max_largest
    }

    /// Returns true if every value in the range fits in an `i32`.
    pub fn is_int_value(&self) -> bool {
        self.minimum() >= i64::from(i32::MIN) && self.maximum() <= i64::from(i32::MAX)
    }

    /// Checks the value against the outer bounds of the range.
    pub fn is_valid_value(&self, value: i64) -> bool {
        value >= self.minimum() && value <= self.maximum()
    }

    pub fn is_valid_int_value(&self, value: i64) -> bool {
        self.is_int_value() && self.is_valid_value(value)
    }

    /// Validates `value`, naming `field` in the error.
    pub fn check_valid_value(&self, value: i64, field: &Field) -> Result<i64, ResolveError> {
        if self.is_valid_value(value) {
            Ok(value)
        } else {
            Err(ResolveError::Range {
                field: field.clone(),
                value,
                range: *self,
            })
        }
    }

    /// Validates `value` and narrows it to `i32`.
    pub fn check_valid_int_value(&self, value: i64, field: &Field) -> Result<i32, ResolveError> {
        match i32::try_from(value) {
            Ok(narrow) if self.is_valid_value(value) => Ok(narrow),
            _ => Err(ResolveError::Range {
                field: field.clone(),
                value,
                range: *self,
            }),
        }
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.min_smallest)?;
        if self.min_smallest != self.min_largest {
            write!(f, "/{}", self.min_largest)?;
        }
        write!(f, " - {}", self.max_smallest)?;
        if self.max_smallest != self.max_largest {
            write!(f, "/{}", self.max_largest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ChronoField;

    #[test]
    fn test_display() {
        assert_eq!(ValueRange::of(1, 12).to_string(), "1 - 12");
        assert_eq!(ValueRange::of_variable_max(1, 28, 31).to_string(), "1 - 28/31");
        assert_eq!(ValueRange::of_variable(0, 1, 4, 6).to_string(), "0/1 - 4/6");
    }

    #[test]
    fn test_validity() {
        let range = ValueRange::of_variable_max(1, 90, 92);
        assert!(!range.is_fixed());
        assert!(range.is_valid_value(92));
        assert!(!range.is_valid_value(93));
        assert!(!range.is_valid_value(0));
    }

    #[test]
    fn test_check_valid_int_value() {
        let field = Field::from(ChronoField::MonthOfYear);
        let range = ValueRange::of(1, 12);
        assert_eq!(range.check_valid_int_value(7, &field), Ok(7));
        let err = range.check_valid_int_value(13, &field).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for MonthOfYear (valid values 1 - 12): 13"
        );

        let wide = ValueRange::of(i64::MIN, i64::MAX);
        assert!(!wide.is_int_value());
        assert!(wide.check_valid_int_value(i64::MAX, &field).is_err());
    }
}
