//! Exact arithmetic used by resolution.
//!
//! Every operation fails with [`ResolveError::Overflow`] rather than
//! wrapping. Floor division and modulo round towards negative infinity.

use crate::error::ResolveError;

pub fn add(a: i64, b: i64) -> Result<i64, ResolveError> {
    a.checked_add(b)
        .ok_or(ResolveError::Overflow { operation: "add" })
}

pub fn subtract(a: i64, b: i64) -> Result<i64, ResolveError> {
    a.checked_sub(b)
        .ok_or(ResolveError::Overflow { operation: "subtract" })
}

pub fn multiply(a: i64, b: i64) -> Result<i64, ResolveError> {
    a.checked_mul(b)
        .ok_or(ResolveError::Overflow { operation: "multiply" })
}

/// Narrows to `i32`, failing if the value does not fit.
pub fn to_int(value: i64) -> Result<i32, ResolveError> {
    i32::try_from(value).map_err(|_| ResolveError::Overflow { operation: "narrow" })
}

/// Division rounding towards negative infinity.
pub fn floor_div(a: i64, b: i64) -> Result<i64, ResolveError> {
    let q = a
        .checked_div(b)
        .ok_or(ResolveError::Overflow { operation: "divide" })?;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Modulo with the sign of the divisor, so `floor_div(a, b) * b + floor_mod(a, b) == a`.
pub fn floor_mod(a: i64, b: i64) -> Result<i64, ResolveError> {
    let q = floor_div(a, b)?;
    Ok(a - q * b)
}

/// `floor_mod` for small known-positive divisors used by the week algorithms.
pub(crate) fn floor_mod_i32(a: i32, b: i32) -> i32 {
    ((a % b) + b) % b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_overflow() {
        assert_eq!(add(1, 2), Ok(3));
        assert!(matches!(
            add(i64::MAX, 1),
            Err(ResolveError::Overflow { operation: "add" })
        ));
        assert!(subtract(i64::MIN, 1).is_err());
        assert!(multiply(i64::MAX, 2).is_err());
    }

    #[test]
    fn test_floor_div_mod() {
        assert_eq!(floor_div(7, 2), Ok(3));
        assert_eq!(floor_div(-7, 2), Ok(-4));
        assert_eq!(floor_div(-8, 2), Ok(-4));
        assert_eq!(floor_mod(-7, 2), Ok(1));
        assert_eq!(floor_mod(-1, 7), Ok(6));
        assert_eq!(floor_mod(13, 7), Ok(6));
        assert!(floor_div(1, 0).is_err());
        assert!(floor_div(i64::MIN, -1).is_err());
    }

    #[test]
    fn test_floor_mod_i32() {
        assert_eq!(floor_mod_i32(-3, 7), 4);
        assert_eq!(floor_mod_i32(10, 7), 3);
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int(42), Ok(42));
        assert!(to_int(i64::from(i32::MAX) + 1).is_err());
    }
}
