//! Error types for building, formatting, parsing and resolving.

use thiserror::Error;

use crate::field::{Field, ValueRange};
use crate::options::TextStyle;
use crate::temporal::ChronoUnit;

/// Errors raised while assembling a formatter, either through the builder
/// or by compiling a pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("{what} width must be from {min} to {max} inclusive but was {width}")]
    InvalidWidth {
        what: &'static str,
        width: usize,
        min: usize,
        max: usize,
    },

    #[error("maximum width must exceed or equal the minimum width but {max_width} < {min_width}")]
    WidthOrder { min_width: usize, max_width: usize },

    #[error("the pad width must be at least one but was {width}")]
    InvalidPadWidth { width: usize },

    #[error("field {field} must have a fixed set of values to be printed as a fraction")]
    VariableRange { field: Field },

    #[error("fractional digits must be from -1 to 9 inclusive but was {digits}")]
    InvalidFractionalDigits { digits: i32 },

    #[error("localized offset style must be FULL or SHORT but was {style}")]
    InvalidLocalizedOffsetStyle { style: TextStyle },

    #[error("either the date or time style must be present")]
    MissingLocalizedStyle,

    #[error("cannot call optional_end() as there was no previous call to optional_start()")]
    UnmatchedOptionalEnd,

    #[error("invalid zone offset pattern: {pattern}")]
    InvalidOffsetPattern { pattern: String },

    #[error("base value {base} is outside the valid range of {field}")]
    InvalidBaseValue { field: Field, base: i64 },

    #[error("minimal days in first week must be from 1 to 7 but was {days}")]
    InvalidMinimalDays { days: u8 },

    #[error("invalid pattern '{pattern}' at position {position}: {reason}")]
    Pattern {
        pattern: String,
        position: usize,
        reason: String,
    },
}

/// Errors that can occur when formatting a temporal value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("unable to obtain {field} from the temporal value")]
    FieldUnavailable { field: Field },

    #[error("field {field} cannot be printed as the value {value} exceeds the maximum print width of {max_width}")]
    ExceedsWidth {
        field: Field,
        value: i64,
        max_width: usize,
    },

    #[error("field {field} cannot be printed as the value {value} cannot be negative according to the sign style")]
    NegativeValue { field: Field, value: i64 },

    #[error("cannot print as output of {len} characters exceeds pad width of {width}")]
    PadWidthExceeded { len: usize, width: usize },

    #[error("unable to obtain a zone from the temporal value")]
    ZoneUnavailable,

    #[error("unable to obtain a chronology from the temporal value")]
    ChronologyUnavailable,

    #[error("offset of {seconds} seconds is outside the printable range")]
    InvalidOffset { seconds: i64 },

    #[error("localized pattern could not be compiled: {0}")]
    Pattern(#[from] BuildError),

    #[error("instant could not be formatted: {0}")]
    Resolve(#[from] ResolveError),
}

/// Errors produced while folding parsed field values into a date or time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("invalid value for {field} (valid values {range}): {value}")]
    Range {
        field: Field,
        value: i64,
        range: ValueRange,
    },

    #[error("conflict found: {field} {existing} differs from {field} {value}")]
    Conflict {
        field: Field,
        existing: i64,
        value: i64,
    },

    #[error("conflict found: fields resolved to two different {what}: {existing} {value}")]
    ConflictingValues {
        what: &'static str,
        existing: String,
        value: String,
    },

    #[error("strict mode rejected resolved date as {field} {value} rolls over into a different unit of {unit}")]
    Rollover {
        field: Field,
        value: i64,
        unit: ChronoUnit,
    },

    #[error("one of the parsed fields has an incorrectly implemented resolve method ({passes} passes without reaching a fixed point)")]
    NonTerminating { passes: usize },

    #[error("arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    #[error("invalid date: {reason}")]
    InvalidDate { reason: String },

    #[error("unable to find offset rules for zone {zone}")]
    UnknownZone { zone: String },

    #[error("field {field} requires the ISO chronology but {chronology} was in effect")]
    UnsupportedChronology { field: Field, chronology: String },
}

/// Errors returned by the resolving parse entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("text '{text}' could not be parsed at index {index}")]
    Mismatch { text: String, index: usize },

    #[error("text '{text}' could not be parsed, unparsed text found at index {index}")]
    Unparsed { text: String, index: usize },

    #[error("text '{text}' could not be parsed: {source}")]
    Resolve {
        text: String,
        #[source]
        source: ResolveError,
    },

    #[error("text '{text}' was parsed but did not resolve to a {what}")]
    Incomplete { text: String, what: &'static str },
}
