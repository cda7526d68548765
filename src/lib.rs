//! chronofmt - pattern-driven date and time formatting and parsing
//!
//! This crate prints temporal values through a tree of printer-parser nodes
//! and parses text back through the same tree into field values, which are
//! then resolved into dates, times, zones and instants.
//!
//! ```
//! use chronofmt::DateTimeFormatter;
//!
//! let formatter = DateTimeFormatter::of_pattern("uuuu-MM-dd HH:mm")?;
//! let value = formatter.parse_date_time("2020-07-04 09:30")?;
//! assert_eq!(formatter.format(&value)?, "2020-07-04 09:30");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[macro_use]
mod logging;

pub mod ast;
pub mod chronology;
pub mod error;
pub mod field;
pub mod locale;
pub mod math;
pub mod options;
pub mod parser;
pub mod temporal;
pub mod zone;

mod builder;
mod cache;
mod formatter;
mod parsed;

pub use builder::FormatterBuilder;
pub use cache::PatternCache;
pub use chronology::{Chronology, IsoChronology};
pub use error::{BuildError, FormatError, ParseError, ResolveError};
pub use field::{ChronoField, CustomField, Field, FieldValues, TemporalField, ValueRange, WeekFields};
pub use formatter::{DateTimeFormatter, ParsePosition};
pub use locale::{Locale, TextProvider};
pub use options::{DecimalStyle, FormatStyle, ResolverStyle, SignStyle, TextStyle};
pub use parsed::{Parsed, MAX_RESOLVE_PASSES};
pub use temporal::{ChronoUnit, Resolved, TemporalAccessor};
pub use zone::{FixedZoneRules, Zone, ZoneRules};
