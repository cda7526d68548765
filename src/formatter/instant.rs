//! ISO-8601 instants and localized patterns.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, NaiveDate, Timelike};

use crate::ast::{Composite, FractionNode, InstantNode, Node, NumberNode, OffsetNode};
use crate::builder::compile_pattern;
use crate::error::{BuildError, FormatError, ResolveError};
use crate::field::ChronoField;
use crate::formatter::{DateTimeFormatter, FormatContext, ParseContext};
use crate::locale::TextProvider;
use crate::options::{FormatStyle, SignStyle};

impl InstantNode {
    pub(crate) fn format(&self, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        let Some(seconds) = ctx.value(&ChronoField::InstantSeconds.into())? else {
            return Ok(false);
        };
        let nanos = ctx
            .temporal()
            .get_long(&ChronoField::NanoOfSecond.into())
            .unwrap_or(0);
        let nanos = ChronoField::NanoOfSecond.check_valid_int_value(nanos)? as u32;
        let utc = DateTime::from_timestamp(seconds, 0)
            .ok_or(ResolveError::Overflow {
                operation: "instant formatting",
            })?
            .naive_utc();

        let year = utc.year();
        if year > 9999 {
            let _ = write!(buf, "+{year}");
        } else if year < 0 {
            let _ = write!(buf, "-{:04}", year.unsigned_abs());
        } else {
            let _ = write!(buf, "{year:04}");
        }
        let _ = write!(
            buf,
            "-{:02}-{:02}T{:02}:{:02}:{:02}",
            utc.month(),
            utc.day(),
            utc.hour(),
            utc.minute(),
            utc.second()
        );

        let digits = self.fractional_digits;
        if (digits < 0 && nanos > 0) || digits > 0 {
            buf.push('.');
            let mut remaining = nanos;
            let mut div = 100_000_000;
            let mut i = 0;
            while (digits == -1 && remaining > 0)
                || (digits == -2 && (remaining > 0 || i % 3 != 0))
                || i < digits
            {
                let digit = remaining / div;
                buf.push(char::from(b'0' + digit as u8));
                remaining -= digit * div;
                div /= 10;
                i += 1;
            }
        }
        buf.push('Z');
        Ok(true)
    }

    /// The nodes an instant is parsed with: an ISO date and time followed
    /// by an offset.
    fn parse_layout(&self) -> Composite {
        let (min, max) = if self.fractional_digits < 0 {
            (0, 9)
        } else {
            (self.fractional_digits as usize, self.fractional_digits as usize)
        };
        let two_digits = |field: ChronoField| Node::Number(NumberNode::new(field, 2, 2, SignStyle::NotNegative));
        let time = Composite::new(
            vec![
                Node::Char('T'),
                two_digits(ChronoField::HourOfDay),
                Node::Char(':'),
                two_digits(ChronoField::MinuteOfHour),
                Node::Char(':'),
                two_digits(ChronoField::SecondOfMinute),
                Node::Fraction(FractionNode {
                    field: ChronoField::NanoOfSecond.into(),
                    min_width: min,
                    max_width: max,
                    decimal_point: true,
                }),
                Node::Offset(OffsetNode::id_z()),
            ],
            false,
        );
        let date = DateTimeFormatter::iso_local_date().root().with_optional(false);
        Composite::new(vec![Node::Composite(date), Node::Composite(time)], false)
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
        let mut sub = ctx.fork();
        let end = self.parse_layout().parse(&mut sub, text, position)?;
        let value = |field: ChronoField| sub.parsed_value(field);
        let (Some(year), Some(month), Some(day), Some(mut hour), Some(minute)) = (
            value(ChronoField::Year),
            value(ChronoField::MonthOfYear),
            value(ChronoField::DayOfMonth),
            value(ChronoField::HourOfDay),
            value(ChronoField::MinuteOfHour),
        ) else {
            return Err(position);
        };
        let mut second = value(ChronoField::SecondOfMinute).unwrap_or(0);
        let nano = value(ChronoField::NanoOfSecond).unwrap_or(0);
        let offset = value(ChronoField::OffsetSeconds).unwrap_or(0);
        let mut days = 0;
        if hour == 24 && minute == 0 && second == 0 && nano == 0 {
            hour = 0;
            days = 1;
        } else if hour == 23 && minute == 59 && second == 60 {
            ctx.parsed.leap_second = true;
            second = 59;
        }
        let instant = i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month as u32, day as u32))
            .and_then(|date| date.and_hms_opt(hour as u32, minute as u32, second as u32))
            .and_then(|local| local.checked_add_days(chrono::Days::new(days)))
            .map(|local| local.and_utc().timestamp() - offset);
        let Some(instant) = instant else {
            return Err(position);
        };
        let end = ctx.set_parsed_field(ChronoField::InstantSeconds, instant, position, end)?;
        ctx.set_parsed_field(ChronoField::NanoOfSecond, nano, position, end)
    }
}

/// Compiles the provider's pattern for the requested lengths.
fn localized_composite(
    date: Option<FormatStyle>,
    time: Option<FormatStyle>,
    provider: &dyn TextProvider,
) -> Result<Composite, BuildError> {
    let pattern = provider
        .localized_pattern(date, time)
        .ok_or_else(|| BuildError::Pattern {
            pattern: String::new(),
            position: 0,
            reason: format!("no localized pattern for date style {date:?} and time style {time:?}"),
        })?;
    debug!("compiling localized pattern {pattern:?}");
    compile_pattern(&pattern)
}

pub(crate) fn format_localized(
    date: Option<FormatStyle>,
    time: Option<FormatStyle>,
    ctx: &mut FormatContext<'_>,
    buf: &mut String,
) -> Result<bool, FormatError> {
    let composite = localized_composite(date, time, ctx.provider())?;
    composite.format(ctx, buf)
}

pub(crate) fn parse_localized(
    date: Option<FormatStyle>,
    time: Option<FormatStyle>,
    ctx: &mut ParseContext<'_>,
    text: &[char],
    position: usize,
) -> Result<usize, usize> {
    let composite = localized_composite(date, time, ctx.provider()).map_err(|_| position)?;
    composite.parse(ctx, text, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormatterBuilder;
    use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};

    fn instant_formatter(fractional_digits: i32) -> Result<DateTimeFormatter, BuildError> {
        Ok(FormatterBuilder::new()
            .parse_case_insensitive()
            .append_instant_with_digits(fractional_digits)?
            .to_formatter())
    }

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn at(seconds: i64, nanos: u32) -> chrono::DateTime<FixedOffset> {
        Utc.timestamp_opt(seconds, nanos).unwrap().fixed_offset()
    }

    fn format(digits: i32, seconds: i64, nanos: u32) -> String {
        instant_formatter(digits).unwrap().format(&at(seconds, nanos)).unwrap()
    }

    #[test]
    fn test_format_fraction_digits() {
        assert_eq!(format(-2, 0, 0), "1970-01-01T00:00:00Z");
        assert_eq!(format(-2, 0, 120_000_000), "1970-01-01T00:00:00.120Z");
        assert_eq!(format(-2, 0, 123_400_000), "1970-01-01T00:00:00.123400Z");
        assert_eq!(format(-1, 0, 120_000_000), "1970-01-01T00:00:00.12Z");
        assert_eq!(format(3, 0, 0), "1970-01-01T00:00:00.000Z");
        assert_eq!(format(0, 86_399, 999_000_000), "1970-01-01T23:59:59Z");
    }

    #[test]
    fn test_format_wide_years() {
        let far = NaiveDate::from_ymd_opt(12_345, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format(-2, far.and_utc().timestamp(), 0), "+12345-01-01T00:00:00Z");
        let before: NaiveDateTime = NaiveDate::from_ymd_opt(-1, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(format(-2, before.and_utc().timestamp(), 0), "-0001-06-01T12:00:00Z");
    }

    #[test]
    fn test_parse_instant() {
        let formatter = instant_formatter(-2).unwrap();
        let node = InstantNode { fractional_digits: -2 };

        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(node.parse(&mut ctx, &chars("1970-01-01T00:01:00.5+01:00"), 0), Ok(27));
        assert_eq!(ctx.parsed_value(ChronoField::InstantSeconds), Some(60 - 3600));
        assert_eq!(ctx.parsed_value(ChronoField::NanoOfSecond), Some(500_000_000));

        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(node.parse(&mut ctx, &chars("1970-01-01T24:00:00Z"), 0), Ok(20));
        assert_eq!(ctx.parsed_value(ChronoField::InstantSeconds), Some(86_400));

        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(node.parse(&mut ctx, &chars("1970-01-01T23:59:60Z"), 0), Ok(20));
        assert_eq!(ctx.parsed_value(ChronoField::InstantSeconds), Some(86_399));
        assert!(ctx.parsed.is_leap_second());

        let mut ctx = ParseContext::new(&formatter);
        assert!(node.parse(&mut ctx, &chars("1970-01-01T00:00"), 0).is_err());
        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(node.parse(&mut ctx, &chars("1970-02-30T00:00:00Z"), 0), Err(0));
    }

    #[test]
    fn test_localized_round_trip() {
        let formatter = FormatterBuilder::new()
            .append_localized(Some(FormatStyle::Short), None)
            .unwrap()
            .to_formatter();
        let date = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();
        let text = formatter.format(&date).unwrap();
        let parsed = formatter.parse_date(&text).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_offset_node_in_layout() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let value = offset.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(instant_formatter(-2).unwrap().format(&value).unwrap(), "2000-01-01T00:00:00Z");
    }
}
