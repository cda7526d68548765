//! Zone offsets, as `+HH:MM` style ids or prefixed by the GMT text.

use crate::ast::OffsetNode;
use crate::error::FormatError;
use crate::field::ChronoField;
use crate::formatter::{FormatContext, ParseContext};
use crate::options::TextStyle;

const OFFSET_SECONDS: ChronoField = ChronoField::OffsetSeconds;

/// Total offset seconds of the value, split into absolute parts.
fn offset_parts(seconds: i64) -> Result<(i32, u32, u32, u32), FormatError> {
    let total = i32::try_from(seconds).map_err(|_| FormatError::InvalidOffset { seconds })?;
    let abs = total.unsigned_abs();
    Ok((total, (abs / 3600) % 100, (abs / 60) % 60, abs % 60))
}

fn push_two_digits(buf: &mut String, value: u32) {
    buf.push(char::from(b'0' + (value / 10) as u8));
    buf.push(char::from(b'0' + (value % 10) as u8));
}

fn digit_at(text: &[char], pos: usize) -> Option<u32> {
    text.get(pos).and_then(|ch| ch.to_digit(10))
}

impl OffsetNode {
    fn colon(&self) -> bool {
        self.pattern % 2 == 0
    }

    pub(crate) fn format(&self, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        let Some(seconds) = ctx.value(&OFFSET_SECONDS.into())? else {
            return Ok(false);
        };
        let (total, hours, minutes, seconds) = offset_parts(seconds)?;
        if total == 0 {
            buf.push_str(&self.no_offset_text);
            return Ok(true);
        }
        let start = buf.len();
        let separator = if self.colon() { ":" } else { "" };
        let mut output = hours;
        buf.push(if total < 0 { '-' } else { '+' });
        push_two_digits(buf, hours);
        if self.pattern >= 3 || (self.pattern >= 1 && minutes > 0) {
            buf.push_str(separator);
            push_two_digits(buf, minutes);
            output += minutes;
            if self.pattern >= 7 || (self.pattern >= 5 && seconds > 0) {
                buf.push_str(separator);
                push_two_digits(buf, seconds);
                output += seconds;
            }
        }
        if output == 0 {
            // the printed parts were all zero
            buf.truncate(start);
            buf.push_str(&self.no_offset_text);
        }
        Ok(true)
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
        let length = text.len();
        let no_offset_len = self.no_offset_text.chars().count();
        if no_offset_len == 0 {
            if position == length {
                return ctx.set_parsed_field(OFFSET_SECONDS, 0, position, position);
            }
        } else {
            if position == length {
                return Err(position);
            }
            if ctx.matches_at(text, position, &self.no_offset_text) {
                return ctx.set_parsed_field(OFFSET_SECONDS, 0, position, position + no_offset_len);
            }
        }

        let sign = text[position];
        if sign == '+' || sign == '-' {
            let negative = sign == '-';
            let mut parts = [0u32; 4];
            let mut pos = position + 1;
            let parsed = self.parse_part(&mut parts, &mut pos, 1, text, true)
                && self.parse_part(&mut parts, &mut pos, 2, text, self.pattern >= 3)
                && self.parse_part(&mut parts, &mut pos, 3, text, self.pattern >= 7);
            if parsed {
                let magnitude = i64::from(parts[1]) * 3600 + i64::from(parts[2]) * 60 + i64::from(parts[3]);
                let offset = if negative { -magnitude } else { magnitude };
                return ctx.set_parsed_field(OFFSET_SECONDS, offset, position, pos);
            }
        }
        if no_offset_len == 0 {
            return ctx.set_parsed_field(OFFSET_SECONDS, 0, position, position);
        }
        Err(position)
    }

    /// Reads hours (1), minutes (2) or seconds (3). Returns false when a
    /// required part is missing; an absent optional part reads as zero.
    fn parse_part(&self, parts: &mut [u32; 4], pos: &mut usize, index: usize, text: &[char], required: bool) -> bool {
        if (self.pattern + 3) / 2 < index {
            // the layout has no such part
            return true;
        }
        let mut next = *pos;
        if self.colon() && index > 1 {
            if text.get(next) != Some(&':') {
                return !required;
            }
            next += 1;
        }
        let (Some(tens), Some(units)) = (digit_at(text, next), digit_at(text, next + 1)) else {
            return !required;
        };
        let value = tens * 10 + units;
        if value > 59 {
            return !required;
        }
        parts[index] = value;
        *pos = next + 2;
        true
    }
}

pub(crate) fn format_localized(style: TextStyle, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
    let Some(seconds) = ctx.value(&OFFSET_SECONDS.into())? else {
        return Ok(false);
    };
    buf.push_str(ctx.provider().gmt_text());
    let (total, hours, minutes, seconds) = offset_parts(seconds)?;
    if total == 0 {
        return Ok(true);
    }
    buf.push(if total < 0 { '-' } else { '+' });
    if style == TextStyle::Full {
        push_two_digits(buf, hours);
        buf.push(':');
        push_two_digits(buf, minutes);
        if seconds != 0 {
            buf.push(':');
            push_two_digits(buf, seconds);
        }
    } else {
        if hours >= 10 {
            buf.push(char::from(b'0' + (hours / 10) as u8));
        }
        buf.push(char::from(b'0' + (hours % 10) as u8));
        if minutes != 0 || seconds != 0 {
            buf.push(':');
            push_two_digits(buf, minutes);
            if seconds != 0 {
                buf.push(':');
                push_two_digits(buf, seconds);
            }
        }
    }
    Ok(true)
}

pub(crate) fn parse_localized(style: TextStyle, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
    let end = text.len();
    let gmt = ctx.provider().gmt_text();
    if !ctx.matches_at(text, position, gmt) {
        return Err(position);
    }
    let mut pos = position + gmt.chars().count();
    let negative = match text.get(pos) {
        Some('+') => false,
        Some('-') => true,
        _ => return ctx.set_parsed_field(OFFSET_SECONDS, 0, position, pos),
    };
    pos += 1;
    let (mut hours, mut minutes, mut seconds) = (0, 0, 0);
    // `:` followed by two digits at `at`
    let colon_pair = |at: usize| -> Option<u32> {
        if at + 2 < end && text[at] == ':' {
            Some(digit_at(text, at + 1)? * 10 + digit_at(text, at + 2)?)
        } else {
            None
        }
    };
    if style == TextStyle::Full {
        let (Some(h1), Some(h2)) = (digit_at(text, pos), digit_at(text, pos + 1)) else {
            return Err(position);
        };
        if text.get(pos + 2) != Some(&':') {
            return Err(position);
        }
        hours = h1 * 10 + h2;
        let (Some(m1), Some(m2)) = (digit_at(text, pos + 3), digit_at(text, pos + 4)) else {
            return Err(position);
        };
        minutes = m1 * 10 + m2;
        pos += 5;
        if let Some(value) = colon_pair(pos) {
            seconds = value;
            pos += 3;
        }
    } else {
        let Some(h1) = digit_at(text, pos) else {
            return Err(position);
        };
        hours = h1;
        pos += 1;
        if let Some(h2) = digit_at(text, pos) {
            hours = hours * 10 + h2;
            pos += 1;
        }
        if let Some(value) = colon_pair(pos) {
            minutes = value;
            pos += 3;
            if let Some(value) = colon_pair(pos) {
                seconds = value;
                pos += 3;
            }
        }
    }
    let magnitude = i64::from(hours) * 3600 + i64::from(minutes) * 60 + i64::from(seconds);
    let offset = if negative { -magnitude } else { magnitude };
    ctx.set_parsed_field(OFFSET_SECONDS, offset, position, pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DateTimeFormatter, FormatterBuilder};
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn at_offset(seconds: i32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(seconds)
            .unwrap()
            .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
            .unwrap()
    }

    fn format_offset(pattern: &str, no_offset: &str, seconds: i32) -> String {
        FormatterBuilder::new()
            .append_offset(pattern, no_offset)
            .unwrap()
            .to_formatter()
            .format(&at_offset(seconds))
            .unwrap()
    }

    #[test]
    fn test_offset_format_patterns() {
        assert_eq!(format_offset("+HH:MM:ss", "Z", 0), "Z");
        assert_eq!(format_offset("+HH:MM:ss", "Z", 3600), "+01:00");
        assert_eq!(format_offset("+HH:MM:ss", "Z", 3661), "+01:01:01");
        assert_eq!(format_offset("+HHmm", "Z", 3600), "+01");
        assert_eq!(format_offset("+HHmm", "Z", -5400), "-0130");
        assert_eq!(format_offset("+HH", "Z", 1800), "Z");
        assert_eq!(format_offset("+HHMMSS", "0", -3600), "-010000");
    }

    #[test]
    fn test_offset_parse() {
        let formatter = DateTimeFormatter::iso_local_date();
        let node = OffsetNode::new("+HH:MM:ss", "Z").unwrap();
        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(node.parse(&mut ctx, &chars("+05:30"), 0), Ok(6));
        assert_eq!(ctx.parsed_value(OFFSET_SECONDS), Some(19_800));
        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(node.parse(&mut ctx, &chars("-01:00:30"), 0), Ok(9));
        assert_eq!(ctx.parsed_value(OFFSET_SECONDS), Some(-3630));
        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(node.parse(&mut ctx, &chars("Z"), 0), Ok(1));
        assert_eq!(ctx.parsed_value(OFFSET_SECONDS), Some(0));
        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(node.parse(&mut ctx, &chars("+05"), 0), Err(0));

        let hours = OffsetNode::new("+HHmm", "").unwrap();
        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(hours.parse(&mut ctx, &chars("+05x"), 0), Ok(3));
        assert_eq!(ctx.parsed_value(OFFSET_SECONDS), Some(18_000));
        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(hours.parse(&mut ctx, &chars(""), 0), Ok(0));
    }

    #[test]
    fn test_localized_offset() {
        let full = FormatterBuilder::new()
            .append_localized_offset(TextStyle::Full)
            .unwrap()
            .to_formatter();
        let short = FormatterBuilder::new()
            .append_localized_offset(TextStyle::Short)
            .unwrap()
            .to_formatter();
        assert_eq!(full.format(&at_offset(0)).unwrap(), "GMT");
        assert_eq!(full.format(&at_offset(3600)).unwrap(), "GMT+01:00");
        assert_eq!(short.format(&at_offset(-3600)).unwrap(), "GMT-1");
        assert_eq!(short.format(&at_offset(37_800)).unwrap(), "GMT+10:30");

        let mut ctx = ParseContext::new(&short);
        assert_eq!(parse_localized(TextStyle::Short, &mut ctx, &chars("GMT+10:30"), 0), Ok(9));
        assert_eq!(ctx.parsed_value(OFFSET_SECONDS), Some(37_800));
        let mut ctx = ParseContext::new(&full);
        assert_eq!(parse_localized(TextStyle::Full, &mut ctx, &chars("GMT-01:00:30"), 0), Ok(12));
        assert_eq!(ctx.parsed_value(OFFSET_SECONDS), Some(-3630));
        let mut ctx = ParseContext::new(&full);
        assert_eq!(parse_localized(TextStyle::Full, &mut ctx, &chars("GMT"), 0), Ok(3));
        assert_eq!(parse_localized(TextStyle::Full, &mut ctx, &chars("UTC"), 0), Err(0));
    }
}
