//! Numeric values, reduced values and fractions.

use crate::ast::{FractionNode, NumberNode, EXCEED_POINTS};
use crate::error::FormatError;
use crate::field::Field;
use crate::formatter::{FormatContext, ParseContext};
use crate::options::SignStyle;

impl NumberNode {
    pub(crate) fn format(&self, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        let (field, node) = self.concrete(ctx.week_fields());
        node.format_field(&field, ctx, buf)
    }

    fn format_field(&self, field: &Field, ctx: &FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        let Some(value) = ctx.value(field)? else {
            return Ok(false);
        };
        let value = self.print_value(value);
        let style = ctx.decimal_style();
        let digits = value.unsigned_abs().to_string();
        if digits.len() > self.max_width {
            return Err(FormatError::ExceedsWidth {
                field: field.clone(),
                value,
                max_width: self.max_width,
            });
        }
        if value >= 0 {
            match self.sign_style {
                SignStyle::ExceedsPad if self.min_width < 19 && value >= EXCEED_POINTS[self.min_width] => {
                    buf.push(style.positive_sign)
                }
                SignStyle::Always => buf.push(style.positive_sign),
                _ => {}
            }
        } else {
            match self.sign_style {
                SignStyle::Normal | SignStyle::ExceedsPad | SignStyle::Always => buf.push(style.negative_sign),
                SignStyle::NotNegative => {
                    return Err(FormatError::NegativeValue {
                        field: field.clone(),
                        value,
                    })
                }
                SignStyle::Never => {}
            }
        }
        for _ in digits.len()..self.min_width {
            buf.push(style.zero_digit);
        }
        buf.push_str(&style.localize_digits(&digits));
        Ok(true)
    }

    /// The value actually printed; reduced nodes keep only the low digits.
    fn print_value(&self, value: i64) -> i64 {
        let Some(base) = self.base_value else {
            return value;
        };
        let abs = value.unsigned_abs();
        let window = EXCEED_POINTS[self.min_width];
        if value >= base && value < base.saturating_add(window) {
            (abs % window as u64) as i64
        } else {
            (abs % EXCEED_POINTS[self.max_width] as u64) as i64
        }
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
        let fixed = self.is_fixed_width(ctx.strict);
        let (field, node) = self.concrete(ctx.week_fields());
        node.parse_field(&field, fixed, ctx, text, position)
    }

    fn parse_field(
        &self,
        field: &Field,
        fixed: bool,
        ctx: &mut ParseContext<'_>,
        text: &[char],
        position: usize,
    ) -> Result<usize, usize> {
        let length = text.len();
        if position == length {
            return Err(position);
        }
        let style = ctx.decimal_style();
        let strict = ctx.strict;
        let sign = text[position];
        let mut negative = false;
        let mut positive = false;
        let mut position = position;
        let fixed_width = self.min_width == self.max_width;
        if sign == style.positive_sign {
            if !self.sign_style.accepts_sign(true, strict, fixed_width) {
                return Err(position);
            }
            positive = true;
            position += 1;
        } else if sign == style.negative_sign {
            if !self.sign_style.accepts_sign(false, strict, fixed_width) {
                return Err(position);
            }
            negative = true;
            position += 1;
        } else if self.sign_style == SignStyle::Always && strict {
            return Err(position);
        }

        let eff_min = if strict || fixed { self.min_width } else { 1 };
        let min_end = position + eff_min;
        if min_end > length {
            return Err(position);
        }
        let reserved = self.subsequent_width.max(0) as usize;
        let mut eff_max = (if strict || fixed { self.max_width } else { 18 }) + reserved;
        let mut pos = position;
        for pass in 0..2 {
            let max_end = (pos + eff_max).min(length);
            while pos < max_end {
                if style.convert_to_digit(text[pos]).is_none() {
                    if pos < min_end {
                        // need at least min width digits
                        return Err(position);
                    }
                    break;
                }
                pos += 1;
            }
            if reserved > 0 && pass == 0 {
                // hand the reserved width back to the adjacent values
                let parse_len = pos - position;
                eff_max = eff_min.max(parse_len.saturating_sub(reserved));
                pos = position;
            } else {
                break;
            }
        }

        // digits beyond i64 precision are left unconsumed
        let mut total: i64 = 0;
        let mut end = position;
        for &ch in &text[position..pos] {
            let digit = i64::from(style.convert_to_digit(ch).unwrap_or(0));
            match total.checked_mul(10).and_then(|t| t.checked_add(digit)) {
                Some(next) => {
                    total = next;
                    end += 1;
                }
                None => break,
            }
        }
        let pos = end;

        if negative {
            if total == 0 && strict {
                // minus zero not allowed
                return Err(position - 1);
            }
            total = -total;
        } else if self.sign_style == SignStyle::ExceedsPad && strict {
            let parse_len = pos - position;
            if positive {
                if parse_len <= self.min_width {
                    // '+' only parsed if min width exceeded
                    return Err(position - 1);
                }
            } else if parse_len > self.min_width {
                // '+' must be parsed if min width exceeded
                return Err(position);
            }
        }
        self.set_value(field, ctx, total, position, pos)
    }

    fn set_value(
        &self,
        field: &Field,
        ctx: &mut ParseContext<'_>,
        value: i64,
        error_pos: usize,
        success_pos: usize,
    ) -> Result<usize, usize> {
        let mut value = value;
        if let Some(base) = self.base_value {
            let parse_len = success_pos - error_pos;
            if parse_len == self.min_width && value >= 0 {
                let range = EXCEED_POINTS[self.min_width];
                let base_part = base - base % range;
                value = if base > 0 { base_part + value } else { base_part - value };
                if value < base {
                    value += range;
                }
            }
        }
        ctx.set_parsed_field(field, value, error_pos, success_pos)
    }
}

impl FractionNode {
    pub(crate) fn format(&self, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        let Some(value) = ctx.value(&self.field)? else {
            return Ok(false);
        };
        let style = ctx.decimal_style();
        let range = self.field.range();
        range.check_valid_value(value, &self.field)?;
        let min = range.minimum();
        let span = i128::from(range.maximum()) - i128::from(min) + 1;
        let scaled = (i128::from(value) - i128::from(min)) * 1_000_000_000 / span;
        let fraction = format!("{scaled:09}");
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            if self.min_width > 0 {
                if self.decimal_point {
                    buf.push(style.decimal_separator);
                }
                for _ in 0..self.min_width {
                    buf.push(style.zero_digit);
                }
            }
            return Ok(true);
        }
        let digits = fraction.len().clamp(self.min_width, self.max_width);
        let mut fraction = fraction[..digits.min(fraction.len())].to_string();
        while fraction.len() < digits {
            fraction.push('0');
        }
        if self.decimal_point {
            buf.push(style.decimal_separator);
        }
        buf.push_str(&style.localize_digits(&fraction));
        Ok(true)
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
        let strict = ctx.strict;
        let eff_min = if strict { self.min_width } else { 0 };
        let eff_max = if strict { self.max_width } else { 9 };
        let length = text.len();
        if position == length {
            // valid if the whole field is optional, invalid if minimum width
            return if eff_min > 0 { Err(position) } else { Ok(position) };
        }
        let style = ctx.decimal_style();
        let mut position = position;
        if self.decimal_point {
            if text[position] != style.decimal_separator {
                // valid if the whole field is optional, invalid if minimum width
                return if eff_min > 0 { Err(position) } else { Ok(position) };
            }
            position += 1;
        }
        let min_end = position + eff_min;
        if min_end > length {
            // need at least min width digits
            return Err(position);
        }
        let max_end = (position + eff_max).min(length);
        let mut total: i64 = 0;
        let mut pos = position;
        while pos < max_end {
            match style.convert_to_digit(text[pos]) {
                Some(digit) => {
                    total = total * 10 + i64::from(digit);
                    pos += 1;
                }
                None => {
                    if pos < min_end {
                        return Err(position);
                    }
                    break;
                }
            }
        }
        let range = self.field.range();
        let min = i128::from(range.minimum());
        let span = i128::from(range.maximum()) - min + 1;
        let scale = i128::from(EXCEED_POINTS[pos - position]);
        let value = (min + i128::from(total) * span / scale) as i64;
        ctx.set_parsed_field(&self.field, value, position, pos)
    }
}
