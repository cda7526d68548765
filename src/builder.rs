//! Step-by-step assembly of a formatter.
//!
//! [`FormatterBuilder`] appends nodes to the innermost open frame. Frames
//! are pushed by [`optional_start`](FormatterBuilder::optional_start) and
//! popped by [`optional_end`](FormatterBuilder::optional_end), which splices
//! the finished section into its parent.
//!
//! Numeric values are negotiated as they are appended: a variable-width
//! value followed directly by fixed-width values reserves their combined
//! width, so `yyyyMMdd` can be parsed without separators.

use std::sync::Arc;

use crate::ast::{
    Composite, FractionNode, InstantNode, Node, NumberNode, OffsetNode, PadNode, Setting, TextMap,
    TextNode, EXCEED_POINTS,
};
use crate::error::BuildError;
use crate::field::Field;
use crate::formatter::DateTimeFormatter;
use crate::locale::{Locale, TextProvider};
use crate::options::{FormatStyle, SignStyle, TextStyle};
use crate::parser;

const MAX_WIDTH: usize = 19;
const MAX_REDUCED_WIDTH: usize = 10;
const MAX_FRACTION_WIDTH: usize = 9;

/// One level of nesting: the top level or an open optional section.
#[derive(Debug)]
struct Frame {
    nodes: Vec<Node>,
    optional: bool,
    pad_next_width: usize,
    pad_next_char: char,
    /// Index of the numeric node that adjacent fixed-width values reserve
    /// their width from.
    active_value: Option<usize>,
}

impl Frame {
    fn new(optional: bool) -> Self {
        Frame {
            nodes: Vec::new(),
            optional,
            pad_next_width: 0,
            pad_next_char: ' ',
            active_value: None,
        }
    }

    fn into_composite(self) -> Composite {
        Composite::new(self.nodes, self.optional)
    }
}

/// Builder of [`DateTimeFormatter`]s.
///
/// Infallible appends return `&mut Self` for chaining; appends that
/// validate their arguments return `Result<&mut Self, BuildError>`.
///
/// ```
/// use chronofmt::{ChronoField, FormatterBuilder};
///
/// let formatter = FormatterBuilder::new()
///     .append_value_fixed(ChronoField::Year, 4)?
///     .append_literal_char('-')
///     .append_value_fixed(ChronoField::MonthOfYear, 2)?
///     .to_formatter();
/// let date = chrono::NaiveDate::from_ymd_opt(2020, 7, 1).unwrap();
/// assert_eq!(formatter.format(&date)?, "2020-07");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FormatterBuilder {
    root: Frame,
    open: Vec<Frame>,
}

impl Default for FormatterBuilder {
    fn default() -> Self {
        FormatterBuilder::new()
    }
}

fn active_number(node: &mut Node) -> Option<&mut NumberNode> {
    match node {
        Node::Number(number) => Some(number),
        _ => None,
    }
}

fn check_width(what: &'static str, width: usize, min: usize, max: usize) -> Result<(), BuildError> {
    if width < min || width > max {
        return Err(BuildError::InvalidWidth { what, width, min, max });
    }
    Ok(())
}

fn check_order(min_width: usize, max_width: usize) -> Result<(), BuildError> {
    if max_width < min_width {
        return Err(BuildError::WidthOrder { min_width, max_width });
    }
    Ok(())
}

impl FormatterBuilder {
    pub fn new() -> Self {
        FormatterBuilder {
            root: Frame::new(false),
            open: Vec::new(),
        }
    }

    fn active(&mut self) -> &mut Frame {
        match self.open.last_mut() {
            Some(frame) => frame,
            None => &mut self.root,
        }
    }

    /// Appends `node` to the active frame, applying any pending padding.
    /// Ends any adjacent-value window.
    fn append_internal(&mut self, node: Node) -> usize {
        let frame = self.active();
        let node = if frame.pad_next_width > 0 {
            let padded = Node::Pad(PadNode {
                inner: Box::new(node),
                width: frame.pad_next_width,
                pad_char: frame.pad_next_char,
            });
            frame.pad_next_width = 0;
            frame.pad_next_char = ' ';
            padded
        } else {
            node
        };
        frame.nodes.push(node);
        frame.active_value = None;
        frame.nodes.len() - 1
    }

    /// Appends an already-built node.
    pub(crate) fn append_node(&mut self, node: Node) -> &mut Self {
        self.append_internal(node);
        self
    }

    /// Appends a numeric node, negotiating widths with the active value.
    pub(crate) fn append_number(&mut self, node: NumberNode) -> &mut Self {
        let Some(active) = self.active().active_value else {
            let index = self.append_internal(Node::Number(node));
            // a padded value never opens an adjacent-value window
            let frame = self.active();
            if matches!(frame.nodes.get(index), Some(Node::Number(_))) {
                frame.active_value = Some(index);
            }
            return self;
        };
        let candidate = node.is_adjacent_candidate();
        let width = node.max_width;
        if let Some(base) = self.active().nodes.get_mut(active).and_then(active_number) {
            *base = if candidate {
                base.with_subsequent_width(width)
            } else {
                base.with_fixed_width()
            };
        }
        if candidate {
            self.append_internal(Node::Number(node.with_fixed_width()));
            self.active().active_value = Some(active);
        } else {
            let index = self.append_internal(Node::Number(node));
            self.active().active_value = Some(index);
        }
        self
    }

    pub fn parse_case_sensitive(&mut self) -> &mut Self {
        self.append_node(Node::Settings(Setting::CaseSensitive))
    }

    pub fn parse_case_insensitive(&mut self) -> &mut Self {
        self.append_node(Node::Settings(Setting::CaseInsensitive))
    }

    pub fn parse_strict(&mut self) -> &mut Self {
        self.append_node(Node::Settings(Setting::Strict))
    }

    pub fn parse_lenient(&mut self) -> &mut Self {
        self.append_node(Node::Settings(Setting::Lenient))
    }

    pub fn append_literal_char(&mut self, literal: char) -> &mut Self {
        self.append_node(Node::Char(literal))
    }

    /// Appends literal text, matched exactly when parsing. Empty text is
    /// ignored.
    pub fn append_literal(&mut self, literal: &str) -> &mut Self {
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (None, _) => self,
            (Some(ch), None) => self.append_literal_char(ch),
            _ => self.append_node(Node::Str(literal.to_string())),
        }
    }

    /// Supplies `value` for `field` when the parsed text did not.
    pub fn parse_defaulting(&mut self, field: impl Into<Field>, value: i64) -> &mut Self {
        self.append_node(Node::Default {
            field: field.into(),
            value,
        })
    }

    /// Appends a value printed with as many digits as needed, 1 to 19,
    /// signed only when negative.
    pub fn append_value(&mut self, field: impl Into<Field>) -> &mut Self {
        self.append_number(NumberNode::new(field, 1, MAX_WIDTH, SignStyle::Normal))
    }

    /// Appends a non-negative value zero-padded to exactly `width` digits.
    pub fn append_value_fixed(&mut self, field: impl Into<Field>, width: usize) -> Result<&mut Self, BuildError> {
        check_width("width", width, 1, MAX_WIDTH)?;
        Ok(self.append_number(NumberNode::new(field, width, width, SignStyle::NotNegative)))
    }

    pub fn append_value_with(
        &mut self,
        field: impl Into<Field>,
        min_width: usize,
        max_width: usize,
        sign_style: SignStyle,
    ) -> Result<&mut Self, BuildError> {
        check_width("minimum width", min_width, 1, MAX_WIDTH)?;
        check_width("maximum width", max_width, 1, MAX_WIDTH)?;
        check_order(min_width, max_width)?;
        Ok(self.append_number(NumberNode::new(field, min_width, max_width, sign_style)))
    }

    /// Appends a value printed as its low digits relative to `base_value`.
    ///
    /// With width 2 and base 2000, years 2000 to 2099 print as `00` to `99`
    /// and parsing `23` yields 2023.
    pub fn append_value_reduced(
        &mut self,
        field: impl Into<Field>,
        width: usize,
        max_width: usize,
        base_value: i64,
    ) -> Result<&mut Self, BuildError> {
        let field = field.into();
        check_width("width", width, 1, MAX_REDUCED_WIDTH)?;
        check_width("maximum width", max_width, 1, MAX_REDUCED_WIDTH)?;
        check_order(width, max_width)?;
        if !field.range().is_valid_value(base_value) {
            return Err(BuildError::InvalidBaseValue { field, base: base_value });
        }
        if base_value
            .checked_add(EXCEED_POINTS[max_width])
            .map_or(true, |end| end > i64::from(i32::MAX))
        {
            return Err(BuildError::InvalidBaseValue { field, base: base_value });
        }
        Ok(self.append_number(NumberNode::reduced(field, width, max_width, base_value)))
    }

    /// Appends a fraction of the field's range, such as nano-of-second as
    /// `.123456`.
    pub fn append_fraction(
        &mut self,
        field: impl Into<Field>,
        min_width: usize,
        max_width: usize,
        decimal_point: bool,
    ) -> Result<&mut Self, BuildError> {
        let field = field.into();
        if !field.range().is_fixed() {
            return Err(BuildError::VariableRange { field });
        }
        check_width("minimum width", min_width, 0, MAX_FRACTION_WIDTH)?;
        check_width("maximum width", max_width, 1, MAX_FRACTION_WIDTH)?;
        check_order(min_width, max_width)?;
        let node = Node::Fraction(FractionNode {
            field,
            min_width,
            max_width,
            decimal_point,
        });
        // a fixed-width fraction takes part in the adjacent-value window
        match self.active().active_value {
            Some(active) if min_width == max_width && !decimal_point => {
                if let Some(base) = self.active().nodes.get_mut(active).and_then(active_number) {
                    *base = base.with_subsequent_width(max_width);
                }
                self.append_internal(node);
                self.active().active_value = Some(active);
            }
            _ => {
                self.append_internal(node);
            }
        }
        Ok(self)
    }

    pub fn append_text(&mut self, field: impl Into<Field>, style: TextStyle) -> &mut Self {
        self.append_node(Node::Text(TextNode {
            field: field.into(),
            style,
            map: None,
        }))
    }

    /// Appends a field printed through a caller-supplied value-to-text map.
    /// Values without an entry print as numbers.
    pub fn append_text_map(&mut self, field: impl Into<Field>, map: TextMap) -> &mut Self {
        self.append_node(Node::Text(TextNode {
            field: field.into(),
            style: TextStyle::Full,
            map: Some(Arc::new(map)),
        }))
    }

    /// Appends the offset as `+HH:MM:ss`, or `Z` for zero.
    pub fn append_offset_id(&mut self) -> &mut Self {
        self.append_node(Node::Offset(OffsetNode::id_z()))
    }

    /// Appends the offset in one of the layouts `+HH`, `+HHmm`, `+HH:mm`,
    /// `+HHMM`, `+HH:MM`, `+HHMMss`, `+HH:MM:ss`, `+HHMMSS` or `+HH:MM:SS`.
    /// A zero offset prints as `no_offset_text`.
    pub fn append_offset(&mut self, pattern: &str, no_offset_text: &str) -> Result<&mut Self, BuildError> {
        let node = OffsetNode::new(pattern, no_offset_text).ok_or_else(|| BuildError::InvalidOffsetPattern {
            pattern: pattern.to_string(),
        })?;
        Ok(self.append_node(Node::Offset(node)))
    }

    /// Appends the offset as `GMT+01:00` (`Full`) or `GMT+1` (`Short`).
    pub fn append_localized_offset(&mut self, style: TextStyle) -> Result<&mut Self, BuildError> {
        if style != TextStyle::Full && style != TextStyle::Short {
            return Err(BuildError::InvalidLocalizedOffsetStyle { style });
        }
        Ok(self.append_node(Node::LocalizedOffset(style)))
    }

    pub fn append_zone_id(&mut self) -> &mut Self {
        self.append_node(Node::ZoneId)
    }

    pub fn append_zone_text(&mut self, style: TextStyle) -> &mut Self {
        self.append_node(Node::ZoneText(style))
    }

    pub fn append_chronology_id(&mut self) -> &mut Self {
        self.append_node(Node::ChronologyId)
    }

    pub fn append_chronology_text(&mut self, style: TextStyle) -> &mut Self {
        self.append_node(Node::ChronologyText(style))
    }

    /// Appends the locale's pattern for the given date and time lengths.
    pub fn append_localized(
        &mut self,
        date_style: Option<FormatStyle>,
        time_style: Option<FormatStyle>,
    ) -> Result<&mut Self, BuildError> {
        if date_style.is_none() && time_style.is_none() {
            return Err(BuildError::MissingLocalizedStyle);
        }
        Ok(self.append_node(Node::Localized {
            date: date_style,
            time: time_style,
        }))
    }

    /// Appends an ISO instant, printing fractional seconds in groups of three.
    pub fn append_instant(&mut self) -> &mut Self {
        self.append_node(Node::Instant(InstantNode { fractional_digits: -2 }))
    }

    /// Appends an ISO instant with exactly `digits` fractional digits, or as
    /// many as needed for `-1`.
    pub fn append_instant_with_digits(&mut self, digits: i32) -> Result<&mut Self, BuildError> {
        if !(-1..=9).contains(&digits) {
            return Err(BuildError::InvalidFractionalDigits { digits });
        }
        Ok(self.append_node(Node::Instant(InstantNode {
            fractional_digits: digits,
        })))
    }

    /// Appends every node of `formatter` as one section.
    pub fn append_formatter(&mut self, formatter: &DateTimeFormatter) -> &mut Self {
        self.append_node(Node::Composite(formatter.root().with_optional(false)))
    }

    /// Appends `formatter` as an optional section.
    pub fn append_optional(&mut self, formatter: &DateTimeFormatter) -> &mut Self {
        self.append_node(Node::Composite(formatter.root().with_optional(true)))
    }

    /// Pads the next appended item with spaces to `width`.
    pub fn pad_next(&mut self, width: usize) -> Result<&mut Self, BuildError> {
        self.pad_next_with(width, ' ')
    }

    pub fn pad_next_with(&mut self, width: usize, pad_char: char) -> Result<&mut Self, BuildError> {
        if width < 1 {
            return Err(BuildError::InvalidPadWidth { width });
        }
        let frame = self.active();
        frame.pad_next_width = width;
        frame.pad_next_char = pad_char;
        frame.active_value = None;
        Ok(self)
    }

    /// Opens an optional section. When formatting, the section prints
    /// nothing if any value in it is unavailable; when parsing, a failure
    /// inside it rewinds and the section is skipped.
    pub fn optional_start(&mut self) -> &mut Self {
        self.active().active_value = None;
        self.open.push(Frame::new(true));
        self
    }

    /// Closes the innermost optional section.
    pub fn optional_end(&mut self) -> Result<&mut Self, BuildError> {
        let frame = self.open.pop().ok_or(BuildError::UnmatchedOptionalEnd)?;
        if !frame.nodes.is_empty() {
            self.append_internal(Node::Composite(frame.into_composite()));
        }
        Ok(self)
    }

    /// Appends the nodes described by a letter pattern such as
    /// `uuuu-MM-dd'T'HH:mm`.
    pub fn append_pattern(&mut self, pattern: &str) -> Result<&mut Self, BuildError> {
        parser::parse_pattern(pattern, self)?;
        Ok(self)
    }

    /// Whether an optional section is open.
    pub(crate) fn in_optional(&self) -> bool {
        !self.open.is_empty()
    }

    /// Closes any open optional sections and returns the finished tree.
    fn to_composite(&mut self) -> Composite {
        while self.in_optional() {
            let _ = self.optional_end();
        }
        Composite::new(self.root.nodes.clone(), false)
    }

    /// Completes the formatter with the default locale. Open optional
    /// sections are closed first.
    pub fn to_formatter(&mut self) -> DateTimeFormatter {
        DateTimeFormatter::from_root(self.to_composite(), Arc::new(Locale::default()))
    }

    pub fn to_formatter_with_locale(&mut self, locale: impl TextProvider + 'static) -> DateTimeFormatter {
        DateTimeFormatter::from_root(self.to_composite(), Arc::new(locale))
    }
}

/// Compiles a letter pattern into a node tree.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Composite, BuildError> {
    let mut builder = FormatterBuilder::new();
    builder.append_pattern(pattern)?;
    Ok(builder.to_composite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ChronoField;
    use crate::options::ResolverStyle;
    use chrono::NaiveDate;

    fn tree(builder: &mut FormatterBuilder) -> String {
        builder.to_formatter().to_string()
    }

    #[test]
    fn test_adjacent_values_reserve_width() {
        let mut builder = FormatterBuilder::new();
        builder
            .append_value(ChronoField::Year)
            .append_value_fixed(ChronoField::MonthOfYear, 2)
            .unwrap()
            .append_value_fixed(ChronoField::DayOfMonth, 2)
            .unwrap();
        let root = builder.to_composite();
        let widths: Vec<i32> = root
            .nodes()
            .iter()
            .filter_map(|node| match node {
                Node::Number(number) => Some(number.subsequent_width),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![4, -1, -1]);
    }

    #[test]
    fn test_variable_value_ends_window() {
        let mut builder = FormatterBuilder::new();
        builder
            .append_value(ChronoField::Year)
            .append_value(ChronoField::DayOfYear)
            .append_value_fixed(ChronoField::HourOfDay, 2)
            .unwrap();
        let root = builder.to_composite();
        let widths: Vec<i32> = root
            .nodes()
            .iter()
            .filter_map(|node| match node {
                Node::Number(number) => Some(number.subsequent_width),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![-1, 2, -1]);
    }

    #[test]
    fn test_adjacent_parse_without_separators() {
        let formatter = FormatterBuilder::new()
            .append_value(ChronoField::Year)
            .append_value_fixed(ChronoField::MonthOfYear, 2)
            .unwrap()
            .append_value_fixed(ChronoField::DayOfMonth, 2)
            .unwrap()
            .to_formatter();
        assert_eq!(
            formatter.parse_date("20200704").unwrap(),
            NaiveDate::from_ymd_opt(2020, 7, 4).unwrap()
        );
        assert_eq!(
            formatter.parse_date("120200704").unwrap(),
            NaiveDate::from_ymd_opt(12020, 7, 4).unwrap()
        );
    }

    #[test]
    fn test_optional_sections_nest() {
        let mut builder = FormatterBuilder::new();
        builder
            .append_value(ChronoField::HourOfDay)
            .optional_start()
            .append_literal_char(':')
            .append_value(ChronoField::MinuteOfHour)
            .optional_start()
            .append_literal_char(':')
            .append_value(ChronoField::SecondOfMinute);
        assert_eq!(
            tree(&mut builder),
            "Value(HourOfDay)[':'Value(MinuteOfHour)[':'Value(SecondOfMinute)]]"
        );
    }

    #[test]
    fn test_optional_end_errors() {
        let mut builder = FormatterBuilder::new();
        assert_eq!(builder.optional_end().unwrap_err(), BuildError::UnmatchedOptionalEnd);
        builder.optional_start().optional_end().unwrap();
        assert_eq!(tree(&mut builder), "");
    }

    #[test]
    fn test_validation() {
        let mut builder = FormatterBuilder::new();
        assert!(matches!(
            builder.append_value_fixed(ChronoField::Year, 20),
            Err(BuildError::InvalidWidth { width: 20, .. })
        ));
        assert!(matches!(
            builder.append_value_with(ChronoField::Year, 4, 2, SignStyle::Normal),
            Err(BuildError::WidthOrder { min_width: 4, max_width: 2 })
        ));
        assert!(matches!(
            builder.append_value_reduced(ChronoField::Year, 2, 11, 2000),
            Err(BuildError::InvalidWidth { width: 11, .. })
        ));
        assert!(matches!(
            builder.append_value_reduced(ChronoField::MonthOfYear, 2, 2, 2000),
            Err(BuildError::InvalidBaseValue { base: 2000, .. })
        ));
        assert!(matches!(
            builder.append_fraction(ChronoField::DayOfMonth, 0, 9, true),
            Err(BuildError::VariableRange { .. })
        ));
        assert!(matches!(
            builder.append_fraction(ChronoField::NanoOfSecond, 0, 10, true),
            Err(BuildError::InvalidWidth { width: 10, .. })
        ));
        assert_eq!(builder.pad_next(0).unwrap_err(), BuildError::InvalidPadWidth { width: 0 });
        assert!(matches!(
            builder.append_offset("+HH:mm:ss", "Z"),
            Err(BuildError::InvalidOffsetPattern { .. })
        ));
        assert_eq!(
            builder.append_localized_offset(TextStyle::Narrow).unwrap_err(),
            BuildError::InvalidLocalizedOffsetStyle { style: TextStyle::Narrow }
        );
        assert_eq!(builder.append_localized(None, None).unwrap_err(), BuildError::MissingLocalizedStyle);
        assert_eq!(
            builder.append_instant_with_digits(10).unwrap_err(),
            BuildError::InvalidFractionalDigits { digits: 10 }
        );
    }

    #[test]
    fn test_pad_wraps_next_node_only() {
        let date = NaiveDate::from_ymd_opt(2020, 7, 4).unwrap();
        let formatter = FormatterBuilder::new()
            .pad_next(4)
            .unwrap()
            .append_value(ChronoField::MonthOfYear)
            .append_literal_char('|')
            .append_value(ChronoField::DayOfMonth)
            .to_formatter();
        assert_eq!(formatter.format(&date).unwrap(), "   7|4");
        assert_eq!(formatter.to_string(), "Pad(Value(MonthOfYear),4)'|'Value(DayOfMonth)");
    }

    #[test]
    fn test_padded_value_stays_out_of_window() {
        let mut builder = FormatterBuilder::new();
        builder
            .pad_next(4)
            .unwrap()
            .append_value(ChronoField::Year)
            .append_value_fixed(ChronoField::MonthOfYear, 2)
            .unwrap()
            .append_value_fixed(ChronoField::DayOfMonth, 2)
            .unwrap();
        let root = builder.to_composite();
        let padded = root.nodes().iter().find_map(|node| match node {
            Node::Pad(pad) => match pad.inner.as_ref() {
                Node::Number(number) => Some(number.subsequent_width),
                _ => None,
            },
            _ => None,
        });
        assert_eq!(padded, Some(0));
        let widths: Vec<i32> = root
            .nodes()
            .iter()
            .filter_map(|node| match node {
                Node::Number(number) => Some(number.subsequent_width),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![2, -1]);

        let formatter = builder.to_formatter();
        let date = NaiveDate::from_ymd_opt(2020, 7, 4).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "20200704");
    }

    #[test]
    fn test_parse_defaulting() {
        let formatter = FormatterBuilder::new()
            .append_value_fixed(ChronoField::Year, 4)
            .unwrap()
            .parse_defaulting(ChronoField::MonthOfYear, 1)
            .parse_defaulting(ChronoField::DayOfMonth, 1)
            .to_formatter();
        assert_eq!(
            formatter.parse_date("2020").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_append_optional_formatter() {
        let time = FormatterBuilder::new()
            .append_literal_char('T')
            .append_value_fixed(ChronoField::HourOfDay, 2)
            .unwrap()
            .to_formatter();
        let formatter = FormatterBuilder::new()
            .append_formatter(&DateTimeFormatter::iso_local_date())
            .append_optional(&time)
            .to_formatter()
            .with_resolver_style(ResolverStyle::Strict);
        let date = NaiveDate::from_ymd_opt(2020, 7, 4).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "2020-07-04");
        assert_eq!(formatter.format(&date.and_hms_opt(9, 0, 0).unwrap()).unwrap(), "2020-07-04T09");
        let parsed = formatter.parse("2020-07-04T09").unwrap();
        assert_eq!(parsed.time(), chrono::NaiveTime::from_hms_opt(9, 0, 0));
    }
}
