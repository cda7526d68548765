//! The predefined ISO-8601 formatters.

use std::sync::Arc;

use crate::ast::{FractionNode, Node, NumberNode, OffsetNode};
use crate::builder::FormatterBuilder;
use crate::chronology::IsoChronology;
use crate::field::{iso, ChronoField};
use crate::formatter::DateTimeFormatter;
use crate::options::{ResolverStyle, SignStyle};

fn fixed(field: ChronoField, width: usize) -> NumberNode {
    NumberNode::new(field, width, width, SignStyle::NotNegative)
}

fn iso_year(builder: &mut FormatterBuilder) -> &mut FormatterBuilder {
    builder.append_number(NumberNode::new(ChronoField::Year, 4, 10, SignStyle::ExceedsPad))
}

fn append_local_date(builder: &mut FormatterBuilder) -> &mut FormatterBuilder {
    iso_year(builder)
        .append_literal_char('-')
        .append_number(fixed(ChronoField::MonthOfYear, 2))
        .append_literal_char('-')
        .append_number(fixed(ChronoField::DayOfMonth, 2))
}

fn append_local_time(builder: &mut FormatterBuilder) -> &mut FormatterBuilder {
    builder
        .append_number(fixed(ChronoField::HourOfDay, 2))
        .append_literal_char(':')
        .append_number(fixed(ChronoField::MinuteOfHour, 2))
        .optional_start()
        .append_literal_char(':')
        .append_number(fixed(ChronoField::SecondOfMinute, 2))
        .optional_start()
        .append_node(Node::Fraction(FractionNode {
            field: ChronoField::NanoOfSecond.into(),
            min_width: 0,
            max_width: 9,
            decimal_point: true,
        }))
}

/// Strict ISO formatters resolve with the ISO chronology.
fn finish(builder: &mut FormatterBuilder) -> DateTimeFormatter {
    builder
        .to_formatter()
        .with_resolver_style(ResolverStyle::Strict)
        .with_chronology(Some(Arc::new(IsoChronology)))
}

impl DateTimeFormatter {
    /// `2011-12-03`
    pub fn iso_local_date() -> Self {
        let mut builder = FormatterBuilder::new();
        append_local_date(&mut builder);
        finish(&mut builder)
    }

    /// `10:15` or `10:15:30.5`
    pub fn iso_local_time() -> Self {
        let mut builder = FormatterBuilder::new();
        append_local_time(&mut builder);
        finish(&mut builder)
    }

    /// `2011-12-03T10:15:30`
    pub fn iso_local_date_time() -> Self {
        let mut builder = FormatterBuilder::new();
        builder
            .parse_case_insensitive()
            .append_formatter(&DateTimeFormatter::iso_local_date())
            .append_literal_char('T')
            .append_formatter(&DateTimeFormatter::iso_local_time());
        finish(&mut builder)
    }

    /// `2011-12-03T10:15:30+01:00`
    pub fn iso_offset_date_time() -> Self {
        let mut builder = FormatterBuilder::new();
        builder
            .parse_case_insensitive()
            .append_formatter(&DateTimeFormatter::iso_local_date_time())
            .append_offset_id();
        finish(&mut builder)
    }

    /// `2012-337`, with an optional offset.
    pub fn iso_ordinal_date() -> Self {
        let mut builder = FormatterBuilder::new();
        builder.parse_case_insensitive();
        iso_year(&mut builder)
            .append_literal_char('-')
            .append_number(fixed(ChronoField::DayOfYear, 3))
            .optional_start()
            .append_offset_id();
        finish(&mut builder)
    }

    /// `2012-W48-6`, with an optional offset.
    pub fn iso_week_date() -> Self {
        let mut builder = FormatterBuilder::new();
        builder
            .parse_case_insensitive()
            .append_number(NumberNode::new(iso::week_based_year(), 4, 10, SignStyle::ExceedsPad))
            .append_literal("-W")
            .append_number(NumberNode::new(iso::week_of_week_based_year(), 2, 2, SignStyle::NotNegative))
            .append_literal_char('-')
            .append_number(fixed(ChronoField::DayOfWeek, 1))
            .optional_start()
            .append_offset_id();
        finish(&mut builder)
    }

    /// `20111203`, with an optional `+HHMMss` offset.
    pub fn basic_iso_date() -> Self {
        let mut builder = FormatterBuilder::new();
        builder
            .parse_case_insensitive()
            .append_number(fixed(ChronoField::Year, 4))
            .append_number(fixed(ChronoField::MonthOfYear, 2))
            .append_number(fixed(ChronoField::DayOfMonth, 2))
            .optional_start()
            .parse_lenient()
            .append_node(Node::Offset(OffsetNode {
                pattern: 5,
                no_offset_text: "Z".to_string(),
            }))
            .parse_strict();
        finish(&mut builder)
    }

    /// `2011-12-03T10:15:30Z`, always in UTC.
    pub fn iso_instant() -> Self {
        let mut builder = FormatterBuilder::new();
        builder.parse_case_insensitive().append_instant();
        finish(&mut builder)
    }
}
