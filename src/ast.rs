//! The printer-parser tree a formatter is built from.
//!
//! Every [`Node`] knows how to print part of a temporal value and how to
//! parse the same shape back into field values. The tree is assembled by
//! [`FormatterBuilder`](crate::FormatterBuilder) and is immutable once a
//! [`DateTimeFormatter`](crate::DateTimeFormatter) owns it.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::field::{Field, WeekFields};
use crate::options::{FormatStyle, SignStyle, TextStyle};

/// Powers of ten, used for width limits and reduced values.
pub(crate) const EXCEED_POINTS: [i64; 19] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
];

/// A node of the printer-parser tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A single literal character.
    Char(char),
    /// A literal string.
    Str(String),
    /// A numeric field value, possibly reduced to its low digits.
    Number(NumberNode),
    /// A field printed as a decimal fraction of its range.
    Fraction(FractionNode),
    /// A field printed as localized text.
    Text(TextNode),
    /// A zone offset such as `+01:00`.
    Offset(OffsetNode),
    /// A zone offset prefixed by the localized GMT text.
    LocalizedOffset(TextStyle),
    ZoneId,
    ZoneText(TextStyle),
    ChronologyId,
    ChronologyText(TextStyle),
    /// A localized date and/or time pattern, compiled on use.
    Localized {
        date: Option<FormatStyle>,
        time: Option<FormatStyle>,
    },
    /// An ISO-8601 instant in UTC.
    Instant(InstantNode),
    /// An ordered sequence, optionally treated as an optional section.
    Composite(Composite),
    /// Pads the output of the inner node to a fixed width.
    Pad(PadNode),
    /// Changes parse settings for the rest of the enclosing composite.
    Settings(Setting),
    /// Records a value during parsing if the field has none yet.
    Default { field: Field, value: i64 },
}

/// The field printed by a numeric node.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberField {
    Field(Field),
    /// A localized week field chosen by the formatter's week definition.
    Week { letter: char, count: usize },
}

/// Numeric printing and parsing of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberNode {
    pub(crate) field: NumberField,
    pub(crate) min_width: usize,
    pub(crate) max_width: usize,
    pub(crate) sign_style: SignStyle,
    /// Width reserved for adjacent fixed-width values, `-1` when this node
    /// is itself one of those fixed-width values.
    pub(crate) subsequent_width: i32,
    /// Set for reduced values: the base of the window of `10^min_width`
    /// values that the low digits are read against.
    pub(crate) base_value: Option<i64>,
}

impl NumberNode {
    pub(crate) fn new(field: impl Into<Field>, min_width: usize, max_width: usize, sign_style: SignStyle) -> Self {
        NumberNode {
            field: NumberField::Field(field.into()),
            min_width,
            max_width,
            sign_style,
            subsequent_width: 0,
            base_value: None,
        }
    }

    pub(crate) fn reduced(field: impl Into<Field>, min_width: usize, max_width: usize, base_value: i64) -> Self {
        NumberNode {
            base_value: Some(base_value),
            ..NumberNode::new(field, min_width, max_width, SignStyle::NotNegative)
        }
    }

    pub(crate) fn week(letter: char, count: usize, min_width: usize, max_width: usize) -> Self {
        NumberNode {
            field: NumberField::Week { letter, count },
            min_width,
            max_width,
            sign_style: SignStyle::NotNegative,
            subsequent_width: 0,
            base_value: None,
        }
    }

    /// Whether the builder may reserve this node's width for an earlier
    /// variable-width value.
    pub(crate) fn is_adjacent_candidate(&self) -> bool {
        self.min_width == self.max_width && self.sign_style == SignStyle::NotNegative
    }

    pub(crate) fn with_fixed_width(&self) -> Self {
        NumberNode {
            subsequent_width: -1,
            ..self.clone()
        }
    }

    pub(crate) fn with_subsequent_width(&self, width: usize) -> Self {
        NumberNode {
            subsequent_width: self.subsequent_width + width as i32,
            ..self.clone()
        }
    }

    /// Whether the width is fixed during parsing, either by adjacent
    /// reservation or because this node is one of the reserved values.
    pub(crate) fn is_fixed_width(&self, strict: bool) -> bool {
        let localized = self.base_value.is_some() || matches!(self.field, NumberField::Week { .. });
        if localized && !strict {
            return false;
        }
        self.subsequent_width == -1
            || (self.subsequent_width > 0
                && self.min_width == self.max_width
                && self.sign_style == SignStyle::NotNegative)
    }

    /// The field printed and the node to print it with, resolving a week
    /// letter against `weeks`.
    pub(crate) fn concrete(&self, weeks: WeekFields) -> (Field, Cow<'_, NumberNode>) {
        match &self.field {
            NumberField::Field(field) => (field.clone(), Cow::Borrowed(self)),
            NumberField::Week { .. } => {
                let (field, node) = self.localize(weeks);
                (field, Cow::Owned(node))
            }
        }
    }

    /// Resolves a week letter against `weeks` into a plain numeric node.
    pub(crate) fn localize(&self, weeks: WeekFields) -> (Field, NumberNode) {
        let (letter, count) = match &self.field {
            NumberField::Field(field) => return (field.clone(), self.clone()),
            NumberField::Week { letter, count } => (*letter, *count),
        };
        let field = match letter {
            'Y' => weeks.week_based_year(),
            'w' => weeks.week_of_week_based_year(),
            'W' => weeks.week_of_month(),
            _ => weeks.day_of_week(),
        };
        let mut node = match letter {
            'Y' if count == 2 => NumberNode::reduced(field.clone(), 2, 2, 2000),
            'Y' => {
                let sign = if count < 4 { SignStyle::Normal } else { SignStyle::ExceedsPad };
                NumberNode::new(field.clone(), count, 19, sign)
            }
            _ => {
                let min = if count == 2 { 2 } else { 1 };
                NumberNode::new(field.clone(), min, 2, SignStyle::NotNegative)
            }
        };
        node.subsequent_width = self.subsequent_width;
        (field, node)
    }
}

/// A field printed as a fraction of its range, such as nano-of-second.
#[derive(Debug, Clone, PartialEq)]
pub struct FractionNode {
    pub(crate) field: Field,
    pub(crate) min_width: usize,
    pub(crate) max_width: usize,
    pub(crate) decimal_point: bool,
}

/// Mapping from field value to text supplied by the caller.
pub type TextMap = BTreeMap<i64, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub(crate) field: Field,
    pub(crate) style: TextStyle,
    pub(crate) map: Option<Arc<TextMap>>,
}

/// The offset layouts understood by [`OffsetNode`]. Lowercase parts are
/// omitted when zero.
pub(crate) const OFFSET_PATTERNS: [&str; 9] = [
    "+HH", "+HHmm", "+HH:mm", "+HHMM", "+HH:MM", "+HHMMss", "+HH:MM:ss", "+HHMMSS", "+HH:MM:SS",
];

#[derive(Debug, Clone, PartialEq)]
pub struct OffsetNode {
    pub(crate) pattern: usize,
    pub(crate) no_offset_text: String,
}

impl OffsetNode {
    /// `None` if `pattern` is not one of the supported layouts.
    pub(crate) fn new(pattern: &str, no_offset_text: &str) -> Option<Self> {
        let index = OFFSET_PATTERNS.iter().position(|known| *known == pattern)?;
        Some(OffsetNode {
            pattern: index,
            no_offset_text: no_offset_text.to_string(),
        })
    }

    /// The layout used inside zone ids and instants.
    pub(crate) fn id_z() -> Self {
        OffsetNode {
            pattern: 6,
            no_offset_text: "Z".to_string(),
        }
    }

    /// Like [`OffsetNode::id_z`] but a zero offset is `0`.
    pub(crate) fn id_zero() -> Self {
        OffsetNode {
            pattern: 6,
            no_offset_text: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantNode {
    /// Exact digit count `0..=9`, `-1` for as many as needed, `-2` for
    /// groups of three.
    pub(crate) fractional_digits: i32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composite {
    pub(crate) nodes: Vec<Node>,
    pub(crate) optional: bool,
}

impl Composite {
    pub(crate) fn new(nodes: Vec<Node>, optional: bool) -> Self {
        Composite { nodes, optional }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The same nodes, with the optional flag replaced.
    pub(crate) fn with_optional(&self, optional: bool) -> Self {
        if self.optional == optional {
            return self.clone();
        }
        Composite {
            nodes: self.nodes.clone(),
            optional,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PadNode {
    pub(crate) inner: Box<Node>,
    pub(crate) width: usize,
    pub(crate) pad_char: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    CaseSensitive,
    CaseInsensitive,
    Strict,
    Lenient,
}

impl fmt::Display for NumberNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.field, self.base_value) {
            (NumberField::Week { letter, count }, _) => {
                let count = *count;
                f.write_str("Localized(")?;
                match letter {
                    'Y' if count == 1 => f.write_str("WeekBasedYear")?,
                    'Y' if count == 2 => f.write_str("ReducedValue(WeekBasedYear,2,2,2000)")?,
                    'Y' => {
                        let sign = if count < 4 { SignStyle::Normal } else { SignStyle::ExceedsPad };
                        write!(f, "WeekBasedYear,{count},19,{sign}")?
                    }
                    'w' => write!(f, "WeekOfWeekBasedYear,{count}")?,
                    'W' => write!(f, "WeekOfMonth,{count}")?,
                    _ => write!(f, "DayOfWeek,{count}")?,
                }
                f.write_str(")")
            }
            (NumberField::Field(field), Some(base)) => write!(
                f,
                "ReducedValue({},{},{},{})",
                field, self.min_width, self.max_width, base
            ),
            (NumberField::Field(field), None) => {
                if self.min_width == 1 && self.max_width == 19 && self.sign_style == SignStyle::Normal {
                    write!(f, "Value({field})")
                } else if self.min_width == self.max_width && self.sign_style == SignStyle::NotNegative {
                    write!(f, "Value({},{})", field, self.min_width)
                } else {
                    write!(
                        f,
                        "Value({},{},{},{})",
                        field, self.min_width, self.max_width, self.sign_style
                    )
                }
            }
        }
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.optional { "[" } else { "(" })?;
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        f.write_str(if self.optional { "]" } else { ")" })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Char('\'') => f.write_str("''"),
            Node::Char(ch) => write!(f, "'{ch}'"),
            Node::Str(text) => write!(f, "'{}'", text.replace('\'', "''")),
            Node::Number(node) => write!(f, "{node}"),
            Node::Fraction(node) => write!(
                f,
                "Fraction({},{},{}{})",
                node.field,
                node.min_width,
                node.max_width,
                if node.decimal_point { ",DecimalPoint" } else { "" }
            ),
            Node::Text(node) if node.style == TextStyle::Full => write!(f, "Text({})", node.field),
            Node::Text(node) => write!(f, "Text({},{})", node.field, node.style),
            Node::Offset(node) => write!(
                f,
                "Offset({},'{}')",
                OFFSET_PATTERNS[node.pattern],
                node.no_offset_text.replace('\'', "''")
            ),
            Node::LocalizedOffset(style) => write!(f, "LocalizedOffset({style})"),
            Node::ZoneId => f.write_str("ZoneId()"),
            Node::ZoneText(style) => write!(f, "ZoneText({style})"),
            Node::ChronologyId => f.write_str("ChronologyId()"),
            Node::ChronologyText(style) => write!(f, "ChronologyText({style})"),
            Node::Localized { date, time } => {
                f.write_str("Localized(")?;
                if let Some(date) = date {
                    write!(f, "{date}")?;
                }
                f.write_str(",")?;
                if let Some(time) = time {
                    write!(f, "{time}")?;
                }
                f.write_str(")")
            }
            Node::Instant(_) => f.write_str("Instant()"),
            Node::Composite(composite) => write!(f, "{composite}"),
            Node::Pad(pad) => {
                write!(f, "Pad({},{}", pad.inner, pad.width)?;
                if pad.pad_char == ' ' {
                    f.write_str(")")
                } else {
                    write!(f, ",'{}')", pad.pad_char)
                }
            }
            Node::Settings(setting) => f.write_str(match setting {
                Setting::CaseSensitive => "ParseCaseSensitive(true)",
                Setting::CaseInsensitive => "ParseCaseSensitive(false)",
                Setting::Strict => "ParseStrict(true)",
                Setting::Lenient => "ParseStrict(false)",
            }),
            Node::Default { field, value } => write!(f, "Default({field},{value})"),
        }
    }
}
