//! Formatting and parsing options.

use std::fmt;

/// How strictly parsed field values are validated while resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolverStyle {
    /// Exact ranges and consistency checks; values that roll into a
    /// different month or year are rejected.
    Strict,
    /// Nominal ranges, still consistency-checked.
    #[default]
    Smart,
    /// Arithmetic only, minimal validation.
    Lenient,
}

impl fmt::Display for ResolverStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResolverStyle::Strict => "STRICT",
            ResolverStyle::Smart => "SMART",
            ResolverStyle::Lenient => "LENIENT",
        })
    }
}

/// Handling of the positive/negative sign for numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignStyle {
    /// Output the sign only if the value is negative.
    Normal,
    /// Always output the sign.
    Always,
    /// Never output the sign, only the absolute value.
    Never,
    /// Block negative values from being output.
    NotNegative,
    /// Output the sign only if the value exceeds the pad width.
    ExceedsPad,
}

impl SignStyle {
    /// Whether a parsed sign is acceptable.
    pub(crate) fn accepts_sign(&self, positive: bool, strict: bool, fixed_width: bool) -> bool {
        match self {
            SignStyle::Normal => !positive || !strict,
            SignStyle::Always | SignStyle::ExceedsPad => true,
            SignStyle::Never | SignStyle::NotNegative => !strict && !fixed_width,
        }
    }
}

impl fmt::Display for SignStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignStyle::Normal => "NORMAL",
            SignStyle::Always => "ALWAYS",
            SignStyle::Never => "NEVER",
            SignStyle::NotNegative => "NOT_NEGATIVE",
            SignStyle::ExceedsPad => "EXCEEDS_PAD",
        })
    }
}

/// Size of the text used for a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextStyle {
    /// Full text, typically the full description ("January").
    Full,
    /// Full text for stand-alone use.
    FullStandalone,
    /// Short text, typically an abbreviation ("Jan").
    Short,
    /// Short text for stand-alone use.
    ShortStandalone,
    /// Narrow text, typically a single letter ("J").
    Narrow,
    /// Narrow text for stand-alone use.
    NarrowStandalone,
}

impl TextStyle {
    pub const ALL: [TextStyle; 6] = [
        TextStyle::Full,
        TextStyle::FullStandalone,
        TextStyle::Short,
        TextStyle::ShortStandalone,
        TextStyle::Narrow,
        TextStyle::NarrowStandalone,
    ];

    pub fn is_standalone(&self) -> bool {
        matches!(
            self,
            TextStyle::FullStandalone | TextStyle::ShortStandalone | TextStyle::NarrowStandalone
        )
    }

    /// The non-standalone counterpart of this style.
    pub fn as_normal(&self) -> TextStyle {
        match self {
            TextStyle::FullStandalone => TextStyle::Full,
            TextStyle::ShortStandalone => TextStyle::Short,
            TextStyle::NarrowStandalone => TextStyle::Narrow,
            other => *other,
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextStyle::Full => "FULL",
            TextStyle::FullStandalone => "FULL_STANDALONE",
            TextStyle::Short => "SHORT",
            TextStyle::ShortStandalone => "SHORT_STANDALONE",
            TextStyle::Narrow => "NARROW",
            TextStyle::NarrowStandalone => "NARROW_STANDALONE",
        })
    }
}

/// Length of a localized date or time pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatStyle {
    Full,
    Long,
    Medium,
    Short,
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatStyle::Full => "FULL",
            FormatStyle::Long => "LONG",
            FormatStyle::Medium => "MEDIUM",
            FormatStyle::Short => "SHORT",
        })
    }
}

/// Localized symbols used for numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalStyle {
    pub zero_digit: char,
    pub positive_sign: char,
    pub negative_sign: char,
    pub decimal_separator: char,
}

impl Default for DecimalStyle {
    fn default() -> Self {
        DecimalStyle {
            zero_digit: '0',
            positive_sign: '+',
            negative_sign: '-',
            decimal_separator: '.',
        }
    }
}

impl DecimalStyle {
    /// Converts a character to a digit relative to the zero digit.
    pub fn convert_to_digit(&self, ch: char) -> Option<u32> {
        let value = (ch as u32).checked_sub(self.zero_digit as u32)?;
        if value <= 9 {
            Some(value)
        } else {
            None
        }
    }

    /// Rewrites ASCII digits in `numeric` to use the zero digit.
    pub fn localize_digits(&self, numeric: &str) -> String {
        if self.zero_digit == '0' {
            return numeric.to_string();
        }
        let offset = self.zero_digit as u32 - '0' as u32;
        numeric
            .chars()
            .map(|ch| match ch {
                '0'..='9' => char::from_u32(ch as u32 + offset).unwrap_or(ch),
                _ => ch,
            })
            .collect()
    }
}
