//! Compiler for letter patterns such as `uuuu-MM-dd HH:mm`.
//!
//! Each run of one letter selects a field and the run length selects how
//! it prints. The compiler drives a [`FormatterBuilder`], so a pattern and
//! the equivalent builder calls produce the same tree.

pub mod lexer;
pub mod tokens;

use crate::ast::{NumberNode, OFFSET_PATTERNS};
use crate::builder::FormatterBuilder;
use crate::error::BuildError;
use crate::field::{iso, julian, ChronoField, Field};
use crate::options::{SignStyle, TextStyle};
use lexer::Lexer;
use tokens::{SpannedToken, Token};

/// Base of the two-digit year window, as in `yy` printing 2000 to 2099.
const REDUCED_BASE_YEAR: i64 = 2000;

/// Compile `pattern` into `builder`.
pub fn parse_pattern(pattern: &str, builder: &mut FormatterBuilder) -> Result<(), BuildError> {
    let mut parser = Parser::new(pattern, builder)?;
    parser.parse()
}

pub(crate) fn pattern_error(pattern: &str, position: usize, reason: impl Into<String>) -> BuildError {
    BuildError::Pattern {
        pattern: pattern.to_string(),
        position,
        reason: reason.into(),
    }
}

/// Reports a builder rejection as a pattern error at `position`.
fn rejected(pattern: &str, position: usize) -> impl Fn(BuildError) -> BuildError + '_ {
    move |err| pattern_error(pattern, position, err.to_string())
}

/// The field a letter prints, for letters handled as plain fields.
fn field_for(letter: char) -> Option<Field> {
    let field = match letter {
        'G' => ChronoField::Era.into(),
        'y' => ChronoField::YearOfEra.into(),
        'u' => ChronoField::Year.into(),
        'Q' | 'q' => iso::quarter_of_year(),
        'M' | 'L' => ChronoField::MonthOfYear.into(),
        'D' => ChronoField::DayOfYear.into(),
        'd' => ChronoField::DayOfMonth.into(),
        'F' => ChronoField::AlignedWeekOfMonth.into(),
        'E' | 'c' | 'e' => ChronoField::DayOfWeek.into(),
        'a' => ChronoField::AmPmOfDay.into(),
        'H' => ChronoField::HourOfDay.into(),
        'k' => ChronoField::ClockHourOfDay.into(),
        'K' => ChronoField::HourOfAmPm.into(),
        'h' => ChronoField::ClockHourOfAmPm.into(),
        'm' => ChronoField::MinuteOfHour.into(),
        's' => ChronoField::SecondOfMinute.into(),
        'S' | 'n' => ChronoField::NanoOfSecond.into(),
        'A' => ChronoField::MilliOfDay.into(),
        'N' => ChronoField::NanoOfDay.into(),
        'g' => julian::modified_julian_day(),
        _ => return None,
    };
    Some(field)
}

fn text_style(count: usize, standalone: bool) -> Option<TextStyle> {
    let style = match (count, standalone) {
        (3, false) => TextStyle::Short,
        (3, true) => TextStyle::ShortStandalone,
        (4, false) => TextStyle::Full,
        (4, true) => TextStyle::FullStandalone,
        (5, false) => TextStyle::Narrow,
        (5, true) => TextStyle::NarrowStandalone,
        _ => return None,
    };
    Some(style)
}

/// Parser for letter patterns.
struct Parser<'a, 'b> {
    pattern: &'a str,
    lexer: Lexer<'a>,
    /// Current token
    current: SpannedToken,
    builder: &'b mut FormatterBuilder,
}

impl<'a, 'b> Parser<'a, 'b> {
    fn new(pattern: &'a str, builder: &'b mut FormatterBuilder) -> Result<Self, BuildError> {
        let mut lexer = Lexer::new(pattern);
        let current = lexer.next_token()?;
        Ok(Self {
            pattern,
            lexer,
            current,
            builder,
        })
    }

    /// Advance to the next token.
    fn advance(&mut self) -> Result<(), BuildError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, position: usize, reason: impl Into<String>) -> BuildError {
        pattern_error(self.pattern, position, reason)
    }

    fn parse(&mut self) -> Result<(), BuildError> {
        let pattern = self.pattern;
        loop {
            let start = self.current.start;
            match self.current.token.clone() {
                Token::Eof => return Ok(()),
                Token::Letters { letter: 'p', count } => {
                    self.advance()?;
                    let Token::Letters { letter, count: width } = self.current.token.clone() else {
                        return Err(self.error(start, "pad letter 'p' must be followed by valid pad pattern"));
                    };
                    self.builder.pad_next(count).map_err(rejected(pattern, start))?;
                    let field_start = self.current.start;
                    self.parse_letters(letter, width, field_start)?;
                }
                Token::Letters { letter, count } => self.parse_letters(letter, count, start)?,
                Token::Literal(text) => {
                    self.builder.append_literal(&text);
                }
                Token::Char(ch) => {
                    self.builder.append_literal_char(ch);
                }
                Token::OptionalStart => {
                    self.builder.optional_start();
                }
                Token::OptionalEnd => {
                    if !self.builder.in_optional() {
                        return Err(self.error(start, "pattern invalid as it contains ] without previous ["));
                    }
                    self.builder.optional_end().map_err(rejected(pattern, start))?;
                }
                Token::Reserved(ch) => {
                    return Err(self.error(start, format!("pattern includes reserved character: '{ch}'")));
                }
            }
            self.advance()?;
        }
    }

    /// Appends the nodes for one letter run.
    fn parse_letters(&mut self, letter: char, count: usize, start: usize) -> Result<(), BuildError> {
        let pattern = self.pattern;
        let too_many = || pattern_error(pattern, start, format!("too many pattern letters: {letter}"));
        match letter {
            'V' => {
                if count != 2 {
                    return Err(self.error(start, format!("pattern letter count must be 2: {letter}")));
                }
                self.builder.append_zone_id();
            }
            'z' => {
                if count > 4 {
                    return Err(too_many());
                }
                let style = if count == 4 { TextStyle::Full } else { TextStyle::Short };
                self.builder.append_zone_text(style);
            }
            'Z' => match count {
                1..=3 => {
                    self.builder.append_offset("+HHMM", "+0000").map_err(rejected(pattern, start))?;
                }
                4 => {
                    self.builder
                        .append_localized_offset(TextStyle::Full)
                        .map_err(rejected(pattern, start))?;
                }
                5 => {
                    self.builder.append_offset("+HH:MM:ss", "Z").map_err(rejected(pattern, start))?;
                }
                _ => return Err(too_many()),
            },
            'O' => {
                let style = match count {
                    1 => TextStyle::Short,
                    4 => TextStyle::Full,
                    _ => return Err(self.error(start, format!("pattern letter count must be 1 or 4: {letter}"))),
                };
                self.builder.append_localized_offset(style).map_err(rejected(pattern, start))?;
            }
            'X' | 'x' => {
                if count > 5 {
                    return Err(too_many());
                }
                let layout = OFFSET_PATTERNS[count + usize::from(count != 1)];
                let zero = match (letter, count) {
                    ('X', _) => "Z",
                    (_, 1) => "+00",
                    (_, count) if count % 2 == 0 => "+0000",
                    _ => "+00:00",
                };
                self.builder.append_offset(layout, zero).map_err(rejected(pattern, start))?;
            }
            'W' => {
                if count > 1 {
                    return Err(too_many());
                }
                self.builder.append_number(NumberNode::week('W', 1, 1, 1));
            }
            'w' => {
                if count > 2 {
                    return Err(too_many());
                }
                self.builder.append_number(NumberNode::week('w', count, count, 2));
            }
            'Y' => {
                if count > 19 {
                    return Err(too_many());
                }
                let node = if count == 2 {
                    NumberNode::week('Y', 2, 2, 2)
                } else {
                    NumberNode::week('Y', count, count, 19)
                };
                self.builder.append_number(node);
            }
            _ => {
                let Some(field) = field_for(letter) else {
                    return Err(self.error(start, format!("unknown pattern letter: {letter}")));
                };
                self.parse_field(letter, count, field, start)?;
            }
        }
        Ok(())
    }

    /// Appends a letter that maps directly onto a field.
    fn parse_field(&mut self, letter: char, count: usize, field: Field, start: usize) -> Result<(), BuildError> {
        let pattern = self.pattern;
        let too_many = || pattern_error(pattern, start, format!("too many pattern letters: {letter}"));
        match letter {
            'u' | 'y' => {
                if count == 2 {
                    self.builder
                        .append_value_reduced(field, 2, 2, REDUCED_BASE_YEAR)
                        .map_err(rejected(pattern, start))?;
                } else {
                    let sign = if count < 4 { SignStyle::Normal } else { SignStyle::ExceedsPad };
                    self.builder
                        .append_value_with(field, count, 19, sign)
                        .map_err(rejected(pattern, start))?;
                }
            }
            'c' | 'L' | 'q' | 'M' | 'Q' | 'E' | 'e' => {
                if letter == 'c' && count == 2 {
                    return Err(self.error(start, "invalid pattern \"cc\""));
                }
                let standalone = matches!(letter, 'c' | 'L' | 'q');
                match count {
                    1 | 2 => match letter {
                        'c' | 'e' => {
                            self.builder.append_number(NumberNode::week(letter, count, count, count));
                        }
                        'E' => {
                            self.builder.append_text(field, TextStyle::Short);
                        }
                        _ if count == 1 => {
                            self.builder.append_value(field);
                        }
                        _ => {
                            self.builder.append_value_fixed(field, 2).map_err(rejected(pattern, start))?;
                        }
                    },
                    _ => {
                        let style = text_style(count, standalone).ok_or_else(too_many)?;
                        self.builder.append_text(field, style);
                    }
                }
            }
            'a' => {
                if count != 1 {
                    return Err(too_many());
                }
                self.builder.append_text(field, TextStyle::Short);
            }
            'G' => {
                let style = match count {
                    1..=3 => TextStyle::Short,
                    _ => text_style(count, false).ok_or_else(too_many)?,
                };
                self.builder.append_text(field, style);
            }
            'S' => {
                self.builder
                    .append_fraction(field, count, count, false)
                    .map_err(rejected(pattern, start))?;
            }
            'F' => {
                if count != 1 {
                    return Err(too_many());
                }
                self.builder.append_value(field);
            }
            'd' | 'h' | 'H' | 'k' | 'K' | 'm' | 's' => match count {
                1 => {
                    self.builder.append_value(field);
                }
                2 => {
                    self.builder.append_value_fixed(field, 2).map_err(rejected(pattern, start))?;
                }
                _ => return Err(too_many()),
            },
            'D' => match count {
                1 => {
                    self.builder.append_value(field);
                }
                2 | 3 => {
                    self.builder
                        .append_value_with(field, count, 3, SignStyle::NotNegative)
                        .map_err(rejected(pattern, start))?;
                }
                _ => return Err(too_many()),
            },
            'g' => {
                self.builder
                    .append_value_with(field, count, 19, SignStyle::Normal)
                    .map_err(rejected(pattern, start))?;
            }
            _ => {
                if count == 1 {
                    self.builder.append_value(field);
                } else {
                    self.builder.append_value_fixed(field, count).map_err(rejected(pattern, start))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::DateTimeFormatter;

    fn compile(pattern: &str) -> String {
        DateTimeFormatter::of_pattern(pattern).unwrap().to_string()
    }

    fn error_position(pattern: &str) -> usize {
        match DateTimeFormatter::of_pattern(pattern).unwrap_err() {
            BuildError::Pattern { position, .. } => position,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_date_letters() {
        assert_eq!(
            compile("uuuu-MM-dd"),
            "Value(Year,4,19,EXCEEDS_PAD)'-'Value(MonthOfYear,2)'-'Value(DayOfMonth,2)"
        );
        assert_eq!(compile("yy"), "ReducedValue(YearOfEra,2,2,2000)");
        assert_eq!(compile("y"), "Value(YearOfEra)");
        assert_eq!(compile("yyy"), "Value(YearOfEra,3,19,NORMAL)");
        assert_eq!(compile("MMM"), "Text(MonthOfYear,SHORT)");
        assert_eq!(compile("LLLL"), "Text(MonthOfYear,FULL_STANDALONE)");
        assert_eq!(compile("EEEE"), "Text(DayOfWeek)");
        assert_eq!(compile("E"), "Text(DayOfWeek,SHORT)");
        assert_eq!(compile("GGGG"), "Text(Era)");
        assert_eq!(compile("D"), "Value(DayOfYear)");
        assert_eq!(compile("DD"), "Value(DayOfYear,2,3,NOT_NEGATIVE)");
    }

    #[test]
    fn test_time_letters() {
        assert_eq!(
            compile("HH:mm:ss.SSS"),
            "Value(HourOfDay,2)':'Value(MinuteOfHour,2)':'Value(SecondOfMinute,2)'.'Fraction(NanoOfSecond,3,3)"
        );
        assert_eq!(compile("h a"), "Value(ClockHourOfAmPm)' 'Text(AmPmOfDay,SHORT)");
    }

    #[test]
    fn test_offset_and_zone_letters() {
        assert_eq!(compile("VV"), "ZoneId()");
        assert_eq!(compile("zzzz"), "ZoneText(FULL)");
        assert_eq!(compile("Z"), "Offset(+HHMM,'+0000')");
        assert_eq!(compile("ZZZZ"), "LocalizedOffset(FULL)");
        assert_eq!(compile("ZZZZZ"), "Offset(+HH:MM:ss,'Z')");
        assert_eq!(compile("O"), "LocalizedOffset(SHORT)");
        assert_eq!(compile("X"), "Offset(+HHmm,'Z')");
        assert_eq!(compile("XXX"), "Offset(+HH:MM,'Z')");
        assert_eq!(compile("x"), "Offset(+HHmm,'+00')");
        assert_eq!(compile("xx"), "Offset(+HHMM,'+0000')");
        assert_eq!(compile("xxx"), "Offset(+HH:MM,'+00:00')");
    }

    #[test]
    fn test_week_letters() {
        assert_eq!(compile("YYYY"), "Localized(WeekBasedYear,4,19,EXCEEDS_PAD)");
        assert_eq!(compile("ww"), "Localized(WeekOfWeekBasedYear,2)");
        assert_eq!(compile("W"), "Localized(WeekOfMonth,1)");
        assert_eq!(compile("e"), "Localized(DayOfWeek,1)");
        assert_eq!(compile("eee"), "Text(DayOfWeek,SHORT)");
    }

    #[test]
    fn test_literals_and_sections() {
        assert_eq!(compile("'T'"), "'T'");
        assert_eq!(compile("''"), "''");
        assert_eq!(compile("'o''clock'"), "'o''clock'");
        assert_eq!(compile("HH[:mm]"), "Value(HourOfDay,2)[':'Value(MinuteOfHour,2)]");
        assert_eq!(compile("[HH"), "[Value(HourOfDay,2)]");
    }

    #[test]
    fn test_padding() {
        assert_eq!(compile("ppH"), "Pad(Value(HourOfDay),2)");
        assert_eq!(error_position("p"), 0);
        assert_eq!(error_position("yy p-"), 3);
    }

    #[test]
    fn test_errors() {
        assert_eq!(error_position("yyyy-MM-ddd"), 8);
        assert_eq!(error_position("HH]"), 2);
        assert_eq!(error_position("yyyy{"), 4);
        assert_eq!(error_position("bb"), 0);
        assert_eq!(error_position("'abc"), 0);
        assert_eq!(error_position("cc"), 0);
        assert_eq!(error_position("VVV"), 0);
        assert_eq!(error_position("MMMMMM"), 0);
        assert_eq!(error_position("SSSSSSSSSS"), 0);
        assert_eq!(error_position("OO"), 0);
        assert_eq!(error_position("XXXXXX"), 0);
    }

    #[test]
    fn test_builder_error_reason() {
        let err = DateTimeFormatter::of_pattern("HH nnnnnnnnnnnnnnnnnnnn").unwrap_err();
        let BuildError::Pattern { position, reason, .. } = err else {
            panic!("expected a pattern error");
        };
        assert_eq!(position, 3);
        assert!(reason.contains("width"));
    }
}
