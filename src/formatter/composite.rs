//! Node dispatch, sequences, padding and the zero-width nodes.

use crate::ast::{Composite, Node, PadNode, Setting};
use crate::error::FormatError;
use crate::formatter::{FormatContext, ParseContext};

impl Node {
    /// Prints this node. `Ok(false)` means a value was unavailable inside
    /// an optional section.
    pub(crate) fn format(&self, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        match self {
            Node::Char(ch) => {
                buf.push(*ch);
                Ok(true)
            }
            Node::Str(text) => {
                buf.push_str(text);
                Ok(true)
            }
            Node::Number(node) => node.format(ctx, buf),
            Node::Fraction(node) => node.format(ctx, buf),
            Node::Text(node) => node.format(ctx, buf),
            Node::Offset(node) => node.format(ctx, buf),
            Node::LocalizedOffset(style) => super::offset::format_localized(*style, ctx, buf),
            Node::ZoneId => super::zone::format_zone(None, ctx, buf),
            Node::ZoneText(style) => super::zone::format_zone(Some(*style), ctx, buf),
            Node::ChronologyId => super::zone::format_chronology(None, ctx, buf),
            Node::ChronologyText(style) => super::zone::format_chronology(Some(*style), ctx, buf),
            Node::Localized { date, time } => super::instant::format_localized(*date, *time, ctx, buf),
            Node::Instant(node) => node.format(ctx, buf),
            Node::Composite(composite) => composite.format(ctx, buf),
            Node::Pad(pad) => pad.format(ctx, buf),
            Node::Settings(_) | Node::Default { .. } => Ok(true),
        }
    }

    /// Parses this node at `position`, returning the position after it or
    /// the index where parsing failed.
    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
        match self {
            Node::Char(ch) => {
                match text.get(position) {
                    Some(&actual) if ctx.char_equals(actual, *ch) => Ok(position + 1),
                    _ => Err(position),
                }
            }
            Node::Str(literal) => {
                if position > text.len() || !ctx.matches_at(text, position, literal) {
                    return Err(position);
                }
                Ok(position + literal.chars().count())
            }
            Node::Number(node) => node.parse(ctx, text, position),
            Node::Fraction(node) => node.parse(ctx, text, position),
            Node::Text(node) => node.parse(ctx, text, position),
            Node::Offset(node) => node.parse(ctx, text, position),
            Node::LocalizedOffset(style) => super::offset::parse_localized(*style, ctx, text, position),
            Node::ZoneId => super::zone::parse_zone(None, ctx, text, position),
            Node::ZoneText(style) => super::zone::parse_zone(Some(*style), ctx, text, position),
            Node::ChronologyId => super::zone::parse_chronology(None, ctx, text, position),
            Node::ChronologyText(style) => super::zone::parse_chronology(Some(*style), ctx, text, position),
            Node::Localized { date, time } => super::instant::parse_localized(*date, *time, ctx, text, position),
            Node::Instant(node) => node.parse(ctx, text, position),
            Node::Composite(composite) => composite.parse(ctx, text, position),
            Node::Pad(pad) => pad.parse(ctx, text, position),
            Node::Settings(setting) => {
                match setting {
                    Setting::CaseSensitive => ctx.case_sensitive = true,
                    Setting::CaseInsensitive => ctx.case_sensitive = false,
                    Setting::Strict => ctx.strict = true,
                    Setting::Lenient => ctx.strict = false,
                }
                Ok(position)
            }
            Node::Default { field, value } => {
                if ctx.parsed_value(field).is_none() {
                    ctx.parsed.field_values.insert(field, *value);
                }
                Ok(position)
            }
        }
    }
}

impl Composite {
    pub(crate) fn format(&self, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        let length = buf.len();
        if self.optional {
            ctx.start_optional();
        }
        let result = self.format_nodes(ctx, buf);
        if self.optional {
            ctx.end_optional();
        }
        match result {
            Ok(true) => Ok(true),
            // an unavailable value drops the whole section
            Ok(false) => {
                buf.truncate(length);
                Ok(true)
            }
            Err(err) => Err(err),
        }
    }

    fn format_nodes(&self, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        for node in &self.nodes {
            if !node.format(ctx, buf)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
        let settings = ctx.settings();
        let result = if self.optional {
            let snapshot = ctx.parsed.clone();
            match self.parse_nodes(ctx, text, position) {
                Ok(end) => Ok(end),
                Err(_) => {
                    ctx.parsed = snapshot;
                    Ok(position)
                }
            }
        } else {
            self.parse_nodes(ctx, text, position)
        };
        ctx.restore_settings(settings);
        result
    }

    fn parse_nodes(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
        let mut pos = position;
        for node in &self.nodes {
            pos = node.parse(ctx, text, pos)?;
        }
        Ok(pos)
    }
}

impl PadNode {
    fn format(&self, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        let mut inner = String::new();
        if !self.inner.format(ctx, &mut inner)? {
            return Ok(false);
        }
        let len = inner.chars().count();
        if len > self.width {
            return Err(FormatError::PadWidthExceeded { len, width: self.width });
        }
        buf.extend(std::iter::repeat(self.pad_char).take(self.width - len));
        buf.push_str(&inner);
        Ok(true)
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
        let strict = ctx.strict;
        if position > text.len() {
            return Err(position);
        }
        if position == text.len() {
            // nothing to parse
            return Err(position);
        }
        let mut end = position + self.width;
        if end > text.len() {
            if strict {
                // not enough characters in the string to meet the parse width
                return Err(position);
            }
            end = text.len();
        }
        let mut pos = position;
        while pos < end && ctx.char_equals(text[pos], self.pad_char) {
            pos += 1;
        }
        let window = &text[..end];
        match self.inner.parse(ctx, window, pos) {
            Ok(result) if strict && result != end => Err(pos),
            other => other,
        }
    }
}
