//! Field values printed as localized text.

use crate::ast::{NumberNode, TextNode};
use crate::error::FormatError;
use crate::formatter::{FormatContext, ParseContext};
use crate::locale::sort_parse_texts;
use crate::options::SignStyle;

impl TextNode {
    /// The numeric form used when no text is available.
    fn number_node(&self) -> NumberNode {
        NumberNode::new(&self.field, 1, 19, SignStyle::Normal)
    }

    pub(crate) fn format(&self, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
        let Some(value) = ctx.value(&self.field)? else {
            return Ok(false);
        };
        let text = match &self.map {
            Some(map) => map.get(&value).cloned(),
            None => ctx.provider().text(&self.field, value, self.style),
        };
        match text {
            Some(text) => {
                buf.push_str(&text);
                Ok(true)
            }
            None => self.number_node().format(ctx, buf),
        }
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
        if position > text.len() {
            return Err(position);
        }
        let candidates = match &self.map {
            Some(map) => sort_parse_texts(map.iter().map(|(value, text)| (text.clone(), *value)).collect()),
            None => {
                let style = if ctx.strict { Some(self.style) } else { None };
                ctx.provider().parse_texts(&self.field, style)
            }
        };
        if !candidates.is_empty() {
            for (candidate, value) in &candidates {
                if ctx.matches_at(text, position, candidate) {
                    let end = position + candidate.chars().count();
                    return ctx.set_parsed_field(&self.field, *value, position, end);
                }
            }
            if ctx.strict {
                return Err(position);
            }
        }
        self.number_node().parse(ctx, text, position)
    }
}
