//! Zone ids, zone names and chronologies.

use crate::ast::OffsetNode;
use crate::error::FormatError;
use crate::field::ChronoField;
use crate::formatter::{FormatContext, ParseContext};
use crate::options::TextStyle;
use crate::zone::Zone;

/// Prints the zone id, or its name in `style` when the provider has one.
pub(crate) fn format_zone(style: Option<TextStyle>, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
    let Some(zone) = ctx.zone()? else {
        return Ok(false);
    };
    let id = zone.id();
    let name = match (style, &zone) {
        (Some(style), Zone::Region(region)) => ctx.provider().zone_name(region, style),
        _ => None,
    };
    buf.push_str(name.as_deref().unwrap_or(&id));
    Ok(true)
}

pub(crate) fn parse_zone(style: Option<TextStyle>, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
    let length = text.len();
    if position >= length {
        return Err(position);
    }
    let next = text[position];
    if next == '+' || next == '-' {
        return parse_offset_based(ctx, text, position, position, &OffsetNode::id_z());
    }
    if length >= position + 2 {
        let second = text[position + 1];
        if ctx.char_equals(next, 'U') && ctx.char_equals(second, 'T') {
            if length >= position + 3 && ctx.char_equals(text[position + 2], 'C') {
                return parse_offset_based(ctx, text, position, position + 3, &OffsetNode::id_zero());
            }
            return parse_offset_based(ctx, text, position, position + 2, &OffsetNode::id_zero());
        }
        if ctx.char_equals(next, 'G')
            && length >= position + 3
            && ctx.char_equals(second, 'M')
            && ctx.char_equals(text[position + 2], 'T')
        {
            if length >= position + 4 && ctx.char_equals(text[position + 3], '0') {
                return ctx.set_parsed_zone(Zone::region("GMT0"), position, position + 4);
            }
            return parse_offset_based(ctx, text, position, position + 3, &OffsetNode::id_zero());
        }
    }

    if let Some((id, len)) = match_region(style, ctx, text, position) {
        return ctx.set_parsed_zone(Zone::Region(id), position, position + len);
    }
    if ctx.char_equals(next, 'Z') {
        return ctx.set_parsed_zone(Zone::utc(), position, position + 1);
    }
    Err(position)
}

/// The longest region id, or zone name, at `position`.
fn match_region(style: Option<TextStyle>, ctx: &ParseContext<'_>, text: &[char], position: usize) -> Option<(String, usize)> {
    let ids = ctx.formatter().zone_rules().region_ids();
    let mut candidates: Vec<(String, String)> = ids.iter().map(|id| (id.clone(), id.clone())).collect();
    if let Some(style) = style {
        let styles: &[TextStyle] = if ctx.strict {
            std::slice::from_ref(&style)
        } else {
            &[TextStyle::Full, TextStyle::Short]
        };
        let provider = ctx.provider();
        for id in &ids {
            for style in styles {
                if let Some(name) = provider.zone_name(id, *style) {
                    candidates.push((name, id.clone()));
                }
            }
        }
    }
    candidates
        .into_iter()
        .filter(|(candidate, _)| !candidate.is_empty() && ctx.matches_at(text, position, candidate))
        .map(|(candidate, id)| (id, candidate.chars().count()))
        .max_by_key(|(_, len)| *len)
}

/// Parses an offset after a `UT`, `UTC` or `GMT` prefix, or with no prefix.
fn parse_offset_based(
    ctx: &mut ParseContext<'_>,
    text: &[char],
    prefix_pos: usize,
    position: usize,
    offset: &OffsetNode,
) -> Result<usize, usize> {
    let prefix: String = text[prefix_pos..position].iter().collect::<String>().to_uppercase();
    if position >= text.len() {
        return ctx.set_parsed_zone(Zone::Region(prefix), prefix_pos, position);
    }
    // a 0 or Z after the prefix is not part of an offset
    if text[position] == '0' || ctx.char_equals(text[position], 'Z') {
        return ctx.set_parsed_zone(Zone::Region(prefix), prefix_pos, position);
    }
    let mut sub = ctx.fork();
    let end = match offset.parse(&mut sub, text, position) {
        Ok(end) => end,
        Err(_) if prefix.is_empty() => return Err(prefix_pos),
        Err(_) => return ctx.set_parsed_zone(Zone::Region(prefix), prefix_pos, position),
    };
    let seconds = sub.parsed_value(ChronoField::OffsetSeconds).unwrap_or(0);
    let zone = match i32::try_from(seconds).ok().and_then(Zone::offset_seconds) {
        Some(_) if seconds == 0 && !prefix.is_empty() => Zone::Region(prefix),
        Some(zone) => zone,
        None => return Err(prefix_pos),
    };
    ctx.set_parsed_zone(zone, prefix_pos, end)
}

/// Prints the chronology id, or its name when `style` is given.
pub(crate) fn format_chronology(style: Option<TextStyle>, ctx: &mut FormatContext<'_>, buf: &mut String) -> Result<bool, FormatError> {
    let Some(chronology) = ctx.chronology()? else {
        return Ok(false);
    };
    let id = chronology.id();
    match style.and_then(|_| ctx.provider().chronology_name(id)) {
        Some(name) => buf.push_str(&name),
        None => buf.push_str(id),
    }
    Ok(true)
}

pub(crate) fn parse_chronology(style: Option<TextStyle>, ctx: &mut ParseContext<'_>, text: &[char], position: usize) -> Result<usize, usize> {
    if position > text.len() {
        return Err(position);
    }
    let provider = ctx.provider();
    let mut best = None;
    let mut best_len = 0;
    for chronology in ctx.formatter().chronologies() {
        let mut names = vec![chronology.id().to_string()];
        if style.is_some() {
            names.extend(provider.chronology_name(chronology.id()));
        }
        for name in names {
            let len = name.chars().count();
            if len > best_len && ctx.matches_at(text, position, &name) {
                best = Some(chronology.clone());
                best_len = len;
            }
        }
    }
    match best {
        Some(chronology) => {
            ctx.parsed.chronology = Some(chronology);
            Ok(position + best_len)
        }
        None => Err(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::FixedZoneRules;
    use crate::{DateTimeFormatter, FormatterBuilder};
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use std::sync::Arc;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn rules() -> Arc<FixedZoneRules> {
        let paris = FixedOffset::east_opt(3600).unwrap();
        Arc::new(
            FixedZoneRules::new()
                .with_region("Europe/Paris", paris)
                .with_region("Europe/Par", paris),
        )
    }

    fn parse(text: &str) -> (Result<usize, usize>, Option<Zone>) {
        let formatter = DateTimeFormatter::iso_local_date().with_zone_rules(rules());
        let mut ctx = ParseContext::new(&formatter);
        let result = parse_zone(None, &mut ctx, &chars(text), 0);
        (result, ctx.parsed.zone.clone())
    }

    #[test]
    fn test_parse_offsets_and_prefixes() {
        let plus_two = Zone::offset_seconds(7200);
        assert_eq!(parse("+02:00"), (Ok(6), plus_two.clone()));
        assert_eq!(parse("Z"), (Ok(1), Some(Zone::utc())));
        assert_eq!(parse("UTC"), (Ok(3), Some(Zone::region("UTC"))));
        assert_eq!(parse("UT+02:00"), (Ok(8), plus_two));
        assert_eq!(parse("GMT0"), (Ok(4), Some(Zone::region("GMT0"))));
        assert_eq!(parse("GMTx"), (Ok(3), Some(Zone::region("GMT"))));
        assert_eq!(parse("UTCZ"), (Ok(3), Some(Zone::region("UTC"))));
        assert_eq!(parse("+2"), (Err(0), None));
    }

    #[test]
    fn test_parse_longest_region() {
        assert_eq!(parse("Europe/Paris!"), (Ok(12), Some(Zone::region("Europe/Paris"))));
        assert_eq!(parse("Europe/Pa"), (Err(0), None));
        assert_eq!(parse("Mars"), (Err(0), None));
    }

    #[test]
    fn test_format_zone_id() {
        let formatter = FormatterBuilder::new().append_zone_id().to_formatter();
        let value = FixedOffset::east_opt(-3600)
            .unwrap()
            .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
            .unwrap();
        assert_eq!(formatter.format(&value).unwrap(), "-01:00");
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(formatter.format(&date).unwrap_err(), FormatError::ZoneUnavailable);
    }

    #[test]
    fn test_chronology_round_trip() {
        let formatter = FormatterBuilder::new().append_chronology_id().to_formatter();
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(formatter.format(&date).unwrap(), "ISO");
        let mut ctx = ParseContext::new(&formatter);
        assert_eq!(parse_chronology(None, &mut ctx, &chars("ISO"), 0), Ok(3));
        assert_eq!(ctx.parsed.chronology().map(|c| c.id().to_string()), Some("ISO".to_string()));
        assert_eq!(parse_chronology(None, &mut ctx, &chars("Hijrah"), 0), Err(0));
    }
}
