//! Time-zone identifiers and the rules that map them to offsets.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};

/// A time-zone: either a fixed offset or a named region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Zone {
    Offset(FixedOffset),
    Region(String),
}

impl Zone {
    /// The UTC offset zone.
    pub fn utc() -> Zone {
        Zone::Offset(Utc.fix())
    }

    pub fn region(id: impl Into<String>) -> Zone {
        Zone::Region(id.into())
    }

    /// A fixed-offset zone, `None` if the offset is outside +-18 hours.
    pub fn offset_seconds(seconds: i32) -> Option<Zone> {
        if seconds.abs() > 18 * 3600 {
            return None;
        }
        FixedOffset::east_opt(seconds).map(Zone::Offset)
    }

    /// The normalized id: `Z`, `+HH:MM`, `+HH:MM:SS` or the region id.
    pub fn id(&self) -> String {
        match self {
            Zone::Offset(offset) => offset_id(offset.local_minus_utc()),
            Zone::Region(id) => id.clone(),
        }
    }

    /// The offset if this zone is fixed.
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        match self {
            Zone::Offset(offset) => Some(*offset),
            Zone::Region(_) => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Formats total offset seconds as a normalized offset id.
pub(crate) fn offset_id(total_seconds: i32) -> String {
    if total_seconds == 0 {
        return "Z".to_string();
    }
    let abs = total_seconds.unsigned_abs();
    let sign = if total_seconds < 0 { '-' } else { '+' };
    let (hours, minutes, seconds) = (abs / 3600, abs / 60 % 60, abs % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Mapping from region ids to offsets.
pub trait ZoneRules: Send + Sync + fmt::Debug {
    /// All region ids the rules know about.
    fn region_ids(&self) -> Vec<String>;

    fn is_known(&self, id: &str) -> bool {
        self.region_ids().iter().any(|known| known == id)
    }

    /// The offset in effect for `zone` at the local date-time.
    fn offset_at(&self, zone: &Zone, local: NaiveDateTime) -> Option<FixedOffset>;
}

/// Zone rules where every region has a single fixed offset.
///
/// `UTC`, `GMT` and `UT` are always known, at offset zero.
#[derive(Debug, Clone)]
pub struct FixedZoneRules {
    regions: BTreeMap<String, FixedOffset>,
}

impl Default for FixedZoneRules {
    fn default() -> Self {
        let regions = ["UTC", "GMT", "UT"]
            .into_iter()
            .map(|id| (id.to_string(), Utc.fix()))
            .collect();
        FixedZoneRules { regions }
    }
}

impl FixedZoneRules {
    pub fn new() -> Self {
        FixedZoneRules::default()
    }

    /// Registers a region with a fixed offset.
    pub fn with_region(mut self, id: impl Into<String>, offset: FixedOffset) -> Self {
        self.regions.insert(id.into(), offset);
        self
    }
}

impl ZoneRules for FixedZoneRules {
    fn region_ids(&self) -> Vec<String> {
        self.regions.keys().cloned().collect()
    }

    fn is_known(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    fn offset_at(&self, zone: &Zone, _local: NaiveDateTime) -> Option<FixedOffset> {
        match zone {
            Zone::Offset(offset) => Some(*offset),
            Zone::Region(id) => self.regions.get(id).copied(),
        }
    }
}
