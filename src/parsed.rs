//! Field values recovered by parsing, and their resolution into a date,
//! time, zone and instant.

use std::collections::BTreeSet;
use std::fmt;
use std::mem;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::chronology::{self, Chronology, IsoChronology};
use crate::error::ResolveError;
use crate::field::{ChronoField, Field, FieldValues};
use crate::math;
use crate::options::ResolverStyle;
use crate::temporal::{Resolved, TemporalAccessor};
use crate::zone::{FixedZoneRules, Zone, ZoneRules};

/// Upper bound on reductions made by custom fields during one resolve.
pub const MAX_RESOLVE_PASSES: usize = 50;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// The outcome of parsing: field values plus whatever date, time, zone and
/// chronology could be established from them.
///
/// A `Parsed` straight out of
/// [`parse_unresolved`](crate::DateTimeFormatter::parse_unresolved) holds
/// only raw field values. [`resolve`](Parsed::resolve) folds them into a
/// date and time, consuming the entries it used.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub(crate) field_values: FieldValues,
    pub(crate) zone: Option<Zone>,
    pub(crate) chronology: Option<Arc<dyn Chronology>>,
    pub(crate) leap_second: bool,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    excess_days: i64,
    resolver_style: ResolverStyle,
    zone_rules: Arc<dyn ZoneRules>,
}

impl Default for Parsed {
    fn default() -> Self {
        Parsed::with_zone_rules(Arc::new(FixedZoneRules::default()))
    }
}

impl Parsed {
    pub fn new() -> Self {
        Parsed::default()
    }

    /// An empty context resolving region zones through `zone_rules`.
    pub fn with_zone_rules(zone_rules: Arc<dyn ZoneRules>) -> Self {
        Parsed {
            field_values: FieldValues::new(),
            zone: None,
            chronology: None,
            leap_second: false,
            date: None,
            time: None,
            excess_days: 0,
            resolver_style: ResolverStyle::Smart,
            zone_rules,
        }
    }

    /// The field values not yet folded into the date or time.
    pub fn field_values(&self) -> &FieldValues {
        &self.field_values
    }

    pub fn field_values_mut(&mut self) -> &mut FieldValues {
        &mut self.field_values
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    pub fn zone(&self) -> Option<&Zone> {
        self.zone.as_ref()
    }

    pub fn set_zone(&mut self, zone: Option<Zone>) {
        self.zone = zone;
    }

    pub fn chronology(&self) -> Option<&dyn Chronology> {
        self.chronology.as_deref()
    }

    pub fn set_chronology(&mut self, chronology: Option<Arc<dyn Chronology>>) {
        self.chronology = chronology;
    }

    /// Whether a leap second (`23:59:60`) was parsed.
    pub fn is_leap_second(&self) -> bool {
        self.leap_second
    }

    /// Days carried out of the time, such as the day after `24:00`.
    pub fn excess_days(&self) -> i64 {
        self.excess_days
    }

    fn effective_chronology(&self) -> Arc<dyn Chronology> {
        self.chronology
            .clone()
            .unwrap_or_else(|| Arc::new(IsoChronology))
    }

    /// Resolves the parsed field values into a date, time and instant.
    ///
    /// When `allowed` is given, every other field is discarded first.
    /// Entries used to build the date and time are removed; entries that
    /// merely restate them are checked and removed; any disagreement fails.
    pub fn resolve(
        &mut self,
        style: ResolverStyle,
        allowed: Option<&BTreeSet<Field>>,
    ) -> Result<(), ResolveError> {
        if let Some(allowed) = allowed {
            self.field_values.retain(|field, _| allowed.contains(field));
        }
        self.resolver_style = style;
        trace!("resolving {} with {} style", self, style);
        self.resolve_fields()?;
        self.resolve_time_lenient()?;
        self.cross_check()?;
        self.resolve_period()?;
        self.resolve_fractional();
        self.resolve_instant()?;
        debug!("resolved to {}", self);
        Ok(())
    }

    fn resolve_fields(&mut self) -> Result<(), ResolveError> {
        self.resolve_date_fields()?;
        self.resolve_time_fields()?;
        if self.field_values.is_empty() {
            return Ok(());
        }
        let mut changed = 0;
        'outer: while changed < MAX_RESOLVE_PASSES {
            for field in self.field_values.keys() {
                let Field::Custom(custom) = &field else {
                    continue;
                };
                let mut values = mem::take(&mut self.field_values);
                let result = custom.inner().resolve(&mut values, &*self, self.resolver_style);
                self.field_values = values;
                if let Some(resolved) = result? {
                    trace!("{} resolved to {:?}", field, resolved);
                    self.apply_resolved(resolved)?;
                    changed += 1;
                    continue 'outer;
                }
                if !self.field_values.contains(&field) {
                    trace!("{} folded into other fields", field);
                    changed += 1;
                    continue 'outer;
                }
            }
            break;
        }
        if changed == MAX_RESOLVE_PASSES {
            return Err(ResolveError::NonTerminating { passes: changed });
        }
        if changed > 0 {
            self.resolve_date_fields()?;
            self.resolve_time_fields()?;
        }
        Ok(())
    }

    fn apply_resolved(&mut self, resolved: Resolved) -> Result<(), ResolveError> {
        match resolved {
            Resolved::Date(date) => self.update_date(Some(date)),
            Resolved::Time(time) => self.update_time(time, 0),
            Resolved::DateTime(date_time) => {
                self.update_time(date_time.time(), 0)?;
                self.update_date(Some(date_time.date()))
            }
            Resolved::Zoned(date_time, zone) => {
                match &self.zone {
                    None => self.zone = Some(zone),
                    Some(existing) if *existing != zone => {
                        return Err(ResolveError::ConflictingValues {
                            what: "zones",
                            existing: existing.to_string(),
                            value: zone.to_string(),
                        })
                    }
                    Some(_) => {}
                }
                self.update_time(date_time.time(), 0)?;
                self.update_date(Some(date_time.date()))
            }
        }
    }

    fn resolve_date_fields(&mut self) -> Result<(), ResolveError> {
        let chrono = self.effective_chronology();
        let date = chrono.resolve_date(&mut self.field_values, self.resolver_style)?;
        self.update_date(date)
    }

    fn update_date(&mut self, date: Option<NaiveDate>) -> Result<(), ResolveError> {
        match (self.date, date) {
            (Some(existing), Some(date)) if existing != date => Err(ResolveError::ConflictingValues {
                what: "dates",
                existing: existing.to_string(),
                value: date.to_string(),
            }),
            (None, Some(date)) => {
                self.date = Some(date);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn update_time(&mut self, time: NaiveTime, excess_days: i64) -> Result<(), ResolveError> {
        match self.time {
            Some(existing) if existing != time => Err(ResolveError::ConflictingValues {
                what: "times",
                existing: existing.to_string(),
                value: time.to_string(),
            }),
            Some(_) if self.excess_days != 0 && excess_days != 0 && self.excess_days != excess_days => {
                Err(ResolveError::ConflictingValues {
                    what: "excess periods",
                    existing: format!("{} days", self.excess_days),
                    value: format!("{excess_days} days"),
                })
            }
            _ => {
                self.time = Some(time);
                self.excess_days = excess_days;
                Ok(())
            }
        }
    }

    /// Records `value` for `change`, failing if a different value is there.
    fn update_check_conflict(&mut self, change: ChronoField, value: i64) -> Result<(), ResolveError> {
        self.field_values.add_checked(change, value)
    }

    fn take(&mut self, field: ChronoField) -> Option<i64> {
        self.field_values.remove(field)
    }

    fn validate(&self, field: ChronoField, value: i64) -> Result<(), ResolveError> {
        if self.resolver_style != ResolverStyle::Lenient {
            field.check_valid_value(value)?;
        }
        Ok(())
    }

    fn resolve_time_fields(&mut self) -> Result<(), ResolveError> {
        use ChronoField::*;

        let style = self.resolver_style;
        if let Some(ch) = self.take(ClockHourOfDay) {
            // lenient allows anything, smart allows 0-24, strict allows 1-24
            if style == ResolverStyle::Strict || (style == ResolverStyle::Smart && ch != 0) {
                ClockHourOfDay.check_valid_value(ch)?;
            }
            self.update_check_conflict(HourOfDay, if ch == 24 { 0 } else { ch })?;
        }
        if let Some(ch) = self.take(ClockHourOfAmPm) {
            if style == ResolverStyle::Strict || (style == ResolverStyle::Smart && ch != 0) {
                ClockHourOfAmPm.check_valid_value(ch)?;
            }
            self.update_check_conflict(HourOfAmPm, if ch == 12 { 0 } else { ch })?;
        }
        if self.field_values.contains(AmPmOfDay) && self.field_values.contains(HourOfAmPm) {
            let ap = self.take(AmPmOfDay).unwrap_or(0);
            let hap = self.take(HourOfAmPm).unwrap_or(0);
            let hour = if style == ResolverStyle::Lenient {
                math::add(math::multiply(ap, 12)?, hap)?
            } else {
                AmPmOfDay.check_valid_value(ap)?;
                HourOfAmPm.check_valid_value(hap)?;
                ap * 12 + hap
            };
            self.update_check_conflict(HourOfDay, hour)?;
        }
        if let Some(nod) = self.take(NanoOfDay) {
            self.validate(NanoOfDay, nod)?;
            self.update_check_conflict(HourOfDay, nod / NANOS_PER_HOUR)?;
            self.update_check_conflict(MinuteOfHour, (nod / NANOS_PER_MINUTE) % 60)?;
            self.update_check_conflict(SecondOfMinute, (nod / NANOS_PER_SECOND) % 60)?;
            self.update_check_conflict(NanoOfSecond, nod % NANOS_PER_SECOND)?;
        }
        if let Some(cod) = self.take(MicroOfDay) {
            self.validate(MicroOfDay, cod)?;
            self.update_check_conflict(SecondOfDay, cod / 1_000_000)?;
            self.update_check_conflict(MicroOfSecond, cod % 1_000_000)?;
        }
        if let Some(lod) = self.take(MilliOfDay) {
            self.validate(MilliOfDay, lod)?;
            self.update_check_conflict(SecondOfDay, lod / 1_000)?;
            self.update_check_conflict(MilliOfSecond, lod % 1_000)?;
        }
        if let Some(sod) = self.take(SecondOfDay) {
            self.validate(SecondOfDay, sod)?;
            self.update_check_conflict(HourOfDay, sod / 3600)?;
            self.update_check_conflict(MinuteOfHour, (sod / 60) % 60)?;
            self.update_check_conflict(SecondOfMinute, sod % 60)?;
        }
        if let Some(mod_) = self.take(MinuteOfDay) {
            self.validate(MinuteOfDay, mod_)?;
            self.update_check_conflict(HourOfDay, mod_ / 60)?;
            self.update_check_conflict(MinuteOfHour, mod_ % 60)?;
        }

        // merge partial seconds strictly, lenient expansion happens later
        if let Some(mut nos) = self.field_values.get(NanoOfSecond) {
            self.validate(NanoOfSecond, nos)?;
            if let Some(cos) = self.take(MicroOfSecond) {
                self.validate(MicroOfSecond, cos)?;
                nos = math::add(math::multiply(cos, 1_000)?, nos % 1_000)?;
                self.update_check_conflict(NanoOfSecond, nos)?;
            }
            if let Some(los) = self.take(MilliOfSecond) {
                self.validate(MilliOfSecond, los)?;
                let merged = math::add(math::multiply(los, 1_000_000)?, nos % 1_000_000)?;
                self.update_check_conflict(NanoOfSecond, merged)?;
            }
        }

        let complete = [HourOfDay, MinuteOfHour, SecondOfMinute, NanoOfSecond]
            .iter()
            .all(|field| self.field_values.contains(*field));
        if complete {
            let hod = self.take(HourOfDay).unwrap_or(0);
            let moh = self.take(MinuteOfHour).unwrap_or(0);
            let som = self.take(SecondOfMinute).unwrap_or(0);
            let nos = self.take(NanoOfSecond).unwrap_or(0);
            self.resolve_time(hod, moh, som, nos)?;
        }
        Ok(())
    }

    fn resolve_time_lenient(&mut self) -> Result<(), ResolveError> {
        use ChronoField::*;

        if self.time.is_none() {
            if let Some(los) = self.take(MilliOfSecond) {
                if let Some(micros) = self.field_values.get(MicroOfSecond) {
                    let cos = math::add(math::multiply(los, 1_000)?, micros % 1_000)?;
                    self.update_check_conflict(MicroOfSecond, cos)?;
                    self.take(MicroOfSecond);
                    self.field_values.insert(NanoOfSecond, math::multiply(cos, 1_000)?);
                } else {
                    self.field_values.insert(NanoOfSecond, math::multiply(los, 1_000_000)?);
                }
            } else if let Some(cos) = self.take(MicroOfSecond) {
                self.field_values.insert(NanoOfSecond, math::multiply(cos, 1_000)?);
            }

            if let Some(hod) = self.field_values.get(HourOfDay) {
                let moh = self.field_values.get(MinuteOfHour);
                let som = self.field_values.get(SecondOfMinute);
                let nos = self.field_values.get(NanoOfSecond);
                // a gap in the fields cannot be defaulted
                let gap = (moh.is_none() && (som.is_some() || nos.is_some()))
                    || (moh.is_some() && som.is_none() && nos.is_some());
                if !gap {
                    self.resolve_time(hod, moh.unwrap_or(0), som.unwrap_or(0), nos.unwrap_or(0))?;
                    for field in [HourOfDay, MinuteOfHour, SecondOfMinute, NanoOfSecond] {
                        self.take(field);
                    }
                }
            }
        }

        if self.resolver_style != ResolverStyle::Lenient {
            for (field, value) in &self.field_values {
                if let Field::Chrono(chrono_field) = field {
                    if chrono_field.is_time_based() {
                        chrono_field.check_valid_value(*value)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn resolve_time(&mut self, hod: i64, moh: i64, som: i64, nos: i64) -> Result<(), ResolveError> {
        use ChronoField::*;

        if self.resolver_style == ResolverStyle::Lenient {
            let mut total = math::multiply(hod, NANOS_PER_HOUR)?;
            total = math::add(total, math::multiply(moh, NANOS_PER_MINUTE)?)?;
            total = math::add(total, math::multiply(som, NANOS_PER_SECOND)?)?;
            total = math::add(total, nos)?;
            let excess_days = math::floor_div(total, NANOS_PER_DAY)?;
            let nano_of_day = math::floor_mod(total, NANOS_PER_DAY)?;
            let time = NaiveTime::from_num_seconds_from_midnight_opt(
                (nano_of_day / NANOS_PER_SECOND) as u32,
                (nano_of_day % NANOS_PER_SECOND) as u32,
            )
            .ok_or(ResolveError::Overflow {
                operation: "nano-of-day",
            })?;
            return self.update_time(time, excess_days);
        }

        let moh = MinuteOfHour.check_valid_int_value(moh)?;
        let nos = NanoOfSecond.check_valid_int_value(nos)?;
        if self.resolver_style == ResolverStyle::Smart && hod == 24 && moh == 0 && som == 0 && nos == 0 {
            return self.update_time(NaiveTime::MIN, 1);
        }
        let hod = HourOfDay.check_valid_int_value(hod)?;
        let som = SecondOfMinute.check_valid_int_value(som)?;
        let time = NaiveTime::from_hms_nano_opt(hod as u32, moh as u32, som as u32, nos as u32).ok_or(
            ResolveError::InvalidDate {
                reason: format!("invalid time {hod}:{moh}:{som}.{nos}"),
            },
        )?;
        self.update_time(time, 0)
    }

    fn cross_check(&mut self) -> Result<(), ResolveError> {
        if let Some(date) = self.date {
            self.cross_check_with(&date)?;
        }
        if let Some(time) = self.time {
            self.cross_check_with(&time)?;
            if let Some(date) = self.date {
                if !self.field_values.is_empty() {
                    self.cross_check_with(&date.and_time(time))?;
                }
            }
        }
        Ok(())
    }

    /// Consumes every entry `target` can derive, failing on a mismatch.
    fn cross_check_with(&mut self, target: &dyn TemporalAccessor) -> Result<(), ResolveError> {
        for field in self.field_values.keys() {
            if !target.is_supported(&field) {
                continue;
            }
            let Some(derived) = target.get_long(&field) else {
                continue;
            };
            let Some(parsed) = self.field_values.get(&field) else {
                continue;
            };
            if derived != parsed {
                return Err(ResolveError::Conflict {
                    field,
                    existing: derived,
                    value: parsed,
                });
            }
            self.field_values.remove(&field);
        }
        Ok(())
    }

    fn resolve_period(&mut self) -> Result<(), ResolveError> {
        if let (Some(date), Some(_)) = (self.date, self.time) {
            if self.excess_days != 0 {
                self.date = Some(chronology::plus_days(date, self.excess_days)?);
                self.excess_days = 0;
            }
        }
        Ok(())
    }

    fn resolve_fractional(&mut self) {
        use ChronoField::*;

        let seconds_present = [InstantSeconds, SecondOfDay, SecondOfMinute]
            .iter()
            .any(|field| self.field_values.contains(*field));
        if self.time.is_some() || !seconds_present {
            return;
        }
        let nos = self.field_values.get(NanoOfSecond).unwrap_or(0);
        self.field_values.insert(NanoOfSecond, nos);
        self.field_values.insert(MicroOfSecond, nos / 1_000);
        self.field_values.insert(MilliOfSecond, nos / 1_000_000);
    }

    fn resolve_instant(&mut self) -> Result<(), ResolveError> {
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Ok(());
        };
        let local = NaiveDateTime::new(date, time);
        let offset_seconds = match self.field_values.get(ChronoField::OffsetSeconds) {
            Some(seconds) => seconds,
            None => match &self.zone {
                Some(zone) => {
                    let offset = zone
                        .fixed_offset()
                        .or_else(|| self.zone_rules.offset_at(zone, local))
                        .ok_or_else(|| ResolveError::UnknownZone { zone: zone.id() })?;
                    i64::from(offset.local_minus_utc())
                }
                None => return Ok(()),
            },
        };
        let instant = math::subtract(local.and_utc().timestamp(), offset_seconds)?;
        self.field_values.insert(ChronoField::InstantSeconds, instant);
        Ok(())
    }
}

impl TemporalAccessor for Parsed {
    fn is_supported(&self, field: &Field) -> bool {
        if self.field_values.contains(field) {
            return true;
        }
        if self.date.is_some_and(|date| date.is_supported(field)) {
            return true;
        }
        if self.time.is_some_and(|time| time.is_supported(field)) {
            return true;
        }
        match field {
            Field::Chrono(_) => false,
            Field::Custom(custom) => custom.inner().is_supported_by(self),
        }
    }

    fn get_long(&self, field: &Field) -> Option<i64> {
        if let Some(value) = self.field_values.get(field) {
            return Some(value);
        }
        if let Some(date) = self.date {
            if date.is_supported(field) {
                return date.get_long(field);
            }
        }
        if let Some(time) = self.time {
            if time.is_supported(field) {
                return time.get_long(field);
            }
        }
        match field {
            Field::Chrono(_) => None,
            Field::Custom(custom) => custom.inner().get_from(self),
        }
    }

    fn query_date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn query_time(&self) -> Option<NaiveTime> {
        self.time
    }

    fn query_zone(&self) -> Option<Zone> {
        if self.zone.is_some() {
            return self.zone.clone();
        }
        let seconds = self.field_values.get(ChronoField::OffsetSeconds)?;
        Zone::offset_seconds(i32::try_from(seconds).ok()?)
    }

    fn query_chronology(&self) -> Option<&dyn Chronology> {
        self.chronology.as_deref()
    }
}

impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (field, value)) in self.field_values.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str("}")?;
        if let Some(chrono) = &self.chronology {
            write!(f, ",{}", chrono.id())?;
        }
        if let Some(zone) = &self.zone {
            write!(f, ",{zone}")?;
        }
        match (self.date, self.time) {
            (Some(date), Some(time)) => write!(f, " resolved to {date}T{time}"),
            (Some(date), None) => write!(f, " resolved to {date}"),
            (None, Some(time)) => write!(f, " resolved to {time}"),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{iso, WeekFields};

    fn parsed(entries: &[(Field, i64)]) -> Parsed {
        let mut parsed = Parsed::new();
        for (field, value) in entries {
            parsed.field_values.insert(field, *value);
        }
        parsed
    }

    fn chrono(field: ChronoField) -> Field {
        Field::Chrono(field)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_date_and_time() {
        let mut p = parsed(&[
            (chrono(ChronoField::Year), 2020),
            (chrono(ChronoField::MonthOfYear), 2),
            (chrono(ChronoField::DayOfMonth), 29),
            (chrono(ChronoField::HourOfDay), 13),
            (chrono(ChronoField::MinuteOfHour), 5),
        ]);
        p.resolve(ResolverStyle::Smart, None).unwrap();
        assert_eq!(p.date(), Some(ymd(2020, 2, 29)));
        assert_eq!(p.time(), NaiveTime::from_hms_opt(13, 5, 0));
        assert!(p.field_values().is_empty());
    }

    #[test]
    fn test_clock_hour_and_am_pm() {
        let mut p = parsed(&[
            (chrono(ChronoField::ClockHourOfAmPm), 12),
            (chrono(ChronoField::AmPmOfDay), 1),
            (chrono(ChronoField::MinuteOfHour), 30),
        ]);
        p.resolve(ResolverStyle::Smart, None).unwrap();
        assert_eq!(p.time(), NaiveTime::from_hms_opt(12, 30, 0));

        let mut strict = parsed(&[(chrono(ChronoField::ClockHourOfDay), 0)]);
        assert!(matches!(
            strict.resolve(ResolverStyle::Strict, None),
            Err(ResolveError::Range { .. })
        ));
    }

    #[test]
    fn test_end_of_day() {
        let entries = [
            (chrono(ChronoField::Year), 2020),
            (chrono(ChronoField::MonthOfYear), 12),
            (chrono(ChronoField::DayOfMonth), 31),
            (chrono(ChronoField::HourOfDay), 24),
        ];
        let mut smart = parsed(&entries);
        smart.resolve(ResolverStyle::Smart, None).unwrap();
        assert_eq!(smart.date(), Some(ymd(2021, 1, 1)));
        assert_eq!(smart.time(), Some(NaiveTime::MIN));

        let mut strict = parsed(&entries);
        assert!(strict.resolve(ResolverStyle::Strict, None).is_err());
    }

    #[test]
    fn test_lenient_time_carries_days() {
        let mut p = parsed(&[
            (chrono(ChronoField::EpochDay), 0),
            (chrono(ChronoField::HourOfDay), 49),
            (chrono(ChronoField::MinuteOfHour), -30),
        ]);
        p.resolve(ResolverStyle::Lenient, None).unwrap();
        assert_eq!(p.date(), Some(ymd(1970, 1, 3)));
        assert_eq!(p.time(), NaiveTime::from_hms_opt(0, 30, 0));
        assert_eq!(p.excess_days(), 0);
    }

    #[test]
    fn test_second_fragments_merge() {
        let mut p = parsed(&[
            (chrono(ChronoField::SecondOfDay), 3661),
            (chrono(ChronoField::MilliOfSecond), 250),
        ]);
        p.resolve(ResolverStyle::Smart, None).unwrap();
        assert_eq!(p.time(), NaiveTime::from_hms_milli_opt(1, 1, 1, 250));
    }

    #[test]
    fn test_time_gap_is_left_alone() {
        let mut p = parsed(&[
            (chrono(ChronoField::HourOfDay), 10),
            (chrono(ChronoField::SecondOfMinute), 30),
        ]);
        p.resolve(ResolverStyle::Smart, None).unwrap();
        assert_eq!(p.time(), None);
        assert_eq!(p.field_values().len(), 2);
    }

    #[test]
    fn test_cross_check_consumes_and_conflicts() {
        let mut p = parsed(&[
            (chrono(ChronoField::Year), 2011),
            (chrono(ChronoField::MonthOfYear), 12),
            (chrono(ChronoField::DayOfMonth), 31),
            (chrono(ChronoField::DayOfWeek), 6),
        ]);
        p.resolve(ResolverStyle::Smart, None).unwrap();
        assert!(p.field_values().is_empty());

        let mut bad = parsed(&[
            (chrono(ChronoField::Year), 2011),
            (chrono(ChronoField::MonthOfYear), 12),
            (chrono(ChronoField::DayOfMonth), 31),
            (chrono(ChronoField::DayOfWeek), 3),
        ]);
        let err = bad.resolve(ResolverStyle::Smart, None).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Conflict {
                field: chrono(ChronoField::DayOfWeek),
                existing: 6,
                value: 3,
            }
        );
    }

    #[test]
    fn test_custom_fields_resolve() {
        let weeks = WeekFields::ISO;
        let mut p = parsed(&[
            (weeks.week_based_year(), 2009),
            (weeks.week_of_week_based_year(), 1),
            (weeks.day_of_week(), 1),
        ]);
        p.resolve(ResolverStyle::Smart, None).unwrap();
        assert_eq!(p.date(), Some(ymd(2008, 12, 29)));

        let mut q = parsed(&[
            (chrono(ChronoField::Year), 2012),
            (iso::quarter_of_year(), 2),
            (iso::day_of_quarter(), 1),
        ]);
        q.resolve(ResolverStyle::Strict, None).unwrap();
        assert_eq!(q.date(), Some(ymd(2012, 4, 1)));
    }

    #[test]
    fn test_allowed_fields_filter() {
        let mut p = parsed(&[
            (chrono(ChronoField::Year), 2020),
            (chrono(ChronoField::DayOfYear), 60),
            (chrono(ChronoField::MonthOfYear), 7),
        ]);
        let allowed: BTreeSet<Field> = [chrono(ChronoField::Year), chrono(ChronoField::DayOfYear)]
            .into_iter()
            .collect();
        p.resolve(ResolverStyle::Smart, Some(&allowed)).unwrap();
        assert_eq!(p.date(), Some(ymd(2020, 2, 29)));
    }

    #[test]
    fn test_instant_from_offset() {
        let mut p = parsed(&[
            (chrono(ChronoField::EpochDay), 0),
            (chrono(ChronoField::HourOfDay), 1),
            (chrono(ChronoField::OffsetSeconds), 3600),
        ]);
        p.resolve(ResolverStyle::Smart, None).unwrap();
        assert_eq!(p.field_values().get(ChronoField::InstantSeconds), Some(0));
        assert_eq!(p.query_zone(), Zone::offset_seconds(3600));
    }

    #[test]
    fn test_unknown_region_zone() {
        let mut p = parsed(&[
            (chrono(ChronoField::EpochDay), 0),
            (chrono(ChronoField::HourOfDay), 1),
        ]);
        p.set_zone(Some(Zone::region("Mars/Olympus")));
        assert!(matches!(
            p.resolve(ResolverStyle::Smart, None),
            Err(ResolveError::UnknownZone { .. })
        ));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut p = parsed(&[
            (chrono(ChronoField::Year), 2020),
            (chrono(ChronoField::MonthOfYear), 5),
            (chrono(ChronoField::DayOfMonth), 17),
            (chrono(ChronoField::HourOfDay), 8),
            (chrono(ChronoField::OffsetSeconds), 0),
        ]);
        p.resolve(ResolverStyle::Strict, None).unwrap();
        let first = p.to_string();
        p.resolve(ResolverStyle::Strict, None).unwrap();
        assert_eq!(p.to_string(), first);
    }

    #[test]
    fn test_display() {
        let mut p = parsed(&[
            (chrono(ChronoField::Year), 2020),
            (chrono(ChronoField::DayOfYear), 1),
            (chrono(ChronoField::OffsetSeconds), 0),
        ]);
        assert_eq!(p.to_string(), "{DayOfYear=1, Year=2020, OffsetSeconds=0}");
        p.resolve(ResolverStyle::Smart, None).unwrap();
        assert_eq!(p.to_string(), "{OffsetSeconds=0} resolved to 2020-01-01");
    }
}
