use chrono::{NaiveDate, NaiveTime, Timelike};

use super::interval::TimeInterval;

/// One weekday's raw availability as stored at rest: up to two `HH:MM`
/// interval pairs, either of which may be absent or malformed.
///
/// Parsing happens once here, at the load boundary; everything downstream
/// (busy projection, slot generation) works on parsed `TimeInterval`s in
/// minutes-of-day and never touches text again.
#[derive(Debug, Clone, Default)]
pub struct RawWeekdayAvailability {
    pub interval_1_start: Option<String>,
    pub interval_1_end: Option<String>,
    pub interval_2_start: Option<String>,
    pub interval_2_end: Option<String>,
}

/// Resolves a worker's configured weekly availability into a set of
/// half-open minute intervals for a given calendar date.
///
/// Mirrors spec.md's weekday indexing: Monday = 0 .. Sunday = 6, matching
/// `chrono::Weekday::num_days_from_monday`. A malformed `HH:MM` pair is
/// dropped rather than failing the whole resolution, and at most two
/// intervals are honored per weekday even if more rows exist for it.
pub fn resolve_weekday_availability(raw: &RawWeekdayAvailability) -> Vec<TimeInterval> {
    let mut intervals = Vec::with_capacity(2);

    if let Some(interval) = parse_pair(raw.interval_1_start.as_deref(), raw.interval_1_end.as_deref()) {
        intervals.push(interval);
    }
    if let Some(interval) = parse_pair(raw.interval_2_start.as_deref(), raw.interval_2_end.as_deref()) {
        intervals.push(interval);
    }

    intervals
}

/// Returns the weekday index (Monday = 0) for a calendar date.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

fn parse_pair(start: Option<&str>, end: Option<&str>) -> Option<TimeInterval> {
    let start = parse_hhmm(start?)?;
    let end = parse_hhmm(end?)?;
    if end <= start {
        return None;
    }
    Some(TimeInterval::new(start, end))
}

fn parse_hhmm(text: &str) -> Option<u16> {
    let time = NaiveTime::parse_from_str(text, "%H:%M").ok()?;
    Some((time.hour() * 60 + time.minute()) as u16)
}
