//! Boundary-only wire format parsing and rendering.
//!
//! spec.md §9 flags the original's mixed `DD/MM/YYYY` / `YYYY-MM-DD` / `HH:MM`
//! text formats for re-architecture: normalize once, at the edge, into
//! `chrono`'s typed `NaiveDate`/`NaiveTime`, and never touch text again until
//! a response is rendered. Everything in `availability` works in minutes-of-
//! day; this module is the only place that knows about slashes and dashes.

use chrono::{NaiveDate, NaiveTime};

/// Parses `DD/MM/YYYY`, the format `GetAvailableSlots` accepts (spec.md §6).
pub fn parse_br_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%d/%m/%Y").ok()
}

/// Parses `YYYY-MM-DD` or `DD/MM/YYYY`, the two formats `CreateScheduling`
/// accepts (spec.md §4.6 step 1).
pub fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_br_date(text))
}

/// Parses a minute-resolution `HH:MM` time of day.
pub fn parse_hhmm(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

/// Renders a time of day back to `HH:MM` for the outward-facing slot map.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
