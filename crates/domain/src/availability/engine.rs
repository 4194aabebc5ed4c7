use chrono::NaiveDate;

use super::busy::{project_busy, BusyScheduling};
use super::interval::merge_adjacent;
use super::resolver::{resolve_weekday_availability, RawWeekdayAvailability};
use super::slot::{admissible_windows, generate_slots, BOOKING_LEAD_MINUTES};

/// Pure available-time calculation engine.
///
/// Ties C1 (interval algebra), C2 (weekly availability resolution), C3
/// (busy projection) and C4 (slot generation) together for a single
/// worker and a single date. It has no I/O dependencies: callers load the
/// raw weekly-availability row and the candidate schedulings themselves
/// and pass them in, exactly as the repositories in the `db` crate do for
/// every other pure calculation in this codebase.
pub struct AvailabilityEngine;

impl AvailabilityEngine {
    /// Computes the admissible start minutes (minutes-of-day, half-open
    /// `[start, start + total_duration_minutes)`) on `date` for a worker
    /// whose weekly availability on that weekday is `weekly_raw`, given
    /// their already-booked, non-cancelled `schedulings` and the tenant's
    /// `tolerance_minutes` overlap policy.
    ///
    /// `now_date`/`now_minutes` are injected rather than read from the
    /// system clock so the engine is deterministic: a fixed clock value
    /// reproduces the same result in both tests and production.
    pub fn compute_available_slots(
        weekly_raw: &RawWeekdayAvailability,
        schedulings: &[BusyScheduling],
        tolerance_minutes: u16,
        total_duration_minutes: u16,
        date: NaiveDate,
        now_date: NaiveDate,
        now_minutes: u16,
    ) -> Vec<u16> {
        if date < now_date {
            return Vec::new();
        }

        let raw_windows = merge_adjacent(resolve_weekday_availability(weekly_raw));
        if raw_windows.is_empty() {
            return Vec::new();
        }

        let busy = project_busy(schedulings, date, now_date, now_minutes);
        let now_cutoff = if date == now_date {
            Some(now_minutes.saturating_add(BOOKING_LEAD_MINUTES))
        } else {
            None
        };
        let windows = admissible_windows(&raw_windows, &busy, tolerance_minutes, now_cutoff);

        generate_slots(&windows, total_duration_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn availability(start: &str, end: &str) -> RawWeekdayAvailability {
        RawWeekdayAvailability {
            interval_1_start: Some(start.to_string()),
            interval_1_end: Some(end.to_string()),
            interval_2_start: None,
            interval_2_end: None,
        }
    }

    fn scheduling(date: NaiveDate, start_h: u32, end_h: u32) -> BusyScheduling {
        BusyScheduling {
            date,
            start_time: NaiveTime::from_hms_opt(start_h, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end_h, 0, 0).unwrap(),
        }
    }

    #[test]
    fn no_availability_configured_returns_no_slots() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let raw = RawWeekdayAvailability::default();
        let slots = AvailabilityEngine::compute_available_slots(&raw, &[], 0, 30, date, date, 0);
        assert!(slots.is_empty());
    }

    #[test]
    fn open_day_with_no_bookings_yields_earliest_plus_hourly_slots() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let raw = availability("09:00", "12:00");
        let slots = AvailabilityEngine::compute_available_slots(&raw, &[], 0, 30, date, date, 0);
        assert_eq!(slots, vec![540, 600, 660]);
    }

    #[test]
    fn existing_booking_removes_overlapping_slots() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let raw = availability("09:00", "12:00");
        let bookings = vec![scheduling(date, 10, 11)];
        let slots = AvailabilityEngine::compute_available_slots(&raw, &bookings, 0, 30, date, date, 0);
        assert_eq!(slots, vec![540, 660]);
    }

    #[test]
    fn tolerance_extends_closing_edge_but_anchor_grid_still_misses_it() {
        // spec.md §8 scenario 3: tolerance 10 on an untouched 09:00-12:00
        // window doesn't add a slot for a 30-minute duration, because the
        // next hourly anchor (12:00) plus 30 minutes overshoots 12:10.
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let raw = availability("09:00", "12:00");
        let slots = AvailabilityEngine::compute_available_slots(&raw, &[], 10, 30, date, date, 0);
        assert_eq!(slots, vec![540, 600, 660]);
    }

    #[test]
    fn tolerance_extends_closing_edge_and_fits_a_shorter_duration() {
        // Same window and tolerance, but a 10-minute duration fits a final
        // 12:00-12:10 slot inside the tolerated window.
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let raw = availability("09:00", "12:00");
        let slots = AvailabilityEngine::compute_available_slots(&raw, &[], 10, 10, date, date, 0);
        assert_eq!(slots, vec![540, 600, 660, 720]);
    }

    #[test]
    fn past_date_yields_no_slots() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 27).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let raw = availability("09:00", "17:00");
        let slots = AvailabilityEngine::compute_available_slots(&raw, &[], 0, 30, date, today, 0);
        assert!(slots.is_empty());
    }

    #[test]
    fn today_clips_slots_before_now_plus_lead_time() {
        // spec.md §8 scenario 4: now = 10:05, duration 30. Earliest
        // admissible start is max(09:00, 10:15) = 10:15, then the next
        // hourly anchor 11:00.
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let raw = availability("09:00", "12:00");
        let slots = AvailabilityEngine::compute_available_slots(&raw, &[], 0, 30, date, date, 605);
        assert_eq!(slots, vec![615, 660]);
    }
}
