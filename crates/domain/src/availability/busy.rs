use chrono::{NaiveDate, NaiveTime, Timelike};

use super::interval::TimeInterval;

/// A minimal view of an existing, non-cancelled scheduling, as the busy
/// projector needs it. Cancelled schedulings are filtered out by the
/// caller before this function ever sees them.
#[derive(Debug, Clone)]
pub struct BusyScheduling {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Projects a worker's existing schedulings onto a single target date as
/// busy minute-intervals.
///
/// Two exclusion rules, both from spec.md's busy-projection semantics:
/// - a scheduling on a date other than `date` never contributes a busy
///   interval for `date`;
/// - a scheduling on `date` itself whose `end_time` has already passed
///   relative to `now` is "expired" and excluded too, since a slot that
///   ends in the past can never collide with a future booking attempt.
///
/// `now` is injected rather than read from the system clock, so this stays
/// pure and deterministic for both unit tests and `proptest` generators.
pub fn project_busy(
    schedulings: &[BusyScheduling],
    date: NaiveDate,
    now_date: NaiveDate,
    now_minutes: u16,
) -> Vec<TimeInterval> {
    let mut busy: Vec<TimeInterval> = schedulings
        .iter()
        .filter(|s| s.date == date)
        .filter(|s| !is_expired(s, date, now_date, now_minutes))
        .map(|s| TimeInterval::new(to_minutes(s.start_time), to_minutes(s.end_time)))
        .collect();

    busy.sort_by_key(|i| i.start);
    busy
}

fn is_expired(s: &BusyScheduling, date: NaiveDate, now_date: NaiveDate, now_minutes: u16) -> bool {
    if date < now_date {
        return true;
    }
    if date == now_date && to_minutes(s.end_time) <= now_minutes {
        return true;
    }
    false
}

fn to_minutes(time: NaiveTime) -> u16 {
    (time.hour() * 60 + time.minute()) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduling(date: NaiveDate, start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> BusyScheduling {
        BusyScheduling {
            date,
            start_time: NaiveTime::from_hms_opt(start_h, start_m, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end_h, end_m, 0).unwrap(),
        }
    }

    #[test]
    fn projects_schedulings_on_the_target_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let schedulings = vec![scheduling(date, 9, 0, 10, 0)];
        let busy = project_busy(&schedulings, date, date, 0);
        assert_eq!(busy, vec![TimeInterval::new(540, 600)]);
    }

    #[test]
    fn ignores_schedulings_on_other_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let other = NaiveDate::from_ymd_opt(2026, 7, 29).unwrap();
        let schedulings = vec![scheduling(other, 9, 0, 10, 0)];
        assert!(project_busy(&schedulings, date, date, 0).is_empty());
    }

    #[test]
    fn excludes_schedulings_that_have_already_ended_today() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let schedulings = vec![scheduling(date, 9, 0, 10, 0)];
        // now is 10:30, past the 10:00 end time.
        let busy = project_busy(&schedulings, date, date, 10 * 60 + 30);
        assert!(busy.is_empty());
    }

    #[test]
    fn keeps_scheduling_that_is_currently_in_progress() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let schedulings = vec![scheduling(date, 9, 0, 10, 0)];
        // now is 09:30, inside the interval; end_time has not yet passed.
        let busy = project_busy(&schedulings, date, date, 9 * 60 + 30);
        assert_eq!(busy, vec![TimeInterval::new(540, 600)]);
    }

    #[test]
    fn treats_past_dates_as_fully_expired() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2026, 7, 29).unwrap();
        let schedulings = vec![scheduling(date, 9, 0, 10, 0)];
        assert!(project_busy(&schedulings, date, tomorrow, 0).is_empty());
    }
}
