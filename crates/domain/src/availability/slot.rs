use super::interval::TimeInterval;

/// Minimum lead time, in minutes, a same-day booking must start after
/// `now`. Spec.md §4.4 step 6: `s₀ = max(s, now + 10 minutes)` when
/// `date == today`.
pub const BOOKING_LEAD_MINUTES: u16 = 10;

/// Generates bookable start times within a set of free windows.
///
/// Each free window contributes its earliest admissible start (`s0`, the
/// window's own opening minute) as a slot — an exception to the otherwise
/// strict hourly anchor grid — and then every subsequent slot is anchored
/// to the hour, starting at `ceil((s0 + 1) / 60) * 60` and stepping by 60
/// minutes. A window whose very first candidate (`s0`) does not fit the
/// requested duration is skipped entirely rather than searched for a
/// later anchor that might still fit; this matches spec.md's slot grid
/// exactly and keeps generated slots aligned to the hour except for the
/// one earliest-start exception per window.
pub fn generate_slots(free_windows: &[TimeInterval], total_duration_minutes: u16) -> Vec<u16> {
    if total_duration_minutes == 0 {
        return Vec::new();
    }

    let mut starts = Vec::new();

    for window in free_windows {
        let s0 = window.start;
        if s0 + total_duration_minutes > window.end {
            continue;
        }
        starts.push(s0);

        let mut anchor = anchor_after(s0);
        while anchor + total_duration_minutes <= window.end {
            if anchor != s0 {
                starts.push(anchor);
            }
            anchor += 60;
        }
    }

    starts
}

/// `ceil((s0 + 1) / 60) * 60` — the next hourly boundary strictly after
/// `s0` (so a window opening exactly on the hour still gets its next
/// anchor one hour later, not at itself again).
fn anchor_after(s0: u16) -> u16 {
    ((s0 + 1).div_ceil(60)) * 60
}

/// Subtracts busy intervals from the raw weekly-availability windows, then
/// extends each resulting free interval's closing edge by the tenant's
/// overlap tolerance (spec.md §4.4 step 5: "for each free interval `[s, e)`
/// produce `[s, e + tolerance)`" — tolerance is applied to the free window
/// *after* busy subtraction, never to the opening edge), then clips the
/// result to start no earlier than `now` when generating slots for the
/// current date.
pub fn admissible_windows(
    raw_windows: &[TimeInterval],
    busy: &[TimeInterval],
    tolerance_minutes: u16,
    now_cutoff_minutes: Option<u16>,
) -> Vec<TimeInterval> {
    raw_windows
        .iter()
        .flat_map(|w| w.subtract(busy))
        .map(|w| TimeInterval::new(w.start, w.end.saturating_add(tolerance_minutes)))
        .filter_map(|w| clip_to_cutoff(w, now_cutoff_minutes))
        .collect()
}

fn clip_to_cutoff(window: TimeInterval, cutoff: Option<u16>) -> Option<TimeInterval> {
    match cutoff {
        None => Some(window),
        Some(cutoff) if cutoff <= window.start => Some(window),
        Some(cutoff) if cutoff < window.end => Some(TimeInterval::new(cutoff, window.end)),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_window_yields_earliest_start_plus_hourly_anchors() {
        // 09:00-12:00 window, 30-minute duration.
        let window = TimeInterval::new(540, 720);
        let slots = generate_slots(&[window], 30);
        // Earliest start 540 (09:00), then hourly anchors 600, 660 (10:00, 11:00).
        assert_eq!(slots, vec![540, 600, 660]);
    }

    #[test]
    fn window_not_fitting_first_slot_is_skipped_entirely() {
        let window = TimeInterval::new(540, 560); // 20-minute window
        let slots = generate_slots(&[window], 30);
        assert!(slots.is_empty());
    }

    #[test]
    fn window_opening_on_the_hour_anchors_one_hour_later() {
        let window = TimeInterval::new(600, 780); // 10:00-13:00
        let slots = generate_slots(&[window], 30);
        assert_eq!(slots, vec![600, 660, 720]);
    }

    #[test]
    fn zero_duration_yields_no_slots() {
        let window = TimeInterval::new(540, 720);
        assert!(generate_slots(&[window], 0).is_empty());
    }

    #[test]
    fn admissible_windows_extends_closing_edge_of_each_free_interval() {
        let raw = [TimeInterval::new(540, 720)]; // 09:00-12:00
        let busy = [TimeInterval::new(600, 630)]; // 10:00-10:30
        let windows = admissible_windows(&raw, &busy, 10, None);
        // Busy is subtracted unmodified; tolerance then extends the closing
        // edge of each resulting free interval by 10 minutes.
        assert_eq!(
            windows,
            vec![TimeInterval::new(540, 610), TimeInterval::new(630, 730)]
        );
    }

    #[test]
    fn admissible_windows_tolerance_does_not_move_opening_edge() {
        let raw = [TimeInterval::new(540, 720)];
        let windows = admissible_windows(&raw, &[], 10, None);
        assert_eq!(windows, vec![TimeInterval::new(540, 730)]);
    }

    #[test]
    fn admissible_windows_clips_to_now_cutoff_for_today() {
        let raw = [TimeInterval::new(540, 720)];
        let windows = admissible_windows(&raw, &[], 0, Some(600));
        assert_eq!(windows, vec![TimeInterval::new(600, 720)]);
    }

    #[test]
    fn admissible_windows_drops_window_entirely_past_cutoff() {
        let raw = [TimeInterval::new(540, 600)];
        let windows = admissible_windows(&raw, &[], 0, Some(700));
        assert!(windows.is_empty());
    }
}
