/// A half-open interval of minutes-of-day, `[start, end)`, where `0` is
/// midnight and `1440` is the following midnight.
///
/// All interval arithmetic in this module is pure and synchronous; it has
/// no `sqlx`/`axum` dependency so it can be exercised with plain `#[test]`
/// functions and `proptest` generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeInterval {
    pub start: u16,
    pub end: u16,
}

impl TimeInterval {
    /// Builds an interval, clamped so `end >= start` (a zero-width interval
    /// if the inputs are equal or inverted).
    pub fn new(start: u16, end: u16) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, minute: u16) -> bool {
        minute >= self.start && minute < self.end
    }

    /// Subtracts `busy` from `self`, returning the remaining sub-intervals.
    /// `busy` must already be sorted by `start` and non-overlapping.
    pub fn subtract(&self, busy: &[TimeInterval]) -> Vec<TimeInterval> {
        let mut remaining = vec![*self];

        for b in busy {
            let mut next = Vec::with_capacity(remaining.len());
            for r in remaining {
                if b.end <= r.start || b.start >= r.end {
                    // No overlap with this free fragment.
                    next.push(r);
                    continue;
                }
                if b.start > r.start {
                    next.push(TimeInterval::new(r.start, b.start));
                }
                if b.end < r.end {
                    next.push(TimeInterval::new(b.end, r.end));
                }
            }
            remaining = next;
        }

        remaining.into_iter().filter(|i| !i.is_empty()).collect()
    }
}

/// Sorts by start and merges touching or overlapping intervals into one.
pub fn merge_adjacent(mut intervals: Vec<TimeInterval>) -> Vec<TimeInterval> {
    intervals.sort_by_key(|i| i.start);
    let mut merged: Vec<TimeInterval> = Vec::with_capacity(intervals.len());

    for interval in intervals {
        if interval.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }

    merged
}
