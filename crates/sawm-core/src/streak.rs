//! Consecutive-day fasting streaks over the sparse fasting log.
//!
//! All arithmetic is on calendar days ([`DateKey`]), never on instants, so a
//! daylight-saving shift can't turn a one-day step into 23 or 25 hours.

use std::collections::BTreeSet;

use crate::state::DateKey;

/// Length of the run of consecutive days ending at the latest logged day.
///
/// The anchor is not compared against today: a run that ended weeks ago is
/// still reported. See [`streak_as_of`] for the gated variant.
pub fn streak(log: &BTreeSet<DateKey>) -> u32 {
    let mut days = log.iter().rev();
    let Some(anchor) = days.next() else {
        return 0;
    };

    let mut count = 1;
    let mut expected = anchor.pred();
    for day in days {
        if Some(*day) != expected {
            break;
        }
        count += 1;
        expected = day.pred();
    }
    count
}

/// Like [`streak`], but 0 unless the anchor is `today` or the day before.
pub fn streak_as_of(log: &BTreeSet<DateKey>, today: DateKey) -> u32 {
    match log.iter().next_back() {
        Some(anchor) if (0..=1).contains(&anchor.days_until(&today)) => streak(log),
        _ => 0,
    }
}

/// Longest run of consecutive days anywhere in the log.
pub fn longest_streak(log: &BTreeSet<DateKey>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<DateKey> = None;
    for day in log {
        run = match prev {
            Some(p) if p.succ() == Some(*day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(*day);
    }
    best
}
