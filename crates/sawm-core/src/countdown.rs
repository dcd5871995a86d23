//! Countdown to the next fast boundary.
//!
//! The resolver is stateless and re-run on every clock tick:
//!
//! ```text
//!   now < dawn          -> today's dawn     (until start)
//!   dawn <= now <= dusk -> today's dusk     (until end, with progress)
//!   now > dusk          -> tomorrow's dawn  (until start)
//! ```

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::events::Event;
use crate::prayer::{Prayer, PrayerTimeProvider, PrayerTimes};
use crate::state::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownLabel {
    /// Counting down to dawn, when the fast begins.
    UntilStart,
    /// Inside the fasting window, counting down to dusk.
    UntilEnd,
}

impl CountdownLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownLabel::UntilStart => "until start",
            CountdownLabel::UntilEnd => "until end",
        }
    }
}

/// Whole seconds left, split for an `HH:MM:SS` display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total: i64,
}

impl TimeRemaining {
    /// `max(0, floor(target - now))` in whole seconds.
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        let total = (target - now).num_seconds().max(0);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
            total,
        }
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Today's fast boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastingWindow {
    pub dawn: DateTime<Utc>,
    pub dusk: DateTime<Utc>,
}

impl FastingWindow {
    /// A window whose dusk is not after its dawn. Never produced by sane
    /// astronomical input; treated as empty.
    pub fn is_empty(&self) -> bool {
        self.dusk <= self.dawn
    }

    /// Fraction of the window elapsed at `now`, clamped to [0, 1].
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let span = (self.dusk - self.dawn).num_milliseconds() as f64;
        let elapsed = (now - self.dawn).num_milliseconds() as f64;
        (elapsed / span).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub target: DateTime<Utc>,
    pub label: CountdownLabel,
    /// Window progress; 0 whenever `label` is `UntilStart`.
    pub progress: f64,
    pub remaining: TimeRemaining,
    pub window: FastingWindow,
}

impl Countdown {
    pub fn to_event(&self) -> Event {
        Event::CountdownTick {
            label: self.label,
            remaining_secs: self.remaining.total,
            progress: self.progress,
        }
    }
}

/// The next prayer still ahead today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextPrayer {
    pub prayer: Prayer,
    pub time: DateTime<Utc>,
    pub index: usize,
    pub remaining: TimeRemaining,
}

/// Derives countdowns from a [`PrayerTimeProvider`].
#[derive(Debug)]
pub struct CountdownResolver<P> {
    provider: P,
    /// Last date an inverted window was reported at `warn`.
    inverted_warned: Mutex<Option<NaiveDate>>,
}

impl<P: Clone> Clone for CountdownResolver<P> {
    fn clone(&self) -> Self {
        Self::new(self.provider.clone())
    }
}

impl<P> CountdownResolver<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            inverted_warned: Mutex::new(None),
        }
    }

    /// Returns true the first time `today` is seen with an inverted window.
    fn note_inverted(&self, today: NaiveDate) -> bool {
        let mut last = match self.inverted_warned.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *last == Some(today) {
            return false;
        }
        *last = Some(today);
        true
    }
}

impl<P: PrayerTimeProvider> CountdownResolver<P> {

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Prayer times for `date` at `location`, straight from the provider.
    pub fn prayer_times(&self, location: &Location, date: NaiveDate) -> Result<PrayerTimes, ProviderError> {
        self.provider.compute(location.coordinates(), date)
    }

    /// Resolve the countdown at `now`.
    ///
    /// "Today" is the calendar date of `now` in its own offset.
    ///
    /// # Errors
    /// Provider failures are returned as-is; there is no stale fallback.
    pub fn resolve(&self, location: &Location, now: DateTime<FixedOffset>) -> Result<Countdown, ProviderError> {
        let today = now.date_naive();
        let now = now.with_timezone(&Utc);
        let times = self.prayer_times(location, today)?;
        let window = FastingWindow {
            dawn: times.dawn(),
            dusk: times.dusk(),
        };

        if window.is_empty() {
            if self.note_inverted(today) {
                warn!(%today, location = %location.name, "dusk is not after dawn; treating fasting window as empty");
            } else {
                debug!(%today, "fasting window still inverted");
            }
        }

        let (target, label, progress) = if now < window.dawn {
            (window.dawn, CountdownLabel::UntilStart, 0.0)
        } else if now > window.dusk || window.is_empty() {
            let tomorrow = today
                .succ_opt()
                .ok_or(ProviderError::MissingDate(today))?;
            let next = self.prayer_times(location, tomorrow)?;
            (next.dawn(), CountdownLabel::UntilStart, 0.0)
        } else {
            (window.dusk, CountdownLabel::UntilEnd, window.progress(now))
        };

        Ok(Countdown {
            target,
            label,
            progress,
            remaining: TimeRemaining::between(now, target),
            window,
        })
    }

    /// First of today's prayers strictly after `now`; `None` once Isha has
    /// passed.
    pub fn next_prayer(
        &self,
        location: &Location,
        now: DateTime<FixedOffset>,
    ) -> Result<Option<NextPrayer>, ProviderError> {
        let times = self.prayer_times(location, now.date_naive())?;
        let now = now.with_timezone(&Utc);
        let next = times
            .iter()
            .find(|(_, time)| *time > now)
            .map(|(prayer, time)| NextPrayer {
                prayer,
                time,
                index: prayer.index(),
                remaining: TimeRemaining::between(now, time),
            });
        Ok(next)
    }
}
