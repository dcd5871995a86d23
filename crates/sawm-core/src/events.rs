use serde::{Deserialize, Serialize};

use crate::countdown::CountdownLabel;
use crate::state::{BadgeId, CounterEntry, DateKey, Language, Location};

/// Every state change in the system produces an Event.
/// Front ends print or forward them; nothing in the core subscribes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    LocationChanged {
        location: Location,
    },
    LanguageChanged {
        language: Language,
    },
    FastingDayToggled {
        date: DateKey,
        fasted: bool,
    },
    CounterCommitted {
        entry: CounterEntry,
        total_count: u64,
    },
    BadgeUnlocked {
        badge_id: BadgeId,
    },
    /// A tap that did not cross the goal.
    CounterTapped {
        ritual_id: String,
        count: u32,
        goal: u32,
    },
    /// Fired once per session, at the tap where count first equals the goal.
    GoalReached {
        entry: CounterEntry,
    },
    CounterReset {
        ritual_id: String,
        committed: Option<CounterEntry>,
    },
    RitualSwitched {
        from: String,
        to: String,
        goal: u32,
        committed: Option<CounterEntry>,
    },
    CountdownTick {
        label: CountdownLabel,
        remaining_secs: i64,
        progress: f64,
    },
}

impl Event {
    /// Short machine name, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::LocationChanged { .. } => "location_changed",
            Event::LanguageChanged { .. } => "language_changed",
            Event::FastingDayToggled { .. } => "fasting_day_toggled",
            Event::CounterCommitted { .. } => "counter_committed",
            Event::BadgeUnlocked { .. } => "badge_unlocked",
            Event::CounterTapped { .. } => "counter_tapped",
            Event::GoalReached { .. } => "goal_reached",
            Event::CounterReset { .. } => "counter_reset",
            Event::RitualSwitched { .. } => "ritual_switched",
            Event::CountdownTick { .. } => "countdown_tick",
        }
    }
}
