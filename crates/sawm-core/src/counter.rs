//! Dhikr counter session.
//!
//! ```text
//! Idle(count = 0) -> Counting(count > 0) -> Idle   (reset | switch)
//! ```
//!
//! The session only holds the live count. Every completed (or abandoned)
//! count is committed as a [`CounterEntry`] through a [`CounterLedger`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::RitualPreset;
use crate::error::Result;
use crate::events::Event;
use crate::state::{CounterEntry, CounterLedger, DateKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterState {
    Idle,
    Counting,
}

fn default_recommit() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSession {
    ritual_id: String,
    goal: u32,
    count: u32,
    /// Set at the tap that first hits the goal; cleared on reset and switch.
    #[serde(default)]
    goal_reached: bool,
    /// Commit on switch even after the goal commit already happened.
    #[serde(default = "default_recommit")]
    recommit_on_switch: bool,
}

impl CounterSession {
    pub fn new(ritual: &RitualPreset) -> Self {
        Self {
            ritual_id: ritual.id.clone(),
            goal: ritual.default_goal,
            count: 0,
            goal_reached: false,
            recommit_on_switch: true,
        }
    }

    pub fn with_recommit_on_switch(mut self, recommit: bool) -> Self {
        self.recommit_on_switch = recommit;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn ritual_id(&self) -> &str {
        &self.ritual_id
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    pub fn state(&self) -> CounterState {
        if self.count == 0 {
            CounterState::Idle
        } else {
            CounterState::Counting
        }
    }

    /// 0.0 .. 1.0, capped once the goal is passed.
    pub fn progress(&self) -> f64 {
        if self.goal == 0 {
            return 0.0;
        }
        (f64::from(self.count) / f64::from(self.goal)).min(1.0)
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Count one repetition. Counting continues past the goal, but only the
    /// tap that lands exactly on it commits.
    pub fn tap(&mut self, ledger: &mut impl CounterLedger, today: DateKey) -> Result<Event> {
        self.count = self.count.saturating_add(1);

        if !self.goal_reached && self.count == self.goal {
            self.goal_reached = true;
            let entry = self.entry(today);
            debug!(ritual = %self.ritual_id, count = self.count, "goal reached");
            ledger.record_counter_entry(entry.clone())?;
            return Ok(Event::GoalReached { entry });
        }

        Ok(Event::CounterTapped {
            ritual_id: self.ritual_id.clone(),
            count: self.count,
            goal: self.goal,
        })
    }

    /// Back to zero, committing the count first unless the goal commit
    /// already covered it.
    pub fn reset(&mut self, ledger: &mut impl CounterLedger, today: DateKey) -> Result<Event> {
        let pending = (self.count > 0 && !self.goal_reached).then(|| self.entry(today));
        self.count = 0;
        self.goal_reached = false;

        if let Some(entry) = &pending {
            ledger.record_counter_entry(entry.clone())?;
        }
        Ok(Event::CounterReset {
            ritual_id: self.ritual_id.clone(),
            committed: pending,
        })
    }

    /// Select `ritual` with its default goal. Any live count for the old
    /// ritual is committed first.
    pub fn switch_ritual(
        &mut self,
        ledger: &mut impl CounterLedger,
        ritual: &RitualPreset,
        today: DateKey,
    ) -> Result<Event> {
        let commit = self.count > 0 && (self.recommit_on_switch || !self.goal_reached);
        let pending = commit.then(|| self.entry(today));
        let from = std::mem::replace(&mut self.ritual_id, ritual.id.clone());
        self.goal = ritual.default_goal;
        self.count = 0;
        self.goal_reached = false;
        debug!(%from, to = %ritual.id, "switch ritual");

        if let Some(entry) = &pending {
            ledger.record_counter_entry(entry.clone())?;
        }
        Ok(Event::RitualSwitched {
            from,
            to: ritual.id.clone(),
            goal: self.goal,
            committed: pending,
        })
    }

    fn entry(&self, date: DateKey) -> CounterEntry {
        CounterEntry {
            date,
            ritual_id: self.ritual_id.clone(),
            count: self.count,
        }
    }
}
