//! Static reference data: ritual presets, badges, duas, and preset locations.
//!
//! Nothing here is part of the mutable state. A [`Catalog`] is built once at
//! startup and handed to the code that needs it.

mod locations;
mod presets;

pub use locations::{default_location, preset_locations, search_locations};

use serde::{Deserialize, Serialize};

use crate::countdown::CountdownLabel;

/// A counting ritual with its default goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RitualPreset {
    pub id: String,
    pub name: String,
    pub name_bn: String,
    pub arabic: String,
    pub meaning: String,
    pub default_goal: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    /// Unlocks on the fasting streak.
    Streak,
    /// Unlocks on the cumulative counter total.
    Counter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub name_bn: String,
    pub description: String,
    pub requirement: u64,
    pub kind: BadgeKind,
}

/// A supplication with its translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dua {
    pub title: String,
    pub title_bn: String,
    pub arabic: String,
    pub transliteration: String,
    pub english: String,
    pub bengali: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub rituals: Vec<RitualPreset>,
    pub badges: Vec<Badge>,
    /// Intention recited at suhoor, before dawn.
    pub suhoor_dua: Dua,
    /// Recited when breaking the fast at dusk.
    pub iftar_dua: Dua,
}

impl Catalog {
    /// The ritual and badge lists the app ships with.
    pub fn builtin() -> Self {
        Self {
            rituals: presets::rituals(),
            badges: presets::badges(),
            suhoor_dua: presets::suhoor_dua(),
            iftar_dua: presets::iftar_dua(),
        }
    }

    /// No rituals or badges. The duas are kept.
    pub fn empty() -> Self {
        Self {
            rituals: Vec::new(),
            badges: Vec::new(),
            ..Self::builtin()
        }
    }

    pub fn ritual(&self, id: &str) -> Option<&RitualPreset> {
        self.rituals.iter().find(|r| r.id == id)
    }

    pub fn badge(&self, id: &str) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == id)
    }

    /// First ritual in the list, the initial counter selection.
    pub fn first_ritual(&self) -> Option<&RitualPreset> {
        self.rituals.first()
    }

    /// The dua for the coming boundary: iftar while fasting, otherwise the
    /// suhoor intention.
    pub fn dua_for(&self, label: CountdownLabel) -> &Dua {
        match label {
            CountdownLabel::UntilEnd => &self.iftar_dua,
            CountdownLabel::UntilStart => &self.suhoor_dua,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
