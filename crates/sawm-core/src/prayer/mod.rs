//! Prayer-time inputs.
//!
//! The astronomical computation lives outside this crate. Anything that can
//! turn a coordinate and a date into five ordered instants implements
//! [`PrayerTimeProvider`], including plain closures.

mod timetable;

pub use timetable::TimetableProvider;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::state::Coordinates;

/// The five daily prayers, in time order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    pub fn name_bn(&self) -> &'static str {
        match self {
            Prayer::Fajr => "ফজর",
            Prayer::Dhuhr => "যোহর",
            Prayer::Asr => "আসর",
            Prayer::Maghrib => "মাগরিব",
            Prayer::Isha => "ইশা",
        }
    }
}

/// One day's prayer instants for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub date: NaiveDate,
    times: [DateTime<Utc>; 5],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sunrise: Option<DateTime<Utc>>,
}

impl PrayerTimes {
    /// `times` in [`Prayer::ALL`] order. Ordering is trusted, not checked.
    pub fn new(date: NaiveDate, times: [DateTime<Utc>; 5]) -> Self {
        Self {
            date,
            times,
            sunrise: None,
        }
    }

    pub fn with_sunrise(mut self, sunrise: DateTime<Utc>) -> Self {
        self.sunrise = Some(sunrise);
        self
    }

    /// Sunrise, the end of the Fajr window. Not every source publishes it.
    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        self.sunrise
    }

    pub fn get(&self, prayer: Prayer) -> DateTime<Utc> {
        self.times[prayer.index()]
    }

    /// Start of the fast (Fajr).
    pub fn dawn(&self) -> DateTime<Utc> {
        self.get(Prayer::Fajr)
    }

    /// End of the fast (Maghrib).
    pub fn dusk(&self) -> DateTime<Utc> {
        self.get(Prayer::Maghrib)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, DateTime<Utc>)> + '_ {
        Prayer::ALL.iter().map(move |p| (*p, self.get(*p)))
    }
}

/// Source of daily prayer times.
pub trait PrayerTimeProvider {
    fn compute(&self, coordinates: Coordinates, date: NaiveDate) -> Result<PrayerTimes, ProviderError>;
}

impl<F> PrayerTimeProvider for F
where
    F: Fn(Coordinates, NaiveDate) -> Result<PrayerTimes, ProviderError>,
{
    fn compute(&self, coordinates: Coordinates, date: NaiveDate) -> Result<PrayerTimes, ProviderError> {
        self(coordinates, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accessors_follow_prayer_order() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        let at = |h| Utc.with_ymd_and_hms(2026, 2, 18, h, 0, 0).unwrap();
        let times = PrayerTimes::new(date, [at(0), at(6), at(10), at(12), at(13)]);
        assert_eq!(times.dawn(), at(0));
        assert_eq!(times.dusk(), at(12));
        let names: Vec<_> = times.iter().map(|(p, _)| p.name()).collect();
        assert_eq!(names, ["Fajr", "Dhuhr", "Asr", "Maghrib", "Isha"]);
        assert!(times.sunrise().is_none());
        assert_eq!(times.with_sunrise(at(1)).sunrise(), Some(at(1)));
    }

    #[test]
    fn closures_are_providers() {
        let provider = |_: Coordinates, date: NaiveDate| -> Result<PrayerTimes, ProviderError> {
            Err(ProviderError::MissingDate(date))
        };
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        let coords = Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        };
        assert_eq!(
            provider.compute(coords, date),
            Err(ProviderError::MissingDate(date))
        );
    }
}
