//! The observance calendar: which day of the month a date is, and the daily
//! fast start/end times across the whole period.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::prayer::PrayerTimeProvider;
use crate::state::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservancePeriod {
    start: NaiveDate,
    total_days: u32,
}

/// One row of the period timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservanceDay {
    pub day: u32,
    pub date: NaiveDate,
    pub dawn: DateTime<Utc>,
    pub dusk: DateTime<Utc>,
}

impl ObservancePeriod {
    pub fn new(start: NaiveDate, total_days: u32) -> Self {
        Self { start, total_days }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// 1-based day number of `date`. Zero or negative before the start,
    /// greater than `total_days` after the end.
    pub fn day_number(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (1..=i64::from(self.total_days)).contains(&self.day_number(date))
    }

    /// Date of 1-based day `day`; `None` for day 0.
    pub fn date_of_day(&self, day: u32) -> Option<NaiveDate> {
        let offset = day.checked_sub(1)?;
        self.start.checked_add_days(Days::new(u64::from(offset)))
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.date_of_day(self.total_days)
    }

    /// Dawn and dusk for every day of the period at `location`.
    pub fn timetable<P: PrayerTimeProvider>(
        &self,
        provider: &P,
        location: &Location,
    ) -> Result<Vec<ObservanceDay>, ProviderError> {
        (1..=self.total_days)
            .filter_map(|day| self.date_of_day(day).map(|date| (day, date)))
            .map(|(day, date)| {
                let times = provider.compute(location.coordinates(), date)?;
                Ok(ObservanceDay {
                    day,
                    date,
                    dawn: times.dawn(),
                    dusk: times.dusk(),
                })
            })
            .collect()
    }
}

impl Default for ObservancePeriod {
    fn default() -> Self {
        crate::storage::Config::default().observance_period()
    }
}
