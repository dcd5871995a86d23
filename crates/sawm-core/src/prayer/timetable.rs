//! Published-timetable prayer time source.
//!
//! Mosques and local authorities publish a table of the month's times; this
//! provider serves those tables from a TOML file instead of computing them.
//!
//! ```toml
//! [[location]]
//! name = "Dhaka, Bangladesh"
//! latitude = 23.8103
//! longitude = 90.4125
//! utc_offset = "+06:00"
//!
//! [[location.day]]
//! date = "2026-02-18"
//! fajr = "05:09"
//! sunrise = "06:24"  # optional
//! dhuhr = "12:13"
//! asr = "16:16"
//! maghrib = "17:56"
//! isha = "19:10"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use super::{PrayerTimeProvider, PrayerTimes};
use crate::error::ProviderError;
use crate::state::Coordinates;

/// Maximum distance, in degrees on each axis, for a query to match a table.
const COORDINATE_TOLERANCE: f64 = 0.05;

#[derive(Debug, Deserialize)]
struct TimetableFile {
    #[serde(rename = "location", default)]
    locations: Vec<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    name: String,
    latitude: f64,
    longitude: f64,
    utc_offset: String,
    #[serde(rename = "day", default)]
    days: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    date: NaiveDate,
    fajr: String,
    sunrise: Option<String>,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

#[derive(Debug, Clone)]
struct LocationTable {
    name: String,
    coordinates: Coordinates,
    days: BTreeMap<NaiveDate, PrayerTimes>,
}

impl LocationTable {
    fn matches(&self, query: Coordinates) -> bool {
        (self.coordinates.latitude - query.latitude).abs() <= COORDINATE_TOLERANCE
            && (self.coordinates.longitude - query.longitude).abs() <= COORDINATE_TOLERANCE
    }
}

/// [`PrayerTimeProvider`] backed by one or more published timetables.
#[derive(Debug, Clone, Default)]
pub struct TimetableProvider {
    tables: Vec<LocationTable>,
}

impl TimetableProvider {
    /// Read and validate a timetable file.
    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProviderError::Timetable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ProviderError> {
        let file: TimetableFile =
            toml::from_str(content).map_err(|e| ProviderError::InvalidTimetable(e.to_string()))?;

        let mut tables = Vec::with_capacity(file.locations.len());
        for raw in file.locations {
            let offset = parse_offset(&raw.utc_offset).ok_or_else(|| {
                ProviderError::InvalidTimetable(format!(
                    "bad utc_offset '{}' for {}",
                    raw.utc_offset, raw.name
                ))
            })?;
            let mut days = BTreeMap::new();
            for day in raw.days {
                let times = [&day.fajr, &day.dhuhr, &day.asr, &day.maghrib, &day.isha];
                let mut instants = [DateTime::<Utc>::UNIX_EPOCH; 5];
                for (slot, value) in instants.iter_mut().zip(times) {
                    *slot = local_instant(day.date, value, offset)?;
                }
                let mut times = PrayerTimes::new(day.date, instants);
                if let Some(sunrise) = &day.sunrise {
                    times = times.with_sunrise(local_instant(day.date, sunrise, offset)?);
                }
                days.insert(day.date, times);
            }
            debug!(location = %raw.name, days = days.len(), "loaded timetable");
            tables.push(LocationTable {
                name: raw.name,
                coordinates: Coordinates {
                    latitude: raw.latitude,
                    longitude: raw.longitude,
                },
                days,
            });
        }
        Ok(Self { tables })
    }

    /// Names of the locations this provider can serve.
    pub fn location_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

impl PrayerTimeProvider for TimetableProvider {
    fn compute(&self, coordinates: Coordinates, date: NaiveDate) -> Result<PrayerTimes, ProviderError> {
        let table = self
            .tables
            .iter()
            .find(|t| t.matches(coordinates))
            .ok_or(ProviderError::UnsupportedLocation {
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
            })?;
        table
            .days
            .get(&date)
            .cloned()
            .ok_or(ProviderError::MissingDate(date))
    }
}

fn local_instant(
    date: NaiveDate,
    value: &str,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, ProviderError> {
    let invalid = || ProviderError::InvalidTime {
        date,
        value: value.to_string(),
    };
    let time = NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid())?;
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// Parse `+HH:MM` / `-HH:MM`.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
