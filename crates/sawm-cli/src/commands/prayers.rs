use chrono::{DateTime, FixedOffset, Utc};
use sawm_core::{CountdownResolver, DateKey, Language};
use serde::Serialize;

use crate::app::{print_json, App, CliResult};

#[derive(Serialize)]
struct PrayerRow {
    prayer: &'static str,
    time: DateTime<FixedOffset>,
}

#[derive(Serialize)]
struct CalendarRow {
    day: u32,
    date: DateKey,
    dawn: DateTime<FixedOffset>,
    dusk: DateTime<FixedOffset>,
    fasted: bool,
}

fn local(at: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    at.with_timezone(&offset)
}

pub fn run(date: Option<String>) -> CliResult {
    let app = App::open()?;
    let now = app.clock().now();
    let date = match date {
        Some(raw) => raw.parse::<DateKey>()?,
        None => app.clock().today(),
    };
    let state = app.store.get();
    let resolver = CountdownResolver::new(app.provider()?);
    let times = resolver.prayer_times(&state.location, date.date())?;

    let mut rows: Vec<PrayerRow> = times
        .iter()
        .map(|(prayer, at)| PrayerRow {
            prayer: match state.language {
                Language::English => prayer.name(),
                Language::Bengali => prayer.name_bn(),
            },
            time: local(at, *now.offset()),
        })
        .collect();
    // Sunrise sits between Fajr and Dhuhr.
    if let Some(sunrise) = times.sunrise() {
        rows.insert(
            1,
            PrayerRow {
                prayer: match state.language {
                    Language::English => "Sunrise",
                    Language::Bengali => "সূর্যোদয়",
                },
                time: local(sunrise, *now.offset()),
            },
        );
    }
    print_json(&rows)
}

pub fn calendar() -> CliResult {
    let app = App::open()?;
    let offset = *app.clock().now().offset();
    let state = app.store.get();
    let provider = app.provider()?;
    let rows: Vec<CalendarRow> = app
        .config
        .observance_period()
        .timetable(&provider, &state.location)?
        .into_iter()
        .map(|row| {
            let date = DateKey::new(row.date);
            CalendarRow {
                day: row.day,
                date,
                dawn: local(row.dawn, offset),
                dusk: local(row.dusk, offset),
                fasted: state.fasting_log.contains(&date),
            }
        })
        .collect();
    print_json(&rows)
}
