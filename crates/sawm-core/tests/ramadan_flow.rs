//! End-to-end flow over a few days of the month: log fasts, count dhikr,
//! settle badges, and follow the countdown through a day.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use sawm_core::{
    AppState, Catalog, Clock, Coordinates, CountdownLabel, CountdownResolver, CounterSession,
    Event, FixedClock, MemoryStore, ObservancePeriod, Prayer, PrayerTimes, ProviderError,
    StateStore, TimetableProvider,
};

fn offset() -> FixedOffset {
    FixedOffset::east_opt(6 * 3600).unwrap()
}

fn local(date: NaiveDate, h: u32, m: u32) -> DateTime<FixedOffset> {
    offset()
        .from_local_datetime(&date.and_hms_opt(h, m, 0).unwrap())
        .unwrap()
}

type Provider = fn(Coordinates, NaiveDate) -> Result<PrayerTimes, ProviderError>;

fn provider(_: Coordinates, date: NaiveDate) -> Result<PrayerTimes, ProviderError> {
    let at = |h, m| local(date, h, m).with_timezone(&Utc);
    Ok(PrayerTimes::new(
        date,
        [at(5, 10), at(12, 10), at(16, 15), at(17, 55), at(19, 10)],
    ))
}

#[test]
fn a_week_of_fasting_and_dhikr() {
    let catalog = Catalog::builtin();
    let period = ObservancePeriod::default();
    let clock = FixedClock::new(local(period.start(), 9, 0));
    let mut store = StateStore::open(Box::new(MemoryStore::new()), AppState::default());
    let mut session = CounterSession::new(catalog.ritual("subhanallah").unwrap());

    let mut unlocked = Vec::new();
    for _ in 0..7 {
        let today = clock.today();
        store.toggle_fasting_day(today).unwrap();
        for _ in 0..20 {
            session.tap(&mut store, today).unwrap();
        }
        unlocked.extend(store.settle_badges(&catalog, today).unwrap());
        clock.advance(Duration::days(1));
    }

    // 140 taps: goal commit at 33, then switch commits the full 140.
    let switched = session
        .switch_ritual(&mut store, catalog.ritual("allah").unwrap(), clock.today())
        .unwrap();
    assert!(matches!(switched, Event::RitualSwitched { committed: Some(ref e), .. } if e.count == 140));
    unlocked.extend(store.settle_badges(&catalog, clock.today()).unwrap());

    let snapshot = store.get();
    assert_eq!(snapshot.fasting_log.len(), 7);
    assert_eq!(snapshot.total_count, 33 + 140);
    assert_eq!(snapshot.history_total(), snapshot.total_count);
    assert_eq!(unlocked, vec!["first_fast", "week_warrior", "tasbih_100"]);

    let progress = store.progress(&catalog, clock.today());
    assert_eq!(progress.streak, 7);
    assert_eq!(progress.longest_streak, 7);
}

#[test]
fn countdown_follows_the_day() {
    let resolver = CountdownResolver::new(provider as Provider);
    let location = sawm_core::catalog::default_location();
    let date = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();

    let before_dawn = resolver.resolve(&location, local(date, 4, 10)).unwrap();
    assert_eq!(before_dawn.label, CountdownLabel::UntilStart);
    assert_eq!(before_dawn.remaining.to_string(), "01:00:00");

    let fasting = resolver.resolve(&location, local(date, 15, 0)).unwrap();
    assert_eq!(fasting.label, CountdownLabel::UntilEnd);
    assert_eq!(fasting.remaining.to_string(), "02:55:00");
    assert!(fasting.progress > 0.5 && fasting.progress < 1.0);

    let evening = resolver.resolve(&location, local(date, 21, 0)).unwrap();
    assert_eq!(evening.label, CountdownLabel::UntilStart);
    assert_eq!(evening.target, local(date.succ_opt().unwrap(), 5, 10));
    assert_eq!(evening.progress, 0.0);

    let next = resolver
        .next_prayer(&location, local(date, 13, 0))
        .unwrap()
        .unwrap();
    assert_eq!(next.prayer, Prayer::Asr);
    assert!(resolver.next_prayer(&location, local(date, 20, 0)).unwrap().is_none());
}

#[test]
fn timetable_drives_the_calendar() {
    let mut toml = String::from(
        "[[location]]\nname = \"Chandpur, Bangladesh\"\nlatitude = 23.2333\nlongitude = 90.6712\nutc_offset = \"+06:00\"\n",
    );
    let period = ObservancePeriod::new(NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(), 3);
    for n in 1..=3 {
        let date = period.date_of_day(n).unwrap();
        toml.push_str(&format!(
            "\n[[location.day]]\ndate = \"{date}\"\nfajr = \"05:1{n}\"\ndhuhr = \"12:13\"\nasr = \"16:16\"\nmaghrib = \"17:5{n}\"\nisha = \"19:10\"\n"
        ));
    }
    let provider = TimetableProvider::from_toml_str(&toml).unwrap();
    let location = sawm_core::catalog::default_location();
    let rows = period.timetable(&provider, &location).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].dawn, local(period.start(), 5, 11).with_timezone(&Utc));
    assert_eq!(rows[2].dusk, local(rows[2].date, 17, 53).with_timezone(&Utc));

    // Outside the table the provider refuses instead of guessing.
    let longer = ObservancePeriod::new(period.start(), 4);
    assert!(matches!(
        longer.timetable(&provider, &location),
        Err(ProviderError::MissingDate(_))
    ));
}
