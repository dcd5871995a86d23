//! CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory
//! with the clock pinned through `SAWM_NOW`.

use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

const NOW: &str = "2026-02-19T12:00:00+06:00";

const TIMETABLE: &str = r#"
[[location]]
name = "Chandpur, Bangladesh"
latitude = 23.2332
longitude = 90.6712
utc_offset = "+06:00"

[[location.day]]
date = "2026-02-18"
fajr = "05:10"
dhuhr = "12:12"
asr = "16:15"
maghrib = "17:54"
isha = "19:08"

[[location.day]]
date = "2026-02-19"
fajr = "05:09"
sunrise = "06:24"
dhuhr = "12:12"
asr = "16:15"
maghrib = "17:55"
isha = "19:09"

[[location.day]]
date = "2026-02-20"
fajr = "05:09"
dhuhr = "12:12"
asr = "16:16"
maghrib = "17:55"
isha = "19:09"
"#;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    /// A sandbox with a three-day timetable for the default location.
    fn with_timetable() -> Self {
        let sandbox = Self::new();
        let path: PathBuf = sandbox.dir.path().join("timetable.toml");
        std::fs::write(&path, TIMETABLE).expect("write timetable");
        sandbox.ok(&["config", "set", "prayer.timetable", path.to_str().unwrap()]);
        sandbox.ok(&["config", "set", "observance.total_days", "3"]);
        sandbox
    }

    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_sawm"))
            .args(args)
            .env("SAWM_DATA_DIR", self.dir.path())
            .env("SAWM_NOW", NOW)
            .env_remove("SAWM_LOG")
            .env_remove("SAWM_ENV")
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        (stdout, stderr, code)
    }

    fn ok(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
        stdout
    }

    fn fail(&self, args: &[&str]) -> String {
        let (_, stderr, code) = self.run(args);
        assert_ne!(code, 0, "CLI command unexpectedly succeeded: {args:?}");
        stderr
    }

    fn json(&self, args: &[&str]) -> Value {
        serde_json::from_str(&self.ok(args)).expect("Failed to parse JSON output")
    }

    /// One JSON event per line.
    fn events(&self, args: &[&str]) -> Vec<Value> {
        self.ok(args)
            .lines()
            .map(|line| serde_json::from_str(line).expect("event line"))
            .collect()
    }
}

#[test]
fn status_without_timetable() {
    let sandbox = Sandbox::new();
    let status = sandbox.json(&["status"]);
    assert_eq!(status["date"], "2026-02-19");
    assert_eq!(status["day"], 2);
    assert_eq!(status["location"]["name"], "Chandpur, Bangladesh");
    assert_eq!(status["language"], "en");
    assert!(status["countdown"].is_null());
    assert_eq!(status["progress"]["streak"], 0);
}

#[test]
fn status_with_timetable_is_inside_the_fast() {
    let sandbox = Sandbox::with_timetable();
    let status = sandbox.json(&["status"]);
    assert_eq!(status["countdown"]["label"], "until_end");
    assert_eq!(status["countdown"]["remaining"]["total"], 5 * 3600 + 55 * 60);
    assert_eq!(status["next_prayer"]["prayer"], "dhuhr");
    assert_eq!(status["dua"]["title"], "Iftar Dua");
}

#[test]
fn status_without_countdown_has_no_dua() {
    let sandbox = Sandbox::new();
    let status = sandbox.json(&["status"]);
    assert!(status["dua"].is_null());
    let bearing = status["qibla_bearing"].as_f64().unwrap();
    assert!((bearing - 278.18).abs() < 0.1, "{bearing}");
}

#[test]
fn qibla_follows_location_and_language() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["location", "set", "dhaka"]);
    let qibla = sandbox.json(&["qibla"]);
    assert_eq!(qibla["location"], "Dhaka, Bangladesh");
    assert_eq!(qibla["text"], "Qibla Direction: 278° from North");

    sandbox.ok(&["location", "set", "london"]);
    sandbox.ok(&["language", "bn"]);
    let qibla = sandbox.json(&["qibla"]);
    assert!((qibla["bearing"].as_f64().unwrap() - 118.99).abs() < 0.1);
    assert_eq!(qibla["text"], "কিবলার দিক: 119°");
}

#[test]
fn fast_toggle_and_streak() {
    let sandbox = Sandbox::new();
    let events = sandbox.events(&["fast", "toggle", "2026-02-18"]);
    assert_eq!(events[0]["type"], "fasting_day_toggled");
    assert_eq!(events[0]["fasted"], true);
    assert_eq!(events[1]["type"], "badge_unlocked");
    assert_eq!(events[1]["badge_id"], "first_fast");

    // Defaults to today.
    sandbox.ok(&["fast", "toggle"]);
    let log = sandbox.json(&["fast", "list"]);
    assert_eq!(log["days"].as_array().unwrap().len(), 2);
    assert_eq!(log["days"][1]["date"], "2026-02-19");
    assert_eq!(log["days"][1]["day"], 2);
    assert_eq!(log["streak"], 2);

    let events = sandbox.events(&["fast", "toggle", "2026-02-19"]);
    assert_eq!(events[0]["fasted"], false);
    assert_eq!(sandbox.json(&["fast", "list"])["streak"], 1);
}

#[test]
fn fast_toggle_rejects_bad_dates() {
    let sandbox = Sandbox::new();
    let stderr = sandbox.fail(&["fast", "toggle", "2026-2-18"]);
    assert!(stderr.contains("invalid date key"), "{stderr}");
}

#[test]
fn counter_commits_once_at_goal() {
    let sandbox = Sandbox::new();
    let events = sandbox.events(&["counter", "tap", "33"]);
    assert_eq!(events[0]["type"], "goal_reached");
    assert_eq!(events[0]["entry"]["count"], 33);

    sandbox.ok(&["counter", "tap"]);
    let status = sandbox.json(&["counter", "status"]);
    assert_eq!(status["count"], 34);
    assert_eq!(status["goal_reached"], true);
    assert_eq!(status["total_count"], 33);

    let events = sandbox.events(&["counter", "reset"]);
    assert!(events[0]["committed"].is_null());
    let history = sandbox.json(&["counter", "history"]);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["ritualId"], "subhanallah");
    assert_eq!(history[0]["date"], "2026-02-19");
}

#[test]
fn counter_switch_commits_and_rejects_unknown_rituals() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["counter", "tap", "5"]);
    let events = sandbox.events(&["counter", "switch", "allah"]);
    assert_eq!(events[0]["type"], "ritual_switched");
    assert_eq!(events[0]["goal"], 99);
    assert_eq!(events[0]["committed"]["count"], 5);

    let stderr = sandbox.fail(&["counter", "switch", "nope"]);
    assert!(stderr.contains("unknown ritual"), "{stderr}");
    assert_eq!(sandbox.json(&["counter", "status"])["ritual_id"], "allah");
}

#[test]
fn location_and_language() {
    let sandbox = Sandbox::new();
    let events = sandbox.events(&["location", "set", "dhaka"]);
    assert_eq!(events[0]["location"]["name"], "Dhaka, Bangladesh");

    sandbox.ok(&["location", "set", "Base Camp", "--lat", "27.98", "--lon", "86.92"]);
    assert_eq!(sandbox.json(&["location", "show"])["name"], "Base Camp");

    let stderr = sandbox.fail(&["location", "set", "Nowhere", "--lat", "91", "--lon", "0"]);
    assert!(stderr.contains("latitude"), "{stderr}");
    assert_eq!(sandbox.json(&["location", "show"])["name"], "Base Camp");

    let list = sandbox.json(&["location", "list", "saudi"]);
    assert_eq!(list.as_array().unwrap().len(), 2);

    sandbox.ok(&["language", "bn"]);
    assert_eq!(sandbox.json(&["status"])["language"], "bn");
    sandbox.fail(&["language", "fr"]);
}

#[test]
fn config_get_set() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.ok(&["config", "get", "counter.default_ritual"]).trim(), "subhanallah");
    sandbox.ok(&["config", "set", "counter.default_ritual", "allah"]);
    assert_eq!(sandbox.json(&["counter", "status"])["goal"], 99);

    sandbox.fail(&["config", "get", "counter.nope"]);
    sandbox.fail(&["config", "set", "counter.default_ritual", "nope"]);
    sandbox.fail(&["config", "set", "streak.require_recent", "maybe"]);

    sandbox.ok(&["config", "reset"]);
    assert_eq!(sandbox.ok(&["config", "get", "counter.default_ritual"]).trim(), "subhanallah");
}

#[test]
fn prayers_and_calendar() {
    let sandbox = Sandbox::with_timetable();
    let prayers = sandbox.json(&["prayers"]);
    let rows = prayers.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["prayer"], "Fajr");
    assert_eq!(rows[0]["time"], "2026-02-19T05:09:00+06:00");
    assert_eq!(rows[1]["prayer"], "Sunrise");
    assert_eq!(rows[1]["time"], "2026-02-19T06:24:00+06:00");
    assert_eq!(rows[2]["prayer"], "Dhuhr");

    // No sunrise column for that day.
    let rows = sandbox.json(&["prayers", "--date", "2026-02-20"]);
    assert_eq!(rows.as_array().unwrap().len(), 5);

    let calendar = sandbox.json(&["calendar"]);
    assert_eq!(calendar.as_array().unwrap().len(), 3);
    assert_eq!(calendar[2]["dusk"], "2026-02-20T17:55:00+06:00");

    let stderr = sandbox.fail(&["prayers", "--date", "2026-03-01"]);
    assert!(stderr.contains("2026-03-01"), "{stderr}");
}

#[test]
fn prayers_need_a_timetable() {
    let sandbox = Sandbox::new();
    let stderr = sandbox.fail(&["prayers"]);
    assert!(stderr.contains("prayer.timetable"), "{stderr}");
}

#[test]
fn watch_prints_requested_ticks() {
    let sandbox = Sandbox::with_timetable();
    let out = sandbox.ok(&["watch", "--ticks", "2"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Iftar in 05:55:00"), "{out}");
}

#[test]
fn badges_list_unlocked_first() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["fast", "toggle", "2026-02-18"]);
    let badges = sandbox.json(&["badges"]);
    let badges = badges.as_array().unwrap();
    assert_eq!(badges.len(), 6);
    assert_eq!(badges[0]["id"], "first_fast");
    assert_eq!(badges[0]["unlocked"], true);
    assert_eq!(badges[1]["unlocked"], false);
}

#[test]
fn rituals_lists_presets() {
    let sandbox = Sandbox::new();
    let rituals = sandbox.json(&["rituals"]);
    assert_eq!(rituals.as_array().unwrap().len(), 16);
    assert_eq!(rituals[0]["id"], "subhanallah");
}
