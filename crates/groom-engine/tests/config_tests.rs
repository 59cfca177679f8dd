//! Tests for shop configuration, weekly schedule and time windows.

use chrono::{NaiveTime, Weekday};
use groom_engine::window::TimeWindow;
use groom_engine::{GroomError, ShopConfig};

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

// ── Built-in configuration ──────────────────────────────────────────────────

#[test]
fn builtin_config_matches_the_shop() {
    let config = ShopConfig::builtin().unwrap();

    assert_eq!(config.name, "The Groom Room");
    assert_eq!(config.slot_interval_minutes, 60);
    assert_eq!(config.tz().unwrap(), chrono_tz::Indian::Mauritius);

    let hours = &config.hours;
    assert!(hours.is_closed(Weekday::Tue));
    for day in [Weekday::Mon, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
        let open = hours.hours(day).unwrap();
        assert_eq!((open.start(), open.end()), (t("08:30"), t("20:30")));
    }
    assert_eq!(hours.hours(Weekday::Sat).unwrap().end(), t("18:00"));
    assert_eq!(hours.hours(Weekday::Sun).unwrap().end(), t("15:00"));

    assert_eq!(
        config.breaks,
        vec![
            TimeWindow::parse("12:30", "13:30").unwrap(),
            TimeWindow::parse("17:30", "18:00").unwrap(),
        ]
    );
}

#[test]
fn builtin_catalog_and_roster() {
    let config = ShopConfig::builtin().unwrap();
    let catalog = config.catalog().unwrap();
    let roster = config.roster().unwrap();

    assert_eq!(catalog.len(), 9);
    assert_eq!(catalog.duration_of("mens-haircut").unwrap(), 30);
    assert_eq!(catalog.duration_of("haircut-shave-color").unwrap(), 60);
    assert_eq!(catalog.get("beard-trim").unwrap().price, 50.0);

    let names: Vec<&str> = roster.by_name().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Alex", "Jordan", "Sam"]);
}

#[test]
fn unknown_service_is_an_error_not_a_fallback() {
    let catalog = ShopConfig::builtin().unwrap().catalog().unwrap();

    let err = catalog.duration_of("no-such-service").unwrap_err();
    assert!(matches!(err, GroomError::UnknownService(ref id) if id == "no-such-service"));
}

// ── Parsing ─────────────────────────────────────────────────────────────────

#[test]
fn minimal_config_uses_defaults() {
    let config = ShopConfig::from_toml_str(
        r#"
        name = "Corner Cuts"

        [hours]
        mon = { open = "09:00", close = "17:00" }
        "#,
    )
    .unwrap();

    assert_eq!(config.timezone, "UTC");
    assert_eq!(config.slot_interval_minutes, 60);
    assert!(config.breaks.is_empty());
    assert!(config.hours.is_closed(Weekday::Sun));
}

#[test]
fn reversed_hours_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Backwards"

        [hours]
        mon = { open = "17:00", close = "09:00" }
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::Config(_)), "got {err:?}");
}

#[test]
fn malformed_time_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Typo"

        [hours]
        mon = { open = "9am", close = "17:00" }
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::Config(_)), "got {err:?}");
}

#[test]
fn invalid_timezone_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Nowhere"
        timezone = "Mars/Olympus_Mons"
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn zero_slot_interval_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Zero"
        slot_interval_minutes = 0
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn oversized_slot_interval_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Forever"
        slot_interval_minutes = 4000000000

        [hours]
        mon = { open = "09:00", close = "17:00" }
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn day_long_slot_interval_accepted() {
    let config = ShopConfig::from_toml_str(
        r#"
        name = "One Slot"
        slot_interval_minutes = 1440
        "#,
    )
    .unwrap();

    assert_eq!(config.calendar().slot_interval_minutes, 1440);
}

#[test]
fn misspelled_weekday_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Typo"

        [hours]
        monday = { open = "08:30", close = "20:30" }
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::Config(_)), "got {err:?}");
    assert!(err.to_string().contains("monday"), "got {err}");
}

#[test]
fn unknown_top_level_key_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Typo"
        slot_interval = 30
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::Config(_)), "got {err:?}");
}

#[test]
fn break_outside_every_open_day_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Late Break"

        [hours]
        mon = { open = "09:00", close = "17:00" }

        [[breaks]]
        start = "18:00"
        end = "19:00"
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn zero_duration_service_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Instant"

        [[services]]
        id = "blink"
        name = "Blink"
        duration_minutes = 0
        price = 1.0
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn duplicate_barber_rejected() {
    let err = ShopConfig::from_toml_str(
        r#"
        name = "Twins"

        [[barbers]]
        id = "alex"
        name = "Alex"

        [[barbers]]
        id = "alex"
        name = "Alexandra"
        "#,
    )
    .unwrap_err();

    assert!(matches!(err, GroomError::InvalidConfig(_)), "got {err:?}");
}

#[test]
fn config_survives_a_toml_roundtrip() {
    let config = ShopConfig::builtin().unwrap();
    let text = toml::to_string(&config).unwrap();
    assert_eq!(ShopConfig::from_toml_str(&text).unwrap(), config);
}

// ── Time windows ────────────────────────────────────────────────────────────

#[test]
fn window_requires_start_before_end() {
    assert!(matches!(
        TimeWindow::parse("10:00", "10:00"),
        Err(GroomError::InvalidWindow { .. })
    ));
    assert!(TimeWindow::parse("10:00", "10:01").is_ok());
}

#[test]
fn window_overlap_is_half_open() {
    let lunch = TimeWindow::parse("12:30", "13:30").unwrap();

    assert!(lunch.overlaps(&TimeWindow::parse("12:00", "12:31").unwrap()));
    assert!(lunch.overlaps(&TimeWindow::parse("13:00", "14:00").unwrap()));
    assert!(!lunch.overlaps(&TimeWindow::parse("11:30", "12:30").unwrap()));
    assert!(!lunch.overlaps(&TimeWindow::parse("13:30", "14:30").unwrap()));

    assert!(lunch.contains(t("12:30")));
    assert!(!lunch.contains(t("13:30")));
    assert_eq!(lunch.duration_minutes(), 60);
    assert_eq!(lunch.to_string(), "12:30-13:30");
}
