use chrono::{NaiveDate, TimeZone, Utc};
use recap::core::time_range::{
    TimeRangeOption, day_window, parse_custom_range, parse_search_date, parse_summary_id,
    resolve_range,
};
use recap::errors::SummaryError;

#[test]
fn test_presets_resolve_against_now() {
    let now = Utc.with_ymd_and_hms(2024, 12, 17, 15, 30, 0).unwrap();
    let midnight = Utc.with_ymd_and_hms(2024, 12, 17, 0, 0, 0).unwrap();

    assert_eq!(
        TimeRangeOption::LastHour.resolve(now),
        Some((Utc.with_ymd_and_hms(2024, 12, 17, 14, 30, 0).unwrap(), now))
    );
    assert_eq!(
        TimeRangeOption::Last24Hours.resolve(now),
        Some((Utc.with_ymd_and_hms(2024, 12, 16, 15, 30, 0).unwrap(), now))
    );
    assert_eq!(TimeRangeOption::Today.resolve(now), Some((midnight, now)));
    assert_eq!(
        TimeRangeOption::Yesterday.resolve(now),
        Some((Utc.with_ymd_and_hms(2024, 12, 16, 0, 0, 0).unwrap(), midnight))
    );
    assert_eq!(TimeRangeOption::Custom.resolve(now), None);
}

#[test]
fn test_presets_ignore_custom_values() {
    let now = Utc.with_ymd_and_hms(2024, 12, 17, 15, 30, 0).unwrap();
    let window = resolve_range(TimeRangeOption::LastHour, Some("junk"), None, now).unwrap();
    assert_eq!(window.1, now);
}

#[test]
fn test_custom_range_requires_both_values() {
    let now = Utc::now();
    let err = resolve_range(TimeRangeOption::Custom, Some("2024-12-17 10:00"), None, now)
        .unwrap_err();
    assert!(matches!(err, SummaryError::Validation(_)));
}

#[test]
fn test_custom_range_parses_utc_times() {
    let (start, end) = parse_custom_range("2024-12-17 10:00", " 2024-12-17 12:15 ").unwrap();
    assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 17, 10, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2024, 12, 17, 12, 15, 0).unwrap());
}

#[test]
fn test_custom_range_rejects_bad_input() {
    assert!(parse_custom_range("17/12/2024 10:00", "2024-12-17 12:00").is_err());
    assert!(parse_custom_range("2024-12-17 12:00", "2024-12-17 10:00").is_err());
    assert!(parse_custom_range("2024-12-17 12:00", "2024-12-17 12:00").is_err());
}

#[test]
fn test_search_date_parsing() {
    assert_eq!(
        parse_search_date("2024-12-17").unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 17).unwrap()
    );
    assert!(parse_search_date("2024-13-01").is_err());
    assert!(parse_search_date("yesterday").is_err());
}

#[test]
fn test_day_window_is_half_open() {
    let (start, end) = day_window(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
    assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
}

#[test]
fn test_summary_id_parsing() {
    assert_eq!(parse_summary_id("42").unwrap(), 42);
    assert_eq!(parse_summary_id(" 7 ").unwrap(), 7);
    assert!(parse_summary_id("").is_err());
    assert!(parse_summary_id("-3").is_err());
    assert!(parse_summary_id("12a").is_err());
    assert!(parse_summary_id("99999999999999999999").is_err());
}
