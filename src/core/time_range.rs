//! Time windows and the small amount of user input validation the bot needs.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::errors::SummaryError;

/// Format accepted for custom range boundaries, e.g. `2024-12-17 10:00`.
pub const CUSTOM_RANGE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format accepted by the search command, e.g. `2024-12-17`.
pub const SEARCH_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRangeOption {
    LastHour,
    Last24Hours,
    Today,
    Yesterday,
    Custom,
}

impl TimeRangeOption {
    /// Resolves a preset window against `now`. `Custom` has no preset and
    /// yields `None`; use [`parse_custom_range`] for it.
    #[must_use]
    pub fn resolve(self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let midnight = start_of_day(now.date_naive());
        match self {
            TimeRangeOption::LastHour => Some((now - Duration::hours(1), now)),
            TimeRangeOption::Last24Hours => Some((now - Duration::hours(24), now)),
            TimeRangeOption::Today => Some((midnight, now)),
            TimeRangeOption::Yesterday => Some((midnight - Duration::days(1), midnight)),
            TimeRangeOption::Custom => None,
        }
    }
}

/// Resolves the window for a summary command. Preset options ignore
/// `start`/`end`; `Custom` requires both.
///
/// # Errors
///
/// Returns a validation error for a missing or malformed custom boundary.
pub fn resolve_range(
    option: TimeRangeOption,
    start: Option<&str>,
    end: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), SummaryError> {
    if let Some(window) = option.resolve(now) {
        return Ok(window);
    }
    match (start, end) {
        (Some(start), Some(end)) => parse_custom_range(start, end),
        _ => Err(SummaryError::Validation(
            "a custom range needs both `start` and `end` (YYYY-MM-DD HH:MM)".to_string(),
        )),
    }
}

/// Parses a custom `[start, end)` window given as two UTC timestamps.
///
/// # Errors
///
/// Returns a validation error when either value does not match
/// [`CUSTOM_RANGE_FORMAT`] or when `end` is not after `start`.
pub fn parse_custom_range(
    start: &str,
    end: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>), SummaryError> {
    let start_time = parse_timestamp(start)?;
    let end_time = parse_timestamp(end)?;
    if end_time <= start_time {
        return Err(SummaryError::Validation(
            "the end time must be later than the start time".to_string(),
        ));
    }
    Ok((start_time, end_time))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SummaryError> {
    NaiveDateTime::parse_from_str(raw.trim(), CUSTOM_RANGE_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| {
            SummaryError::Validation(format!(
                "'{raw}' is not a valid time, expected YYYY-MM-DD HH:MM"
            ))
        })
}

/// # Errors
///
/// Returns a validation error when `raw` is not a `YYYY-MM-DD` date.
pub fn parse_search_date(raw: &str) -> Result<NaiveDate, SummaryError> {
    NaiveDate::parse_from_str(raw.trim(), SEARCH_DATE_FORMAT).map_err(|_| {
        SummaryError::Validation(format!(
            "'{raw}' is not a valid date, expected YYYY-MM-DD"
        ))
    })
}

/// Half-open UTC window `[day 00:00, day+1 00:00)`.
#[must_use]
pub fn day_window(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(day);
    (start, start + Duration::days(1))
}

/// Summary ids are typed by hand, so only plain digits are accepted.
///
/// # Errors
///
/// Returns a validation error for anything other than a positive integer.
pub fn parse_summary_id(raw: &str) -> Result<i64, SummaryError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(SummaryError::Validation(format!(
            "'{raw}' is not a valid summary id, ids are numbers"
        )));
    }
    raw.parse::<i64>()
        .map_err(|_| SummaryError::Validation(format!("summary id '{raw}' is out of range")))
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN))
}
