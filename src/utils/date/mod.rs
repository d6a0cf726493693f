// Date utility functions

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone};

/// Resolve a wall-clock date/time in the local zone.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times inside a DST gap
/// are interpreted as UTC wall time so the caller always gets an instant.
pub fn local_datetime(date: NaiveDate, time: NaiveTime) -> DateTime<Local> {
    let naive = date.and_time(time);
    naive
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// First and last day of the whole-week span covering `date`'s month.
pub fn month_grid_bounds(date: NaiveDate, first_day_of_week: u8) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let next_month_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month_first
        .and_then(|d| d.pred_opt())
        .unwrap_or(first);

    let grid_start = week_start(first, first_day_of_week);
    let grid_end = week_start(last, first_day_of_week) + Duration::days(6);
    (grid_start, grid_end)
}

/// Move `instant` to `target` keeping its local time of day.
pub fn with_date(instant: DateTime<Local>, target: NaiveDate) -> DateTime<Local> {
    local_datetime(target, instant.time())
}
