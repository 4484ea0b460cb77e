// File: ./src/model/dates.rs
// Week labels ("15/9") and day names to calendar dates.
use crate::model::vocab::DEFAULT_VOCABULARY;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

/// Parses a `dd/m` or `dd/mm` week label into a date of `reference_year`.
///
/// Timetables span an academic year (September to August): a January–August
/// date that already lies in the past belongs to the following year.
pub fn resolve_week_date(week_label: &str, reference_year: i32) -> Option<NaiveDate> {
    resolve_week_date_at(week_label, reference_year, Local::now().naive_local())
}

/// Same as [`resolve_week_date`] with an explicit "now".
pub fn resolve_week_date_at(
    week_label: &str,
    reference_year: i32,
    now: NaiveDateTime,
) -> Option<NaiveDate> {
    let parts: Vec<&str> = week_label.trim().split('/').collect();
    if parts.len() != 2 {
        return None;
    }
    let day = parts[0].trim().parse::<u32>().ok()?;
    let month = parts[1].trim().parse::<u32>().ok()?;

    let date = NaiveDate::from_ymd_opt(reference_year, month, day)?;
    if date.and_hms_opt(0, 0, 0)? < now && month <= 8 {
        return NaiveDate::from_ymd_opt(reference_year + 1, month, day);
    }
    Some(date)
}

/// Monday = 0 … Sunday = 6. Unknown names count as Monday.
pub fn day_offset(day_name: &str) -> u32 {
    DEFAULT_VOCABULARY.day_offset(day_name)
}

/// Monday of the week containing `date`.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Date of `day_name` in the week anchored by `week_label`.
///
/// Only the week of the label matters: `"8/10"` and `"6/10"` both anchor the
/// week starting Monday 6 October.
pub fn project_to_date(week_label: &str, day_name: &str, reference_year: i32) -> Option<NaiveDate> {
    project_to_date_at(
        week_label,
        day_name,
        reference_year,
        Local::now().naive_local(),
    )
}

pub fn project_to_date_at(
    week_label: &str,
    day_name: &str,
    reference_year: i32,
    now: NaiveDateTime,
) -> Option<NaiveDate> {
    let anchor = resolve_week_date_at(week_label, reference_year, now)?;
    Some(week_monday(anchor) + Duration::days(day_offset(day_name) as i64))
}
