//! Cleans raw task rows into [`TaskRecord`]s.
//!
//! Per-cell problems never fail the pipeline: an unparseable date or number
//! becomes `None` and only suppresses whatever depends on it downstream.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::model::{TaskRecord, TaskRow, TaskStatus};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Try parsing a date string with several common formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Lenient numeric cell. Accepts a decimal comma.
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>()
        .or_else(|_| s.replace(',', ".").parse::<f64>())
        .ok()
}

/// Only a value equal to 1 (or an explicit yes) makes a row visible.
pub fn is_visible(s: &str) -> bool {
    let s = s.trim();
    if let Some(n) = parse_number(s) {
        return n == 1.0;
    }
    matches!(s.to_lowercase().as_str(), "true" | "yes" | "x")
}

fn date_cell(row: &TaskRow, column: &str, raw: &str) -> Option<NaiveDate> {
    let parsed = parse_date(raw);
    if parsed.is_none() && !raw.trim().is_empty() {
        debug!(task = row.task(), column, value = raw, "unparseable date, treated as missing");
    }
    parsed
}

fn span_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    Some((end? - start?).num_days())
}

/// Normalize one visible row. `today` back-fills the actual end of tasks in progress.
pub fn normalize_row(row: &TaskRow, today: NaiveDate) -> TaskRecord {
    let planned_start = date_cell(row, "planned_start", row.planned_start());
    let planned_end = date_cell(row, "planned_end", row.planned_end());
    let actual_start = date_cell(row, "actual_start", row.actual_start());
    let actual_end = match (actual_start, date_cell(row, "actual_end", row.actual_end())) {
        (Some(_), None) => Some(today),
        (_, end) => end,
    };

    TaskRecord {
        project: row.project().trim().to_string(),
        task: row.task().trim().to_string(),
        description: row.description().trim().to_string(),
        planned_start,
        planned_end,
        planned_days: parse_number(row.planned_days()),
        weight: parse_number(row.weight()),
        status: TaskStatus::parse(row.status()),
        actual_start,
        actual_end,
        progress: parse_number(row.progress()),
        project_name: row.project_name().trim().to_string(),
        objective: row.objective().trim().to_string(),
        quarter: row.quarter().trim().to_string(),
        planned_duration: span_days(planned_start, planned_end),
        actual_duration: span_days(actual_start, actual_end),
    }
}

/// Filter to visible rows and normalize them.
///
/// Returns `None` when no visible row remains: that means "nothing to render",
/// not a failure.
pub fn normalize(rows: &[TaskRow], today: NaiveDate) -> Option<Vec<TaskRecord>> {
    let records: Vec<TaskRecord> = rows
        .iter()
        .filter(|row| is_visible(row.visible()))
        .map(|row| normalize_row(row, today))
        .collect();
    debug!(
        total = rows.len(),
        visible = records.len(),
        "normalized task table"
    );
    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::test_helpers::{d, row, today};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_common_date_formats() {
        assert_eq!(parse_date("2024-01-05"), Some(d(2024, 1, 5)));
        assert_eq!(parse_date("15/01/2024"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-05 00:00:00"), Some(d(2024, 1, 5)));
        assert_eq!(parse_date(" 2024-01-05T13:30:00 "), Some(d(2024, 1, 5)));
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn visibility_requires_one() {
        assert!(is_visible("1"));
        assert!(is_visible("1.0"));
        assert!(is_visible("TRUE"));
        assert!(!is_visible("0"));
        assert!(!is_visible("2"));
        assert!(!is_visible(""));
        assert!(!is_visible("no"));
    }

    #[test]
    fn drops_invisible_rows() {
        let rows = vec![
            row("A", "shown", ("2024-01-01", "2024-01-10"), ("", ""), "1"),
            row("A", "hidden", ("2024-01-01", "2024-01-10"), ("", ""), "0"),
        ];
        let records = normalize(&rows, today()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].task, "shown");
    }

    #[test]
    fn empty_result_is_none() {
        let rows = vec![row("A", "hidden", ("", ""), ("", ""), "0")];
        assert_eq!(normalize(&rows, today()), None);
        assert_eq!(normalize(&[], today()), None);
    }

    #[test]
    fn open_ended_actual_runs_to_today() {
        let r = normalize_row(
            &row("A", "t", ("2024-01-01", "2024-01-10"), ("2024-02-20", ""), "1"),
            today(),
        );
        assert_eq!(r.actual_end, Some(today()));
        assert_eq!(r.actual_duration, Some(10));
        assert_eq!(r.planned_duration, Some(9));
    }

    #[test]
    fn unparseable_actual_end_is_also_back_filled() {
        let r = normalize_row(
            &row("A", "t", ("", ""), ("2024-02-28", "n/a"), "1"),
            today(),
        );
        assert_eq!(r.actual_end, Some(today()));
        assert_eq!(r.actual_duration, Some(2));
    }

    #[test]
    fn no_actual_start_means_no_actual_interval() {
        let r = normalize_row(
            &row("A", "t", ("2024-01-01", "2024-01-10"), ("", "2024-01-09"), "1"),
            today(),
        );
        assert_eq!(r.actual_start, None);
        assert_eq!(r.actual_end, Some(d(2024, 1, 9)));
        assert_eq!(r.actual_interval(), None);
        assert_eq!(r.actual_duration, None);
    }

    #[test]
    fn bad_dates_are_local_to_the_cell() {
        let r = normalize_row(
            &row("A", "t", ("garbage", "2024-01-10"), ("2024-01-02", "2024-01-04"), "1"),
            today(),
        );
        assert_eq!(r.planned_start, None);
        assert_eq!(r.planned_end, Some(d(2024, 1, 10)));
        assert_eq!(r.planned_duration, None);
        assert_eq!(r.planned_interval(), None);
        assert_eq!(r.actual_duration, Some(2));
    }

    #[test]
    fn numbers_accept_decimal_comma() {
        assert_eq!(parse_number("0,75"), Some(0.75));
        assert_eq!(parse_number("12"), Some(12.0));
        assert_eq!(parse_number("n/a"), None);
    }
}
