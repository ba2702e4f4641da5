//! Fixtures shared by the chart pipeline tests.

use chrono::NaiveDate;

use crate::model::{TaskRecord, TaskRow};

use super::normalize::normalize_row;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// A fixed invocation date so results do not depend on the clock.
pub fn today() -> NaiveDate {
    d(2024, 3, 1)
}

pub fn row(
    project: &str,
    task: &str,
    planned: (&str, &str),
    actual: (&str, &str),
    visible: &str,
) -> TaskRow {
    TaskRow::from_cells(
        [
            project, task, "", planned.0, planned.1, "", "1", "Active", actual.0, actual.1, "0.5",
            visible, "Name", "OE1", "2024-Q1",
        ],
        2,
    )
    .unwrap()
}

pub fn with_status(row: TaskRow, status: &str) -> TaskRow {
    let mut cells: Vec<String> = (0..15).map(|i| cell(&row, i).to_string()).collect();
    cells[7] = status.to_string();
    TaskRow::from_cells(cells, 2).unwrap()
}

fn cell(row: &TaskRow, i: usize) -> &str {
    match i {
        0 => row.project(),
        1 => row.task(),
        2 => row.description(),
        3 => row.planned_start(),
        4 => row.planned_end(),
        5 => row.planned_days(),
        6 => row.weight(),
        7 => row.status(),
        8 => row.actual_start(),
        9 => row.actual_end(),
        10 => row.progress(),
        11 => row.visible(),
        12 => row.project_name(),
        13 => row.objective(),
        _ => row.quarter(),
    }
}

/// A visible record with only planned dates.
pub fn planned(project: &str, task: &str, start: &str, end: &str) -> TaskRecord {
    normalize_row(&row(project, task, (start, end), ("", ""), "1"), today())
}
