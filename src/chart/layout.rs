//! Vertical arrangement of tasks into rows and project groups.
//!
//! Chart units grow upward: the first row sits at `y = 0` at the bottom of the
//! chart and the ordered sequence is walked bottom to top. Every project group
//! is closed by a boundary placed above its rows, labelled with that group, so
//! each label always describes the rows directly below it.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::debug;

use crate::model::{DateSpan, Interval, TaskRecord};

/// Vertical space taken by one task row.
pub const ROW_STEP: f64 = 1.0;
/// Space reserved on each side of a group label.
pub const GROUP_PAD: f64 = 0.8;
/// Free space above the topmost boundary.
pub const TOP_MARGIN: f64 = 0.5;
/// Lower end of the vertical axis.
pub const AXIS_FLOOR: f64 = -1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRow {
    pub y: f64,
    pub label: String,
    pub planned: Option<Interval>,
    pub actual: Option<Interval>,
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupLabel {
    pub project: String,
    pub text: String,
}

/// A separator line, labelled with the group below it. The opening boundary
/// under the first row has no label.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBoundary {
    pub y: f64,
    pub label: Option<GroupLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub rows: Vec<LayoutRow>,
    pub boundaries: Vec<GroupBoundary>,
    /// Top of the canvas in chart units; the vertical range is `[AXIS_FLOOR, extent]`.
    pub extent: f64,
    /// `[earliest start, latest end]` over both tracks, if any date is known.
    pub date_span: Option<DateSpan>,
    /// Horizontal center of the group labels.
    pub label_x: NaiveDate,
    /// Position of the "Today" marker when it falls inside `date_span`.
    pub today_marker: Option<NaiveDate>,
}

fn cmp_missing_last(a: &Option<NaiveDate>, b: &Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort ascending by (project, planned start, planned end, task name), then
/// reverse the whole sequence. Missing dates sort after present ones.
pub fn order_tasks(mut records: Vec<TaskRecord>) -> Vec<TaskRecord> {
    records.sort_by(|a, b| {
        a.project
            .cmp(&b.project)
            .then_with(|| cmp_missing_last(&a.planned_start, &b.planned_start))
            .then_with(|| cmp_missing_last(&a.planned_end, &b.planned_end))
            .then_with(|| a.task.cmp(&b.task))
    });
    records.reverse();
    records
}

/// Running state of the single layout pass.
struct Cursor {
    y: f64,
    rows: Vec<LayoutRow>,
    boundaries: Vec<GroupBoundary>,
}

impl Cursor {
    fn start() -> Self {
        Self {
            y: 0.0,
            rows: Vec::new(),
            boundaries: vec![GroupBoundary {
                y: -GROUP_PAD,
                label: None,
            }],
        }
    }

    fn close_group(mut self, last: &TaskRecord) -> Self {
        let y = self.y + GROUP_PAD;
        self.boundaries.push(GroupBoundary {
            y,
            label: Some(GroupLabel {
                project: last.project.clone(),
                text: last.group_label(),
            }),
        });
        self.y = y + GROUP_PAD;
        self
    }

    fn push_row(mut self, task: &TaskRecord) -> Self {
        self.rows.push(LayoutRow {
            y: self.y,
            label: task.task.clone(),
            planned: task.planned_interval(),
            actual: task.actual_interval(),
            cancelled: task.status.is_cancelled(),
        });
        self.y += ROW_STEP;
        self
    }
}

/// `[min of all start dates, max of all end dates]` across both tracks.
pub fn date_span(records: &[TaskRecord]) -> Option<DateSpan> {
    let first = records
        .iter()
        .flat_map(|r| [r.planned_start, r.actual_start])
        .flatten()
        .min()?;
    let last = records
        .iter()
        .flat_map(|r| [r.planned_end, r.actual_end])
        .flatten()
        .max()?;
    DateSpan::covering([first, last])
}

/// Lay out an already ordered sequence in one pass.
pub fn layout(ordered: &[TaskRecord], today: NaiveDate) -> ChartLayout {
    let previous = std::iter::once(None).chain(ordered.iter().map(Some));
    let cursor = previous
        .zip(ordered)
        .fold(Cursor::start(), |cursor, (prev, task)| match prev {
            Some(prev) if prev.project != task.project => {
                cursor.close_group(prev).push_row(task)
            }
            _ => cursor.push_row(task),
        });
    let cursor = match ordered.last() {
        Some(last) => cursor.close_group(last),
        None => Cursor {
            boundaries: Vec::new(),
            ..cursor
        },
    };

    let date_span = date_span(ordered);
    let label_x = date_span.map(|s| s.midpoint()).unwrap_or(today);
    let today_marker = date_span.filter(|s| s.contains(today)).map(|_| today);
    let extent = cursor.y + TOP_MARGIN;

    debug!(
        rows = cursor.rows.len(),
        boundaries = cursor.boundaries.len(),
        extent,
        "laid out chart"
    );

    ChartLayout {
        rows: cursor.rows,
        boundaries: cursor.boundaries,
        extent,
        date_span,
        label_x,
        today_marker,
    }
}
