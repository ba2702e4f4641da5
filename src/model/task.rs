use chrono::NaiveDate;

use crate::error::{GanttError, Result};

/// Number of positional columns in a task table.
pub const COLUMN_COUNT: usize = 15;

/// Column names in positional order. Header text in the source table is ignored.
pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "project",
    "task",
    "description",
    "planned_start",
    "planned_end",
    "planned_days",
    "weight",
    "status",
    "actual_start",
    "actual_end",
    "progress",
    "visible",
    "project_name",
    "objective",
    "quarter",
];

/// One raw record of the task table, validated for arity but otherwise untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    cells: [String; COLUMN_COUNT],
}

impl TaskRow {
    /// Build a row from a sequence of cells. `line` is only used for error reporting.
    pub fn from_cells<I, S>(cells: I, line: u64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        let found = cells.len();
        let cells: [String; COLUMN_COUNT] =
            cells.try_into().map_err(|_| GanttError::SchemaMismatch {
                line,
                expected: COLUMN_COUNT,
                found,
            })?;
        Ok(Self { cells })
    }

    pub fn project(&self) -> &str {
        &self.cells[0]
    }
    pub fn task(&self) -> &str {
        &self.cells[1]
    }
    pub fn description(&self) -> &str {
        &self.cells[2]
    }
    pub fn planned_start(&self) -> &str {
        &self.cells[3]
    }
    pub fn planned_end(&self) -> &str {
        &self.cells[4]
    }
    pub fn planned_days(&self) -> &str {
        &self.cells[5]
    }
    pub fn weight(&self) -> &str {
        &self.cells[6]
    }
    pub fn status(&self) -> &str {
        &self.cells[7]
    }
    pub fn actual_start(&self) -> &str {
        &self.cells[8]
    }
    pub fn actual_end(&self) -> &str {
        &self.cells[9]
    }
    pub fn progress(&self) -> &str {
        &self.cells[10]
    }
    pub fn visible(&self) -> &str {
        &self.cells[11]
    }
    pub fn project_name(&self) -> &str {
        &self.cells[12]
    }
    pub fn objective(&self) -> &str {
        &self.cells[13]
    }
    pub fn quarter(&self) -> &str {
        &self.cells[14]
    }
}

/// Workflow status of a task. Only `Cancelled` changes how a task is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Active,
    Completed,
    Cancelled,
    Other(String),
}

impl TaskStatus {
    /// Map a status cell to a status. Unknown text is preserved verbatim.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "cancelled" | "canceled" | "cancelada" | "cancelado" => TaskStatus::Cancelled,
            "done" | "completed" | "complete" | "finished" | "completada" | "terminada" => {
                TaskStatus::Completed
            }
            "active" | "in progress" | "in-progress" | "activa" | "en curso" => TaskStatus::Active,
            _ => TaskStatus::Other(trimmed.to_string()),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TaskStatus::Cancelled)
    }
}

/// A date interval drawn as one bar. `end` may precede `start` when the source data does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A visible task after cleaning and derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub project: String,
    pub task: String,
    pub description: String,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
    /// The planned-days cell as entered; the derived value is `planned_duration`.
    pub planned_days: Option<f64>,
    pub weight: Option<f64>,
    pub status: TaskStatus,
    pub actual_start: Option<NaiveDate>,
    /// Back-filled with the invocation date when the task is still in progress.
    pub actual_end: Option<NaiveDate>,
    pub progress: Option<f64>,
    pub project_name: String,
    pub objective: String,
    pub quarter: String,
    pub planned_duration: Option<i64>,
    pub actual_duration: Option<i64>,
}

impl TaskRecord {
    /// Planned bar, present only when both planned dates parsed.
    pub fn planned_interval(&self) -> Option<Interval> {
        Some(Interval {
            start: self.planned_start?,
            end: self.planned_end?,
        })
    }

    /// Actual bar. Suppressed entirely without an actual start.
    pub fn actual_interval(&self) -> Option<Interval> {
        Some(Interval {
            start: self.actual_start?,
            end: self.actual_end?,
        })
    }

    /// Label used for the project group this task belongs to.
    pub fn group_label(&self) -> String {
        let name = self.project_name.trim();
        if name.is_empty() {
            self.project.clone()
        } else {
            format!("{} ({})", name, self.project)
        }
    }
}
