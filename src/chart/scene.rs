//! The renderable chart: a flat list of marks in chart coordinates plus axis
//! configuration. Painting it needs no further decisions.

use chrono::NaiveDate;
use egui::{Align2, Color32};

use crate::model::{DateSpan, Interval};

/// Paint order. Higher layers are drawn later.
pub mod layer {
    pub const GRID: u8 = 0;
    pub const SEPARATOR: u8 = 1;
    pub const PLANNED: u8 = 2;
    pub const ACTUAL: u8 = 3;
    pub const LABEL: u8 = 4;
    pub const TODAY: u8 = 10;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStroke {
    pub width: f32,
    pub color: Color32,
    pub style: LineStyle,
}

impl LineStroke {
    pub fn new(width: f32, color: Color32, style: LineStyle) -> Self {
        Self {
            width,
            color,
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A horizontal bar centered on `y`.
    Bar {
        y: f64,
        span: Interval,
        height: f64,
        fill: Color32,
    },
    /// A line across the full horizontal range.
    HLine { y: f64, stroke: LineStroke },
    /// A line at one date between `y_from` and `y_to`.
    VLine {
        x: NaiveDate,
        y_from: f64,
        y_to: f64,
        stroke: LineStroke,
    },
    Text {
        x: NaiveDate,
        y: f64,
        text: String,
        anchor: Align2,
        color: Color32,
        background: Option<Color32>,
        strong: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub layer: u8,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YTick {
    pub y: f64,
    pub label: String,
}

/// Month ticks: labelled majors on the 1st, unlabelled minors on the 15th.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub major: Vec<(NaiveDate, String)>,
    pub minor: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub marks: Vec<Mark>,
    pub y_ticks: Vec<YTick>,
    pub y_range: (f64, f64),
    pub x_range: DateSpan,
    pub x_axis: TimeAxis,
    pub legend: Vec<LegendEntry>,
    pub background: Color32,
    pub text_color: Color32,
    pub task_count: usize,
    pub project_count: usize,
}

impl ChartScene {
    /// Marks sorted by layer, keeping emission order within a layer.
    pub fn marks_in_paint_order(&self) -> Vec<&Mark> {
        let mut marks: Vec<&Mark> = self.marks.iter().collect();
        marks.sort_by_key(|m| m.layer);
        marks
    }
}
