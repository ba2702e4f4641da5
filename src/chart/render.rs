//! Translates a [`ChartLayout`] into a [`ChartScene`].

use chrono::Duration;
use egui::Align2;

use crate::chart::layout::{ChartLayout, AXIS_FLOOR};
use crate::chart::scene::{
    layer, ChartScene, LegendEntry, LineStroke, LineStyle, Mark, Shape, TimeAxis, YTick,
};
use crate::config::ChartSettings;
use crate::model::DateSpan;

pub const LEGEND_PLANNED: &str = "Planned";
pub const LEGEND_ACTUAL: &str = "Actual";
pub const TODAY_LABEL: &str = " Today";

/// Fraction of the date extent added on each side of the time axis.
const X_MARGIN: f64 = 0.05;
/// Half-width of the time axis when no task has a date.
const EMPTY_HALF_SPAN_DAYS: i64 = 15;

fn view_range(layout: &ChartLayout) -> DateSpan {
    match layout.date_span {
        Some(span) => span.padded(X_MARGIN),
        None => DateSpan::new(
            layout.label_x - Duration::days(EMPTY_HALF_SPAN_DAYS),
            layout.label_x + Duration::days(EMPTY_HALF_SPAN_DAYS),
        ),
    }
}

fn time_axis(range: DateSpan) -> TimeAxis {
    TimeAxis {
        major: range
            .month_days(1)
            .into_iter()
            .map(|d| (d, d.format("%b-%y").to_string()))
            .collect(),
        minor: range.month_days(15),
    }
}

pub fn render(layout: &ChartLayout, settings: &ChartSettings) -> ChartScene {
    let colors = &settings.colors;
    let bar_height = settings.sizing.bar_height;
    let x_range = view_range(layout);
    let x_axis = time_axis(x_range);
    let y_range = (AXIS_FLOOR, layout.extent);
    let mut marks = Vec::new();

    let major_grid = LineStroke::new(0.5, colors.grid, LineStyle::Solid);
    let minor_grid = LineStroke::new(0.5, colors.grid, LineStyle::Dotted);
    let row_grid = LineStroke::new(0.5, colors.row_grid, LineStyle::Dashed);
    let grid_line = |x, stroke| Mark {
        layer: layer::GRID,
        shape: Shape::VLine {
            x,
            y_from: y_range.0,
            y_to: y_range.1,
            stroke,
        },
    };
    marks.extend(x_axis.major.iter().map(|(x, _)| grid_line(*x, major_grid)));
    marks.extend(x_axis.minor.iter().map(|x| grid_line(*x, minor_grid)));
    marks.extend(layout.rows.iter().map(|row| Mark {
        layer: layer::GRID,
        shape: Shape::HLine {
            y: row.y,
            stroke: row_grid,
        },
    }));

    for row in &layout.rows {
        if let Some(span) = row.planned {
            let fill = if row.cancelled {
                colors.cancelled
            } else {
                colors.planned
            };
            marks.push(Mark {
                layer: layer::PLANNED,
                shape: Shape::Bar {
                    y: row.y,
                    span,
                    height: bar_height,
                    fill,
                },
            });
        }
        if let Some(span) = row.actual {
            marks.push(Mark {
                layer: layer::ACTUAL,
                shape: Shape::Bar {
                    y: row.y,
                    span,
                    height: bar_height,
                    fill: colors.actual,
                },
            });
        }
    }

    for boundary in &layout.boundaries {
        marks.push(Mark {
            layer: layer::SEPARATOR,
            shape: Shape::HLine {
                y: boundary.y,
                stroke: LineStroke::new(1.0, colors.separator, LineStyle::Solid),
            },
        });
        if let Some(label) = &boundary.label {
            marks.push(Mark {
                layer: layer::LABEL,
                shape: Shape::Text {
                    x: layout.label_x,
                    y: boundary.y,
                    text: label.text.clone(),
                    anchor: Align2::CENTER_CENTER,
                    color: colors.group_label_text,
                    background: Some(colors.group_label_bg),
                    strong: true,
                },
            });
        }
    }

    if let Some(today) = layout.today_marker {
        marks.push(Mark {
            layer: layer::TODAY,
            shape: Shape::VLine {
                x: today,
                y_from: y_range.0,
                y_to: y_range.1,
                stroke: LineStroke::new(1.5, colors.today_line, LineStyle::Dashed),
            },
        });
        marks.push(Mark {
            layer: layer::TODAY,
            shape: Shape::Text {
                x: today,
                y: y_range.1,
                text: TODAY_LABEL.to_string(),
                anchor: Align2::LEFT_BOTTOM,
                color: colors.today_line,
                background: None,
                strong: true,
            },
        });
    }

    ChartScene {
        marks,
        y_ticks: layout
            .rows
            .iter()
            .map(|row| YTick {
                y: row.y,
                label: row.label.clone(),
            })
            .collect(),
        y_range,
        x_range,
        x_axis,
        legend: vec![
            LegendEntry {
                label: LEGEND_PLANNED.to_string(),
                color: colors.planned,
            },
            LegendEntry {
                label: LEGEND_ACTUAL.to_string(),
                color: colors.actual,
            },
        ],
        background: colors.background,
        text_color: colors.text,
        task_count: layout.rows.len(),
        project_count: layout
            .boundaries
            .iter()
            .filter(|b| b.label.is_some())
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout::{layout, order_tasks};
    use crate::chart::normalize::normalize;
    use crate::chart::test_helpers::{d, planned, row, today, with_status};
    use crate::model::Interval;
    use egui::Color32;
    use pretty_assertions::assert_eq;

    fn scene_for(rows: Vec<crate::model::TaskRow>) -> ChartScene {
        let records = normalize(&rows, today()).unwrap();
        render(&layout(&order_tasks(records), today()), &ChartSettings::default())
    }

    fn bars(scene: &ChartScene) -> Vec<(u8, f64, Interval, Color32)> {
        scene
            .marks
            .iter()
            .filter_map(|m| match &m.shape {
                Shape::Bar { y, span, fill, .. } => Some((m.layer, *y, *span, *fill)),
                _ => None,
            })
            .collect()
    }

    fn texts(scene: &ChartScene) -> Vec<&str> {
        scene
            .marks
            .iter()
            .filter_map(|m| match &m.shape {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn planned_and_actual_bars_use_their_colors() {
        let colors = ChartSettings::default().colors;
        let scene = scene_for(vec![
            row("A", "live", ("2024-01-01", "2024-01-10"), ("2024-01-02", "2024-01-12"), "1"),
            with_status(
                row("A", "dropped", ("2024-01-03", "2024-01-05"), ("", ""), "1"),
                "Cancelled",
            ),
        ]);
        let bars = bars(&scene);
        assert_eq!(bars.len(), 3);

        let dropped: Vec<_> = bars.iter().filter(|b| b.2.start == d(2024, 1, 3)).collect();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].3, colors.cancelled);
        assert_eq!(dropped[0].0, layer::PLANNED);

        let actual: Vec<_> = bars.iter().filter(|b| b.3 == colors.actual).collect();
        assert_eq!(actual.len(), 1);
        assert_eq!(actual[0].0, layer::ACTUAL);
        assert_eq!((actual[0].2.end - actual[0].2.start).num_days(), 10);
        assert!(colors.actual.a() < 255);
    }

    #[test]
    fn no_actual_start_means_no_actual_bar() {
        let scene = scene_for(vec![row(
            "A",
            "t",
            ("2024-01-01", "2024-01-10"),
            ("", "2024-01-09"),
            "1",
        )]);
        let bars = bars(&scene);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].0, layer::PLANNED);
    }

    #[test]
    fn axes_follow_layout() {
        let scene = scene_for(vec![
            row("A", "a1", ("2024-01-01", "2024-01-10"), ("", ""), "1"),
            row("A", "a2", ("2024-01-05", "2024-01-15"), ("", ""), "1"),
            row("B", "b1", ("2024-02-01", "2024-02-20"), ("", ""), "1"),
        ]);
        assert_eq!(scene.y_range.0, -1.0);
        assert!((scene.y_range.1 - 6.7).abs() < 1e-9);

        let ticks: Vec<&str> = scene.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(ticks, vec!["b1", "a2", "a1"]);

        // Jan 1 .. Feb 20 padded by 3 days on each side.
        assert_eq!(scene.x_range, DateSpan::new(d(2023, 12, 29), d(2024, 2, 23)));
        let majors: Vec<&str> = scene.x_axis.major.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(majors, vec!["Jan-24", "Feb-24"]);
        assert_eq!(scene.x_axis.minor, vec![d(2024, 1, 15), d(2024, 2, 15)]);

        assert_eq!(scene.task_count, 3);
        assert_eq!(scene.project_count, 2);
    }

    #[test]
    fn grid_lines_by_kind() {
        let scene = scene_for(vec![
            row("A", "a1", ("2024-01-01", "2024-01-10"), ("", ""), "1"),
            row("B", "b1", ("2024-02-01", "2024-02-20"), ("", ""), "1"),
        ]);
        let styles: Vec<LineStyle> = scene
            .marks
            .iter()
            .filter(|m| m.layer == layer::GRID)
            .map(|m| match &m.shape {
                Shape::HLine { stroke, .. } | Shape::VLine { stroke, .. } => stroke.style,
                other => panic!("unexpected grid mark {other:?}"),
            })
            .collect();
        let count = |s: LineStyle| styles.iter().filter(|x| **x == s).count();
        assert_eq!(count(LineStyle::Solid), 2);
        assert_eq!(count(LineStyle::Dotted), 2);
        assert_eq!(count(LineStyle::Dashed), 2);
    }

    #[test]
    fn separators_and_group_labels() {
        let scene = scene_for(vec![
            row("A", "a1", ("2024-01-01", "2024-01-10"), ("", ""), "1"),
            row("B", "b1", ("2024-02-01", "2024-02-20"), ("", ""), "1"),
        ]);
        let separators = scene
            .marks
            .iter()
            .filter(|m| m.layer == layer::SEPARATOR)
            .count();
        assert_eq!(separators, 3);
        assert_eq!(texts(&scene), vec!["Name (B)", "Name (A)"]);

        let label_x: Vec<_> = scene
            .marks
            .iter()
            .filter_map(|m| match &m.shape {
                Shape::Text { x, background, .. } => Some((*x, background.is_some())),
                _ => None,
            })
            .collect();
        assert!(label_x.iter().all(|(x, bg)| *x == d(2024, 1, 26) && *bg));
    }

    #[test]
    fn today_marker_is_topmost_layer() {
        let scene = scene_for(vec![row(
            "A",
            "t",
            ("2024-02-01", "2024-04-01"),
            ("2024-02-05", ""),
            "1",
        )]);
        assert!(texts(&scene).contains(&TODAY_LABEL));
        let order = scene.marks_in_paint_order();
        let last = order.last().unwrap();
        assert_eq!(last.layer, layer::TODAY);
        let marker = order
            .iter()
            .find_map(|m| match &m.shape {
                Shape::VLine { x, y_to, .. } if m.layer == layer::TODAY => Some((*x, *y_to)),
                _ => None,
            })
            .unwrap();
        assert_eq!(marker.0, today());
        assert_eq!(marker.1, scene.y_range.1);
    }

    #[test]
    fn no_today_marker_outside_range() {
        let scene = scene_for(vec![row(
            "A",
            "t",
            ("2024-01-01", "2024-01-10"),
            ("", ""),
            "1",
        )]);
        assert!(!texts(&scene).contains(&TODAY_LABEL));
    }

    #[test]
    fn undated_table_centers_axis_on_today() {
        let records = vec![planned("A", "t", "", "")];
        let scene = render(&layout(&records, today()), &ChartSettings::default());
        assert_eq!(
            scene.x_range,
            DateSpan::new(d(2024, 2, 15), d(2024, 3, 16))
        );
        assert!(bars(&scene).is_empty());
        assert_eq!(scene.y_ticks.len(), 1);
    }

    #[test]
    fn legend_has_two_entries() {
        let scene = scene_for(vec![row("A", "t", ("2024-01-01", "2024-01-10"), ("", ""), "1")]);
        let labels: Vec<&str> = scene.legend.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Planned", "Actual"]);
    }
}
