use std::f32::consts::FRAC_PI_4;

use chrono::NaiveDate;
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::chart::scene::{ChartScene, LineStroke, LineStyle, Shape};
use crate::config::ChartSizing;
use crate::model::TimelineViewport;
use crate::ui::theme;

/// Maps chart coordinates (dates, upward units) onto screen pixels.
struct PlotTransform {
    rect: Rect,
    viewport: TimelineViewport,
    y_top: f64,
    pixels_per_unit: f32,
}

impl PlotTransform {
    fn x(&self, date: NaiveDate) -> f32 {
        self.rect.left() + self.viewport.date_to_x(date)
    }

    fn y(&self, value: f64) -> f32 {
        self.rect.top() + (self.y_top - value) as f32 * self.pixels_per_unit
    }

    fn pos(&self, date: NaiveDate, value: f64) -> Pos2 {
        Pos2::new(self.x(date), self.y(value))
    }
}

/// Render the chart area (central panel).
pub fn show_gantt_chart(scene: &ChartScene, sizing: &ChartSizing, ui: &mut Ui) {
    let label_font = theme::font_label(sizing.label_font_size);
    let tick_font = theme::font_label(sizing.tick_font_size);

    let gutter = ui.fonts(|fonts| {
        scene
            .y_ticks
            .iter()
            .map(|t| {
                fonts
                    .layout_no_wrap(t.label.clone(), label_font.clone(), scene.text_color)
                    .size()
                    .x
            })
            .fold(0.0_f32, f32::max)
    }) + theme::GUTTER_PADDING * 2.0;

    let viewport = TimelineViewport::new(scene.x_range, sizing.pixels_per_day);
    let (y_bottom, y_top) = scene.y_range;
    let plot_size = Vec2::new(
        viewport.total_width(),
        (y_top - y_bottom) as f32 * sizing.pixels_per_unit,
    );
    let canvas = Vec2::new(
        gutter + plot_size.x + theme::GUTTER_PADDING,
        theme::HEADER_HEIGHT + plot_size.y + theme::FOOTER_HEIGHT,
    );

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let available = ui.available_size();
            let (response, painter) = ui.allocate_painter(canvas.max(available), Sense::hover());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, scene.background);

            let plot = PlotTransform {
                rect: Rect::from_min_size(
                    Pos2::new(origin.x + gutter, origin.y + theme::HEADER_HEIGHT),
                    plot_size,
                ),
                viewport,
                y_top,
                pixels_per_unit: sizing.pixels_per_unit,
            };

            draw_legend(&painter, scene, &label_font, origin, response.rect.width());
            draw_marks(&painter, scene, &plot, &label_font);
            draw_y_labels(&painter, scene, &plot, &label_font);
            draw_x_labels(&painter, scene, &plot, &tick_font);

            painter.rect_stroke(
                plot.rect,
                0.0,
                Stroke::new(1.0, scene.text_color.gamma_multiply(0.5)),
            );
        });
}

/// Placeholder shown when there is no chart to paint.
pub fn show_empty_state(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(egui::RichText::new(message).color(theme::TEXT_DIM).size(14.0));
    });
}

fn draw_marks(painter: &Painter, scene: &ChartScene, plot: &PlotTransform, font: &FontId) {
    let clipped = painter.with_clip_rect(plot.rect);

    for mark in scene.marks_in_paint_order() {
        match &mark.shape {
            Shape::Bar {
                y,
                span,
                height,
                fill,
            } => {
                let rect = Rect::from_two_pos(
                    plot.pos(span.start, y + height / 2.0),
                    plot.pos(span.end, y - height / 2.0),
                );
                clipped.rect_filled(rect, Rounding::same(2.0), *fill);
            }
            Shape::HLine { y, stroke } => {
                let y = plot.y(*y);
                draw_line(
                    &clipped,
                    [
                        Pos2::new(plot.rect.left(), y),
                        Pos2::new(plot.rect.right(), y),
                    ],
                    stroke,
                );
            }
            Shape::VLine {
                x,
                y_from,
                y_to,
                stroke,
            } => {
                draw_line(
                    &clipped,
                    [plot.pos(*x, *y_from), plot.pos(*x, *y_to)],
                    stroke,
                );
            }
            Shape::Text {
                x,
                y,
                text,
                anchor,
                color,
                background,
                strong,
            } => {
                let font = if *strong {
                    FontId::proportional(font.size + 1.0)
                } else {
                    font.clone()
                };
                let galley = painter.layout_no_wrap(text.clone(), font, *color);
                let rect = anchor.anchor_size(plot.pos(*x, *y), galley.size());
                if let Some(bg) = background {
                    painter.rect_filled(rect.expand2(Vec2::new(6.0, 2.0)), Rounding::same(3.0), *bg);
                }
                painter.galley(rect.min, galley, *color);
            }
        }
    }
}

fn draw_line(painter: &Painter, points: [Pos2; 2], stroke: &LineStroke) {
    match stroke.style {
        LineStyle::Solid => {
            painter.line_segment(points, Stroke::new(stroke.width, stroke.color));
        }
        LineStyle::Dashed => {
            painter.extend(egui::Shape::dashed_line(
                &points,
                Stroke::new(stroke.width, stroke.color),
                6.0,
                4.0,
            ));
        }
        LineStyle::Dotted => {
            painter.extend(egui::Shape::dotted_line(
                &points,
                stroke.color,
                4.0,
                stroke.width,
            ));
        }
    }
}

fn draw_y_labels(painter: &Painter, scene: &ChartScene, plot: &PlotTransform, font: &FontId) {
    for tick in &scene.y_ticks {
        painter.text(
            Pos2::new(plot.rect.left() - theme::GUTTER_PADDING, plot.y(tick.y)),
            Align2::RIGHT_CENTER,
            &tick.label,
            font.clone(),
            scene.text_color,
        );
    }
}

/// Month labels under the plot, rotated so their end touches the tick.
fn draw_x_labels(painter: &Painter, scene: &ChartScene, plot: &PlotTransform, font: &FontId) {
    let bottom = plot.rect.bottom();
    let tick_stroke = Stroke::new(1.0, scene.text_color);

    for (date, label) in &scene.x_axis.major {
        let x = plot.x(*date);
        painter.line_segment([Pos2::new(x, bottom), Pos2::new(x, bottom + 5.0)], tick_stroke);

        let galley = painter.layout_no_wrap(label.clone(), font.clone(), scene.text_color);
        let w = galley.size().x;
        let (sin, cos) = FRAC_PI_4.sin_cos();
        let start = Pos2::new(x - w * cos, bottom + 6.0 + w * sin);
        painter.add(TextShape::new(start, galley, scene.text_color).with_angle(-FRAC_PI_4));
    }
    for date in &scene.x_axis.minor {
        let x = plot.x(*date);
        painter.line_segment(
            [Pos2::new(x, bottom), Pos2::new(x, bottom + 3.0)],
            Stroke::new(0.5, scene.text_color),
        );
    }
}

fn draw_legend(painter: &Painter, scene: &ChartScene, font: &FontId, origin: Pos2, width: f32) {
    let entries: Vec<_> = scene
        .legend
        .iter()
        .map(|entry| {
            let galley = painter.layout_no_wrap(entry.label.clone(), font.clone(), scene.text_color);
            (entry.color, galley)
        })
        .collect();

    let spacing = 18.0;
    let entry_width = |g: &std::sync::Arc<egui::Galley>| theme::LEGEND_SWATCH + 6.0 + g.size().x;
    let total: f32 = entries.iter().map(|(_, g)| entry_width(g)).sum::<f32>()
        + spacing * entries.len().saturating_sub(1) as f32;

    let center_y = origin.y + theme::HEADER_HEIGHT / 2.0;
    let mut x = origin.x + (width - total) / 2.0;
    for (color, galley) in entries {
        let advance = entry_width(&galley) + spacing;
        let swatch = Rect::from_center_size(
            Pos2::new(x + theme::LEGEND_SWATCH / 2.0, center_y),
            Vec2::splat(theme::LEGEND_SWATCH),
        );
        painter.rect_filled(swatch, Rounding::same(2.0), color);
        let text_pos = Pos2::new(swatch.right() + 6.0, center_y - galley.size().y / 2.0);
        painter.galley(text_pos, galley, Color32::TRANSPARENT);
        x += advance;
    }
}
