use crate::app::GanttApp;
use crate::model::task::COLUMNS;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut GanttApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Dual Gantt").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Planned vs. actual schedules");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

const COLUMN_NOTES: [&str; 15] = [
    "Project code; rows are grouped by it",
    "Task name, shown on the vertical axis",
    "Free text, not drawn",
    "Planned start date",
    "Planned end date",
    "Planned days as entered",
    "Weight",
    "Status; \"Cancelled\" greys out the planned bar",
    "Actual start; no value means no actual bar",
    "Actual end; empty while in progress",
    "Progress",
    "Visible: only rows with 1 are drawn",
    "Project display name for group labels",
    "Objective",
    "Year-quarter",
];

/// Render the table format help dialog.
pub fn show_format_help_dialog(app: &mut GanttApp, ctx: &Context) {
    let mut open = app.show_format_help;
    Window::new("Table Format")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new(
                    "A CSV, semicolon or tab separated file with a header row and exactly \
                     15 columns. Columns are read by position; header text is ignored.",
                )
                .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
            egui::Grid::new("format_help_grid")
                .num_columns(3)
                .striped(true)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for (i, (column, note)) in COLUMNS.iter().zip(COLUMN_NOTES).enumerate() {
                        ui.label(RichText::new(format!("{}", i + 1)).weak());
                        ui.monospace(*column);
                        ui.label(note);
                        ui.end_row();
                    }
                });
            ui.add_space(6.0);
            ui.label(
                RichText::new("Dates: YYYY-MM-DD, DD/MM/YYYY and similar. Unreadable dates are treated as empty.")
                    .small()
                    .weak(),
            );
        });
    if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_format_help = false;
    }
}
