use crate::app::GanttApp;
use crate::config::ThemeVariant;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open Table...", icons::FOLDER_OPEN)).clicked() {
                app.open_table();
                ui.close_menu();
            }
            let can_reload = app.table_path.is_some();
            if ui
                .add_enabled(
                    can_reload,
                    egui::Button::new(format!("{}  Reload          F5", icons::ARROW_CLOCKWISE)),
                )
                .clicked()
            {
                app.reload();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Open Settings Folder", icons::GEAR)).clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Theme").small().weak());
            let mut variant = app.settings.variant;
            let dark = ui.radio_value(&mut variant, ThemeVariant::Dark, "Dark").clicked();
            let light = ui.radio_value(&mut variant, ThemeVariant::Light, "Light").clicked();
            if dark || light {
                app.set_variant(variant, ui.ctx());
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Table Format", icons::TABLE)).clicked() {
                app.show_format_help = true;
                ui.close_menu();
            }
            if ui.button(format!("{}  About", icons::INFO)).clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned "as of" date and table name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!app.as_of_is_today(), egui::Button::new("Today"))
                .on_hover_text("Reset the reference date to today")
                .clicked()
            {
                app.reset_as_of();
            }
            let mut as_of = app.as_of;
            let picked = ui
                .add(egui_extras::DatePickerButton::new(&mut as_of).id_salt("as_of_picker"))
                .changed();
            if picked {
                app.set_as_of(as_of);
            }
            ui.label(RichText::new(format!("{} As of", icons::CALENDAR)).size(11.0).weak());

            ui.separator();
            let name = app
                .table_path
                .as_ref()
                .and_then(|p| p.file_name())
                .and_then(|s| s.to_str())
                .unwrap_or("No table loaded");
            ui.label(RichText::new(name).size(11.0).weak());
        });
    });
}
