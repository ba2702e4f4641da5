use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::chart::{build_chart, ChartScene};
use crate::config::{ChartSettings, ThemeVariant};
use crate::error::Result;
use crate::model::TaskRow;
use crate::ui;

/// Start-up choices taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub table: Option<PathBuf>,
    pub as_of: Option<NaiveDate>,
}

/// What the central panel currently shows.
pub enum ChartState {
    NoTable,
    /// A table was loaded but no row is visible.
    NothingToRender,
    Ready(ChartScene),
}

/// Main application state.
pub struct GanttApp {
    pub settings: ChartSettings,
    settings_path: PathBuf,

    pub table_path: Option<PathBuf>,
    rows: Vec<TaskRow>,
    pub chart: ChartState,

    /// Reference date for open-ended actual bars and the "Today" marker.
    pub as_of: NaiveDate,

    // Dialog state
    pub show_about: bool,
    pub show_format_help: bool,

    // Status message
    pub status_message: String,
    pub status_is_error: bool,
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>, options: StartupOptions) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings_path = ChartSettings::default_path();
        let settings = ChartSettings::load_or_default(&settings_path);
        ui::theme::apply_theme(&cc.egui_ctx, settings.variant);

        let mut app = Self {
            settings,
            settings_path,
            table_path: None,
            rows: Vec::new(),
            chart: ChartState::NoTable,
            as_of: options.as_of.unwrap_or_else(local_today),
            show_about: false,
            show_format_help: false,
            status_message: "Open a task table to begin".to_string(),
            status_is_error: false,
        };

        let initial = options
            .table
            .or_else(|| app.settings.last_table.clone().filter(|p| p.exists()));
        if let Some(path) = initial {
            app.load_and_report(&path);
        }
        app
    }

    // --- Table operations ---

    pub fn open_table(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Task tables", &["csv", "tsv", "txt"])
            .pick_file()
        {
            self.load_and_report(&path);
        }
    }

    pub fn reload(&mut self) {
        if let Some(path) = self.table_path.clone() {
            self.load_and_report(&path);
        }
    }

    fn load_and_report(&mut self, path: &Path) {
        match self.load_table(path) {
            Ok(()) => {
                self.settings.last_table = Some(path.to_path_buf());
                self.persist_settings();
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load table");
                self.status_message = format!("Load failed: {}", e);
                self.status_is_error = true;
            }
        }
    }

    /// Read and validate a table, then rebuild the chart. On failure the
    /// current chart stays as it was.
    pub fn load_table(&mut self, path: &Path) -> Result<()> {
        let rows = crate::io::import_table(path)?;
        self.rows = rows;
        self.table_path = Some(path.to_path_buf());
        self.rebuild();
        Ok(())
    }

    /// Run the pipeline over the loaded rows as of the current reference date.
    pub fn rebuild(&mut self) {
        if self.table_path.is_none() {
            self.chart = ChartState::NoTable;
            return;
        }
        self.status_is_error = false;
        self.chart = match build_chart(&self.rows, self.as_of, &self.settings) {
            Some(scene) => {
                self.status_message = format!(
                    "{} tasks in {} projects",
                    scene.task_count, scene.project_count
                );
                ChartState::Ready(scene)
            }
            None => {
                info!("no visible tasks in table");
                self.status_message = "No visible tasks".to_string();
                ChartState::NothingToRender
            }
        };
    }

    // --- Reference date ---

    pub fn set_as_of(&mut self, date: NaiveDate) {
        self.as_of = date;
        self.rebuild();
    }

    pub fn reset_as_of(&mut self) {
        self.set_as_of(local_today());
    }

    pub fn as_of_is_today(&self) -> bool {
        self.as_of == local_today()
    }

    // --- Settings ---

    pub fn set_variant(&mut self, variant: ThemeVariant, ctx: &egui::Context) {
        if variant == self.settings.variant {
            return;
        }
        self.settings.set_variant(variant);
        ui::theme::apply_theme(ctx, variant);
        self.persist_settings();
        self.rebuild();
    }

    pub fn open_settings_folder(&mut self) {
        let dir = ChartSettings::config_dir();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
            warn!(dir = %dir.display(), error = %e, "could not open settings folder");
            self.status_message = format!("Could not open {}: {}", dir.display(), e);
            self.status_is_error = true;
        }
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            warn!(error = %e, "could not save settings");
        }
    }

    fn show_status_bar(&self, ui: &mut egui::Ui) {
        let colors = ui::theme::status_colors(self.settings.variant, ui.visuals());
        ui.horizontal_centered(|ui| {
            let color = if self.status_is_error {
                ui::theme::ERROR
            } else {
                colors.text
            };
            ui.label(
                egui::RichText::new(&self.status_message)
                    .font(ui::theme::font_status())
                    .color(color),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("As of {}", self.as_of.format("%Y-%m-%d")))
                        .font(ui::theme::font_status())
                        .color(colors.dim),
                );
            });
        });
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.reload();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        let status_bg = ui::theme::status_colors(self.settings.variant, &ctx.style().visuals).background;
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(egui::Frame::none().fill(status_bg).inner_margin(egui::Margin::symmetric(8.0, 2.0)))
            .show(ctx, |ui| {
                self.show_status_bar(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| match &self.chart {
                ChartState::NoTable => {
                    ui::gantt_chart::show_empty_state(ui, "No table loaded. Use File → Open Table...")
                }
                ChartState::NothingToRender => {
                    ui::gantt_chart::show_empty_state(ui, "Nothing to render: no visible tasks")
                }
                ChartState::Ready(scene) => {
                    ui::gantt_chart::show_gantt_chart(scene, &self.settings.sizing, ui)
                }
            });

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_format_help {
            ui::dialogs::show_format_help_dialog(self, ctx);
        }
    }
}
