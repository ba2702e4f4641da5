use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::config::ThemeVariant;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_STATUS: Color32 = Color32::from_rgb(26, 26, 36);
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const ERROR: Color32 = Color32::from_rgb(240, 75, 75);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 40.0;
pub const FOOTER_HEIGHT: f32 = 56.0;
pub const GUTTER_PADDING: f32 = 12.0;
pub const LEGEND_SWATCH: f32 = 12.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_label(size: f32) -> FontId {
    FontId::proportional(size)
}

pub fn font_menu() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

// ── Status bar ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusColors {
    pub background: Color32,
    pub text: Color32,
    pub dim: Color32,
}

/// Status bar colours for a variant. Light mode follows the active visuals.
pub fn status_colors(variant: ThemeVariant, visuals: &Visuals) -> StatusColors {
    match variant {
        ThemeVariant::Dark => StatusColors {
            background: BG_STATUS,
            text: TEXT_SECONDARY,
            dim: TEXT_DIM,
        },
        ThemeVariant::Light => StatusColors {
            background: visuals.faint_bg_color,
            text: visuals.text_color(),
            dim: visuals.weak_text_color(),
        },
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context, variant: ThemeVariant) {
    let mut visuals = match variant {
        ThemeVariant::Dark => dark_visuals(),
        ThemeVariant::Light => Visuals::light(),
    };
    visuals.window_rounding = Rounding::same(8.0);
    visuals.striped = false;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = Color32::from_rgb(20, 20, 28);

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = Color32::from_rgba_premultiplied(80, 140, 220, 45);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals
}
