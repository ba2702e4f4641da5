//! Persisted chart settings.
//!
//! Settings live as JSON in the OS config directory. Colours are stored as
//! `#RRGGBB` / `#RRGGBBAA` strings so they can be edited by hand, and every
//! field carries `#[serde(default)]` so a partial file is valid.

use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

// ─── Hex-colour serde helper ────────────────────────────────────────────────

pub mod hex_color {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex(*color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).map_err(serde::de::Error::custom)
    }

    pub fn to_hex(color: Color32) -> String {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }

    pub fn parse_hex_color(s: &str) -> Result<Color32, String> {
        let s = s.trim().trim_start_matches('#');
        let channel = |i: usize| {
            s.get(i..i + 2)
                .ok_or_else(|| format!("Invalid hex color '{}'", s))
                .and_then(|h| u8::from_str_radix(h, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color32::from_rgba_unmultiplied(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => Err(format!(
                "Invalid hex color '{}': expected 6 or 8 hex digits",
                s
            )),
        }
    }
}

// ─── Settings ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartColors {
    #[serde(with = "hex_color")]
    pub background: Color32,
    #[serde(with = "hex_color")]
    pub planned: Color32,
    /// Planned bars of cancelled tasks.
    #[serde(with = "hex_color")]
    pub cancelled: Color32,
    /// Drawn above the planned bar; keep it translucent so overlap shows.
    #[serde(with = "hex_color")]
    pub actual: Color32,
    #[serde(with = "hex_color")]
    pub today_line: Color32,
    #[serde(with = "hex_color")]
    pub separator: Color32,
    #[serde(with = "hex_color")]
    pub group_label_bg: Color32,
    #[serde(with = "hex_color")]
    pub group_label_text: Color32,
    #[serde(with = "hex_color")]
    pub grid: Color32,
    #[serde(with = "hex_color")]
    pub row_grid: Color32,
    #[serde(with = "hex_color")]
    pub text: Color32,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(24, 24, 32),
            planned: Color32::from_rgb(100, 149, 237),  // cornflower blue
            cancelled: Color32::from_rgb(128, 128, 128),
            actual: Color32::from_rgba_unmultiplied(60, 179, 113, 204), // sea green, 80%
            today_line: Color32::from_rgb(240, 75, 75),
            separator: Color32::from_rgb(111, 118, 136),
            group_label_bg: Color32::from_rgb(31, 35, 46),
            group_label_text: Color32::from_rgb(230, 232, 240),
            grid: Color32::from_rgba_unmultiplied(128, 128, 128, 102),
            row_grid: Color32::from_rgba_unmultiplied(128, 128, 128, 77),
            text: Color32::from_rgb(162, 168, 186),
        }
    }
}

impl ChartColors {
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::default(),
            ThemeVariant::Light => Self::light(),
        }
    }

    fn all(&self) -> [Color32; 11] {
        [
            self.background,
            self.planned,
            self.cancelled,
            self.actual,
            self.today_line,
            self.separator,
            self.group_label_bg,
            self.group_label_text,
            self.grid,
            self.row_grid,
            self.text,
        ]
    }

    /// Equal up to the one-step drift a hex round trip can add to translucent colours.
    pub fn same_palette(&self, other: &Self) -> bool {
        self.all().iter().zip(other.all()).all(|(a, b)| {
            a.to_array()
                .iter()
                .zip(b.to_array())
                .all(|(x, y)| x.abs_diff(y) <= 1)
        })
    }

    /// The light counterpart, close to a printed chart.
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            today_line: Color32::from_rgb(0, 0, 0),
            separator: Color32::from_rgb(90, 90, 90),
            group_label_bg: Color32::from_rgb(255, 255, 255),
            group_label_text: Color32::from_rgb(30, 32, 40),
            text: Color32::from_rgb(30, 32, 40),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSizing {
    /// Bar thickness in chart units (a row is one unit).
    pub bar_height: f64,
    pub pixels_per_day: f32,
    /// Pixels per vertical chart unit.
    pub pixels_per_unit: f32,
    pub label_font_size: f32,
    pub tick_font_size: f32,
}

impl Default for ChartSizing {
    fn default() -> Self {
        Self {
            bar_height: 0.6,
            pixels_per_day: 6.0,
            pixels_per_unit: 26.0,
            label_font_size: 11.5,
            tick_font_size: 10.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub variant: ThemeVariant,
    pub colors: ChartColors,
    pub sizing: ChartSizing,
    /// Reopened at start-up when no table is given on the command line.
    pub last_table: Option<PathBuf>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            variant: ThemeVariant::Dark,
            colors: ChartColors::default(),
            sizing: ChartSizing::default(),
            last_table: None,
        }
    }
}

impl ChartSettings {
    /// Directory holding `settings.json`.
    pub fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "DualTrackGantt")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Read settings from `path`. A missing file is `Ok(None)`.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Load settings, falling back to defaults when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(settings)) => {
                info!(path = %path.display(), "loaded settings");
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Switch variant. Colours are swapped for the new variant's defaults only
    /// while they are still the defaults of the current one, so edited palettes survive.
    pub fn set_variant(&mut self, variant: ThemeVariant) {
        if self.colors.same_palette(&ChartColors::for_variant(self.variant)) {
            self.colors = ChartColors::for_variant(variant);
        }
        self.variant = variant;
    }
}

#[cfg(test)]
mod tests {
    use super::hex_color::{parse_hex_color, to_hex};
    use crate::error::GanttError;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_colors_parse_with_and_without_alpha() {
        assert_eq!(parse_hex_color("#6495ED"), Ok(Color32::from_rgb(100, 149, 237)));
        assert_eq!(
            parse_hex_color("3CB371CC"),
            Ok(Color32::from_rgba_unmultiplied(60, 179, 113, 204))
        );
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
        assert_eq!(to_hex(Color32::from_rgb(100, 149, 237)), "#6495ED");
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let json = r##"{ "colors": { "planned": "#FF0000" }, "sizing": { "pixels_per_day": 10.0 } }"##;
        let settings: ChartSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.colors.planned, Color32::from_rgb(255, 0, 0));
        assert_eq!(settings.colors.cancelled, ChartColors::default().cancelled);
        assert_eq!(settings.sizing.pixels_per_day, 10.0);
        assert_eq!(settings.sizing.bar_height, 0.6);
        assert_eq!(settings.variant, ThemeVariant::Dark);
        assert_eq!(settings.last_table, None);
    }

    #[test]
    fn settings_survive_json() {
        let mut settings = ChartSettings::default();
        settings.set_variant(ThemeVariant::Light);
        settings.last_table = Some(PathBuf::from("tasks.csv"));
        let json = serde_json::to_string(&settings).unwrap();
        let back: ChartSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.variant, ThemeVariant::Light);
        assert_eq!(back.colors.background, Color32::from_rgb(255, 255, 255));
        assert_eq!(back.colors.planned, settings.colors.planned);
        assert_eq!(back.sizing, settings.sizing);
        assert_eq!(back.last_table, settings.last_table);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = ChartSettings::load_or_default(Path::new("/nonexistent/dual-gantt/settings.json"));
        assert_eq!(settings, ChartSettings::default());
    }
    #[test]
    fn missing_file_reads_as_none() {
        let read = ChartSettings::read(Path::new("/nonexistent/dual-gantt/settings.json")).unwrap();
        assert_eq!(read, None);
    }

    #[test]
    fn unreadable_file_is_an_error_but_loads_defaults() {
        let dir = std::env::temp_dir();
        assert!(matches!(
            ChartSettings::read(&dir),
            Err(GanttError::SettingsIo(_))
        ));
        assert_eq!(ChartSettings::load_or_default(&dir), ChartSettings::default());
    }

    #[test]
    fn malformed_json_is_a_settings_error() {
        let path = std::env::temp_dir().join(format!("dual-gantt-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let read = ChartSettings::read(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(read, Err(GanttError::Settings(_))));
    }

    #[test]
    fn variant_switch_swaps_default_palettes() {
        let mut settings = ChartSettings::default();
        settings.set_variant(ThemeVariant::Light);
        assert_eq!(settings.colors, ChartColors::light());
        settings.set_variant(ThemeVariant::Dark);
        assert_eq!(settings.colors, ChartColors::default());
    }

    #[test]
    fn reloaded_default_palette_still_switches() {
        let json = serde_json::to_string(&ChartSettings::default()).unwrap();
        let mut settings: ChartSettings = serde_json::from_str(&json).unwrap();
        settings.set_variant(ThemeVariant::Light);
        assert_eq!(settings.colors, ChartColors::light());
    }

    #[test]
    fn variant_switch_keeps_edited_colors() {
        let mut settings = ChartSettings::default();
        settings.colors.planned = Color32::from_rgb(255, 0, 0);
        let edited = settings.colors.clone();
        settings.set_variant(ThemeVariant::Light);
        assert_eq!(settings.variant, ThemeVariant::Light);
        assert_eq!(settings.colors, edited);
    }
}
