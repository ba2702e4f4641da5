#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod chart;
mod config;
mod error;
mod io;
mod model;
mod ui;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::GanttError;

/// Planned vs. actual Gantt chart for a project task table.
#[derive(Parser, Debug)]
#[command(name = "dual-gantt", version, about)]
struct Cli {
    /// Task table to open on start-up (defaults to the last one opened)
    table: Option<PathBuf>,

    /// Reference date used for open-ended bars and the "Today" marker
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_as_of)]
    as_of: Option<NaiveDate>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_as_of(s: &str) -> Result<NaiveDate, GanttError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| GanttError::InvalidDate(s.to_string()))
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let startup = app::StartupOptions {
        table: cli.table,
        as_of: cli.as_of,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Dual Gantt"),
        ..Default::default()
    };

    eframe::run_native(
        "Dual Gantt",
        options,
        Box::new(|cc| Ok(Box::new(app::GanttApp::new(cc, startup)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn as_of_accepts_iso_dates() {
        let cli = Cli::try_parse_from(["dual-gantt", "--as-of", "2024-03-01", "plan.csv"]).unwrap();
        assert_eq!(cli.as_of, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(cli.table, Some(PathBuf::from("plan.csv")));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn as_of_rejects_other_formats() {
        assert!(Cli::try_parse_from(["dual-gantt", "--as-of", "01/03/2024"]).is_err());
        assert!(matches!(parse_as_of("soon"), Err(GanttError::InvalidDate(s)) if s == "soon"));
    }

    #[test]
    fn verbosity_counts_flags() {
        let cli = Cli::try_parse_from(["dual-gantt", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.table.is_none());
    }
}
