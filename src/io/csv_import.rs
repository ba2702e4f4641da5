use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{GanttError, Result};
use crate::model::TaskRow;

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Read a task table from any text source.
///
/// The first record is the header. Its text is ignored because columns are
/// identified by position, but it must have the same arity as every other record.
/// Cells that are not valid UTF-8 are decoded lossily instead of failing the load.
pub fn read_table<R: Read>(mut source: R) -> Result<Vec<TaskRow>> {
    let mut content = Vec::new();
    source
        .read_to_end(&mut content)
        .map_err(csv::Error::from)?;

    let first_line = content.split(|&b| b == b'\n').next().unwrap_or_default();
    let delimiter = detect_delimiter(&String::from_utf8_lossy(first_line));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_slice());

    let mut rows = Vec::new();
    let mut header_seen = false;
    for result in reader.byte_records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() == 1 && record[0].is_empty() {
            debug!(line, "skipping blank line");
            continue;
        }
        let cells = record.iter().map(|cell| String::from_utf8_lossy(cell).into_owned());
        let row = TaskRow::from_cells(cells, line)?;
        if header_seen {
            rows.push(row);
        } else {
            header_seen = true;
        }
    }

    let shown = (delimiter as char).escape_default().to_string();
    debug!(rows = rows.len(), delimiter = %shown, "read task table");
    Ok(rows)
}

/// Import a task table from a delimited text file (comma, semicolon or tab).
pub fn import_table(path: &Path) -> Result<Vec<TaskRow>> {
    let file = std::fs::File::open(path).map_err(|source| GanttError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_table(file)?;
    info!(path = %path.display(), rows = rows.len(), "imported task table");
    Ok(rows)
}
