//! Spreadsheet reading and writing
//!
//! Input is read from CSV. The enriched sheet, the activity log and the
//! summary are written side by side into the output directory.

use crate::output::{ActivityLogEntry, BatchSummary};
use crate::EnrichError;
use std::io::Read;
use std::path::{Path, PathBuf};

/// File name of the persisted batch summary
pub const SUMMARY_FILE: &str = "summary.json";

/// A table of text cells with one header row
///
/// Every row has exactly as many cells as there are headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Creates a sheet, fitting each row to the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, mut row)| {
                if row.len() > width {
                    tracing::warn!(
                        row = idx + 2,
                        cells = row.len(),
                        width,
                        "Row has more cells than headers, extra cells dropped"
                    );
                }
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Parses CSV text with a header row
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, EnrichError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self::new(headers, rows))
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads an input sheet after checking its type and size
///
/// # Errors
///
/// * [`EnrichError::UnsupportedFile`] - the extension is not `.csv`
/// * [`EnrichError::FileTooLarge`] - the file exceeds `max_bytes`
pub fn read_sheet(path: &Path, max_bytes: u64) -> Result<Sheet, EnrichError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(EnrichError::UnsupportedFile(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(EnrichError::FileTooLarge {
            size,
            limit: max_bytes,
        });
    }

    let file = std::fs::File::open(path)?;
    let sheet = Sheet::from_csv_reader(file)?;
    tracing::debug!(path = %path.display(), rows = sheet.len(), "Input sheet loaded");
    Ok(sheet)
}

/// Writes a sheet as CSV
pub fn write_sheet(path: &Path, sheet: &Sheet) -> Result<(), EnrichError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the activity log as CSV
pub fn write_log(path: &Path, log: &[ActivityLogEntry]) -> Result<(), EnrichError> {
    let mut writer = csv::Writer::from_path(path)?;
    for entry in log {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

/// Paths of the files written for one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub enriched: PathBuf,
    pub log: Option<PathBuf>,
    pub summary: PathBuf,
}

/// Writes the enriched sheet, the log (when non-empty) and the summary
///
/// Files are named after `stem`, the input file name without extension.
/// The summary replaces the one of any previous run.
pub fn write_outputs(
    directory: &Path,
    stem: &str,
    sheet: &Sheet,
    log: &[ActivityLogEntry],
    summary: &BatchSummary,
) -> Result<OutputFiles, EnrichError> {
    std::fs::create_dir_all(directory)?;

    let enriched = directory.join(format!("{}_enriched.csv", stem));
    write_sheet(&enriched, sheet)?;

    let log_path = if log.is_empty() {
        None
    } else {
        let path = directory.join(format!("{}_logs.csv", stem));
        write_log(&path, log)?;
        Some(path)
    };

    let summary_path = directory.join(SUMMARY_FILE);
    std::fs::write(&summary_path, serde_json::to_string_pretty(summary)?)?;

    tracing::info!(
        enriched = %enriched.display(),
        log_entries = log.len(),
        "Outputs written"
    );

    Ok(OutputFiles {
        enriched,
        log: log_path,
        summary: summary_path,
    })
}

/// Loads the summary of the most recent run, if any
pub fn load_summary(directory: &Path) -> Result<Option<BatchSummary>, EnrichError> {
    let path = directory.join(SUMMARY_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
