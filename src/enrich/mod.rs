//! Enrichment of profile sheets
//!
//! This module ties the pieces together:
//! - Column recognition and the output cells of a row
//! - Per-row identity resolution and platform dispatch
//! - The batch loop folding row outcomes into stats and the activity log
//! - Single-shot analysis of a few URLs

mod analyze;
mod batch;
mod columns;
mod row;

pub use analyze::{AnalysisReport, AnalyzeRequest};
pub use batch::{Enricher, Enrichment};
pub use columns::{normalize_column_name, ColumnMapping, OutputCells, OUTPUT_COLUMNS, ROLL_NO_COLUMN};
pub use row::{resolve_identity, sheet_row_number, Attempt, RowOutcome, RowProcessor};
