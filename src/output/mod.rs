//! Output module for batch results
//!
//! This module handles:
//! - Per-platform counters and the batch summary
//! - The activity log of every scrape attempt
//! - Reading input sheets and writing enriched sheets, logs and summaries

mod log;
mod sheet;
pub mod stats;

pub use log::{ActivityLogEntry, LogStatus};
pub use sheet::{
    load_summary, read_sheet, write_log, write_outputs, write_sheet, OutputFiles, Sheet,
    SUMMARY_FILE,
};
pub use stats::{print_summary, BatchSummary, PlatformStats, PlatformSummary, SampleError};
