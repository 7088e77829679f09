//! Run summary

use std::path::PathBuf;

/// Outcome of a run, used only for console output
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Paths written, in processing order
    pub generated: Vec<PathBuf>,
    /// Paths a dry run would have written
    pub planned: Vec<PathBuf>,
    /// Number of source files discovered
    pub source_count: usize,
    /// Number of unique offsets applied to each source
    pub offset_count: usize,
    pub dry_run: bool,
}

impl RunReport {
    pub fn expected(&self) -> usize {
        self.source_count * self.offset_count
    }

    /// Final console line
    pub fn summary_line(&self) -> String {
        if self.dry_run {
            format!("Would create {} files.", self.planned.len())
        } else {
            format!(
                "Created {} files (expected {}).",
                self.generated.len(),
                self.expected()
            )
        }
    }
}
