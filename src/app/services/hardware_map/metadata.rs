//! Hardware map loading statistics

use std::time::Duration;

/// Statistics about reading a hardware-map file
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Total lines read from the file
    pub lines_read: usize,

    /// Empty or whitespace-only lines skipped
    pub blank_lines: usize,

    /// Comment lines skipped
    pub comment_lines: usize,

    /// Records handed to the indexer
    pub records_loaded: usize,

    /// Records with fewer than nine well-formed fields
    pub short_lines: usize,

    /// Records with tokens after the ninth field
    pub lines_with_trailing_tokens: usize,

    /// Distinct geo-ids after indexing
    pub links_indexed: usize,

    /// DRO units after indexing
    pub dro_units: usize,

    /// Time taken to read and index the file
    pub load_duration: Duration,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Records lost to geo-id collisions
    pub fn duplicate_geo_ids(&self) -> usize {
        self.records_loaded.saturating_sub(self.links_indexed)
    }

    /// Check if any line was tolerated rather than parsed cleanly
    pub fn has_warnings(&self) -> bool {
        self.short_lines > 0 || self.lines_with_trailing_tokens > 0 || self.duplicate_geo_ids() > 0
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Read {} lines, loaded {} records ({} short, {} skipped), indexed {} links into {} DRO units in {:.3}s",
            self.lines_read,
            self.records_loaded,
            self.short_lines,
            self.blank_lines + self.comment_lines,
            self.links_indexed,
            self.dro_units,
            self.load_duration.as_secs_f64()
        )
    }
}
