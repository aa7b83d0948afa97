//! Human-readable import summary and per-file warnings

use crate::source::ImportMode;
use crate::stats::ImportStats;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::path::PathBuf;
use stockpile_core::{AssetCategory, StockpileError};

/// Message shown when a batch imported nothing
pub const NOTHING_IMPORTED: &str = "No importable assets found";

/// One line of the summary
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReportEntry {
    pub category: AssetCategory,
    pub label: &'static str,
    pub count: usize,
}

/// Aggregated summary of one import run
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ImportReport {
    pub mode: ImportMode,
    /// Non-zero categories in display order
    pub entries: Vec<ReportEntry>,
}

impl ImportReport {
    pub fn from_stats(mode: ImportMode, stats: &ImportStats) -> Self {
        let entries = stats
            .non_zero()
            .map(|(category, count)| ReportEntry {
                category,
                label: category.label(),
                count,
            })
            .collect();
        Self { mode, entries }
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// True when nothing was imported
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(NOTHING_IMPORTED);
        }
        write!(f, "Import complete ({} mode):", self.mode)?;
        for entry in &self.entries {
            write!(f, "\n• {}: {}", entry.label, entry.count)?;
        }
        Ok(())
    }
}

/// An archive that was skipped, with the reason
#[derive(Debug)]
pub struct FileWarning {
    pub file_name: String,
    pub path: PathBuf,
    pub error: StockpileError,
}

impl fmt::Display for FileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load {}: {}", self.file_name, self.error)
    }
}

impl Serialize for FileWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FileWarning", 4)?;
        s.serialize_field("file", &self.file_name)?;
        s.serialize_field("path", &self.path)?;
        s.serialize_field("kind", self.error.kind())?;
        s.serialize_field("message", &self.error.to_string())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lists_non_zero_categories() {
        let mut stats = ImportStats::new();
        stats.add(AssetCategory::Materials, 2);
        stats.add(AssetCategory::Meshes, 3);

        let report = ImportReport::from_stats(ImportMode::Directory, &stats);
        assert_eq!(report.total(), 5);
        assert_eq!(
            report.to_string(),
            "Import complete (directory mode):\n• Meshes: 3\n• Materials: 2"
        );
    }

    #[test]
    fn test_empty_report() {
        let report = ImportReport::from_stats(ImportMode::File, &ImportStats::new());
        assert!(report.is_empty());
        assert_eq!(report.to_string(), NOTHING_IMPORTED);
    }

    #[test]
    fn test_warning_json_carries_kind() {
        let warning = FileWarning {
            file_name: "broken.blend".to_string(),
            path: PathBuf::from("/lib/broken.blend"),
            error: StockpileError::CorruptArchive("missing DNA1 block".to_string()),
        };
        assert_eq!(
            warning.to_string(),
            "Failed to load broken.blend: Corrupt archive: missing DNA1 block"
        );
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "corrupt_archive");
        assert_eq!(json["file"], "broken.blend");
    }
}
