//! Error types for Stockpile

use thiserror::Error;

/// The main error type for Stockpile operations
#[derive(Debug, Error)]
pub enum StockpileError {
    #[error("No asset category selected; select at least one category")]
    NoCategorySelected,

    #[error("Invalid path: {0} is neither a directory nor a .blend file")]
    InvalidPath(String),

    #[error("No .blend files found in directory: {0}")]
    EmptyDirectory(String),

    #[error("Archive load error: {0}")]
    ArchiveLoad(String),

    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("Unsupported archive: {0}")]
    UnsupportedArchive(String),

    #[error("Workspace activation failed for '{name}': {cause}")]
    WorkspaceActivation { name: String, cause: String },

    #[error("Destination error: {0}")]
    Destination(String),

    #[error("Unknown asset category: {0}")]
    UnknownCategory(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StockpileError {
    /// True for the failures that abort an import before any archive is read
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            StockpileError::NoCategorySelected
                | StockpileError::InvalidPath(_)
                | StockpileError::EmptyDirectory(_)
        )
    }

    /// Stable snake_case name of the variant, for machine-readable output
    pub fn kind(&self) -> &'static str {
        match self {
            StockpileError::NoCategorySelected => "no_category_selected",
            StockpileError::InvalidPath(_) => "invalid_path",
            StockpileError::EmptyDirectory(_) => "empty_directory",
            StockpileError::ArchiveLoad(_) => "archive_load",
            StockpileError::CorruptArchive(_) => "corrupt_archive",
            StockpileError::UnsupportedArchive(_) => "unsupported_archive",
            StockpileError::WorkspaceActivation { .. } => "workspace_activation",
            StockpileError::Destination(_) => "destination",
            StockpileError::UnknownCategory(_) => "unknown_category",
            StockpileError::Config(_) => "config",
            StockpileError::IoError(_) => "io",
        }
    }
}

/// Result type alias for Stockpile operations
pub type Result<T> = std::result::Result<T, StockpileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_kinds() {
        assert!(StockpileError::NoCategorySelected.is_precondition());
        assert!(StockpileError::InvalidPath("x".into()).is_precondition());
        assert!(StockpileError::EmptyDirectory("d".into()).is_precondition());
        assert!(!StockpileError::CorruptArchive("bad".into()).is_precondition());
        assert!(!StockpileError::WorkspaceActivation {
            name: "Layout".into(),
            cause: "nope".into(),
        }
        .is_precondition());
    }

    #[test]
    fn test_workspace_activation_message() {
        let err = StockpileError::WorkspaceActivation {
            name: "Sculpt".into(),
            cause: "unknown parameter".into(),
        };
        assert_eq!(
            err.to_string(),
            "Workspace activation failed for 'Sculpt': unknown parameter"
        );
    }
}
