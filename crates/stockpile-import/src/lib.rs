//! Stockpile Import - Batch import of asset libraries
//!
//! Resolves a target path to a set of `.blend` archives, loads each one,
//! copies the selected categories into a destination project, and reports
//! per-category counts. A failing archive is skipped with a warning; the
//! rest of the batch still runs.

mod destination;
mod loader;
mod orchestrator;
mod report;
mod settings;
mod source;
mod stats;

pub use destination::{ActivationConvention, DestinationStore};
pub use loader::{ArchiveContents, BlendLoader, LibraryLoader, LinkMode, LoadedArchive};
pub use orchestrator::{
    activate_workspace, import_sources, run_import, ImportOutcome, ImportRequest,
};
pub use report::{FileWarning, ImportReport, ReportEntry, NOTHING_IMPORTED};
pub use settings::{ImportSection, ImportSettings, SettingsFile, CATEGORIES_ENV, MARKED_ONLY_ENV};
pub use source::{is_archive_name, resolve_sources, ImportMode, SourceFile, SourceSet};
pub use stats::ImportStats;
