//! Batch import: one pass over the selected archives with per-file isolation

use crate::destination::{ActivationConvention, DestinationStore};
use crate::loader::{ArchiveContents, LibraryLoader, LinkMode};
use crate::report::{FileWarning, ImportReport};
use crate::settings::ImportSettings;
use crate::source::{resolve_sources, ImportMode, SourceFile, SourceSet};
use crate::stats::ImportStats;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use stockpile_core::{AssetCategory, Result, StockpileError};
use tracing::{debug, info, warn};

/// What to import and from where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// A `.blend` file or a directory of them
    pub path: PathBuf,
    /// Only take records flagged as assets
    pub marked_only: bool,
    /// Categories to import; must not be empty
    pub categories: BTreeSet<AssetCategory>,
}

impl ImportRequest {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            marked_only: false,
            categories: BTreeSet::new(),
        }
    }

    /// Build a request from the current selection settings
    pub fn from_settings<P: AsRef<Path>>(path: P, settings: &ImportSettings) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            marked_only: settings.marked_only,
            categories: settings.categories.clone(),
        }
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = AssetCategory>) -> Self {
        self.categories.extend(categories);
        self
    }

    pub fn marked_only(mut self, marked_only: bool) -> Self {
        self.marked_only = marked_only;
        self
    }
}

/// Everything one import run produced
#[derive(Debug)]
pub struct ImportOutcome {
    pub mode: ImportMode,
    pub stats: ImportStats,
    /// Skipped archives, in processing order
    pub warnings: Vec<FileWarning>,
    pub report: ImportReport,
    /// Archives attempted
    pub files_attempted: usize,
}

impl ImportOutcome {
    pub fn files_failed(&self) -> usize {
        self.warnings.len()
    }

    pub fn files_imported(&self) -> usize {
        self.files_attempted - self.warnings.len()
    }
}

/// Run a complete import: check the selection, resolve the path, then
/// process every archive.
///
/// Only an empty selection or an unusable path fail the call; archives that
/// cannot be processed are reported in [`ImportOutcome::warnings`].
pub fn run_import<L, D>(
    request: &ImportRequest,
    loader: &mut L,
    destination: &mut D,
) -> Result<ImportOutcome>
where
    L: LibraryLoader,
    D: DestinationStore,
{
    if request.categories.is_empty() {
        return Err(StockpileError::NoCategorySelected);
    }

    let sources = resolve_sources(&request.path)?;
    import_sources(request, &sources, loader, destination)
}

/// Process an already resolved set of archives
pub fn import_sources<L, D>(
    request: &ImportRequest,
    sources: &SourceSet,
    loader: &mut L,
    destination: &mut D,
) -> Result<ImportOutcome>
where
    L: LibraryLoader,
    D: DestinationStore,
{
    if request.categories.is_empty() {
        return Err(StockpileError::NoCategorySelected);
    }

    let mut stats = ImportStats::new();
    let mut warnings = Vec::new();

    for source in &sources.files {
        debug!(file = %source.path.display(), "importing archive");
        if let Err(error) = import_file(request, source, loader, destination, &mut stats) {
            warn!(file = %source.file_name, %error, "skipping archive");
            warnings.push(FileWarning {
                file_name: source.file_name.clone(),
                path: source.path.clone(),
                error,
            });
        }
    }

    let report = ImportReport::from_stats(sources.mode, &stats);
    info!(
        mode = %sources.mode,
        files = sources.files.len(),
        failed = warnings.len(),
        records = stats.total(),
        "import finished"
    );

    Ok(ImportOutcome {
        mode: sources.mode,
        stats,
        warnings,
        report,
        files_attempted: sources.files.len(),
    })
}

fn import_file<L, D>(
    request: &ImportRequest,
    source: &SourceFile,
    loader: &mut L,
    destination: &mut D,
    stats: &mut ImportStats,
) -> Result<()>
where
    L: LibraryLoader,
    D: DestinationStore,
{
    let archive = loader.load(&source.path, LinkMode::Append, request.marked_only)?;

    if request.categories.contains(&AssetCategory::Workspaces) {
        if let Some(workspaces) = archive.records(AssetCategory::Workspaces) {
            for name in workspaces {
                activate_workspace(destination, name, &source.path)?;
                stats.add(AssetCategory::Workspaces, 1);
            }
        }
    }

    for &category in request.categories.iter().filter(|c| !c.is_workspace()) {
        let Some(records) = archive.records(category) else {
            continue;
        };
        if records.is_empty() {
            continue;
        }
        destination.append(category, source, records)?;
        stats.add(category, records.len());
    }

    Ok(())
}

/// Activate by name, falling back to the reference form when the host
/// rejects the first call. Returns the convention that worked.
pub fn activate_workspace<D: DestinationStore>(
    destination: &mut D,
    name: &str,
    path: &Path,
) -> Result<ActivationConvention> {
    match destination.activate_workspace(ActivationConvention::ByName, name, path) {
        Ok(()) => Ok(ActivationConvention::ByName),
        Err(primary) => {
            debug!(workspace = name, error = %primary, "retrying activation by reference");
            destination
                .activate_workspace(ActivationConvention::ByReference, name, path)
                .map(|()| ActivationConvention::ByReference)
                .map_err(|fallback| StockpileError::WorkspaceActivation {
                    name: name.to_string(),
                    cause: format!("{}; by reference: {}", primary, fallback),
                })
        }
    }
}
