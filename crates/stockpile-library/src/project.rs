//! The destination project's data, held in memory

use crate::types::{ImportedRecord, WorkspaceApi};
use std::path::Path;
use stockpile_core::{AssetCategory, CategoryMap, Result, StockpileError};
use tracing::debug;

/// Records of an open project, grouped by category.
///
/// Appending is additive: copying the same source record twice produces two
/// records, the second one renamed with a numeric suffix (`Cube`, `Cube.001`).
#[derive(Debug, Default)]
pub struct ProjectLibrary {
    records: CategoryMap<Vec<ImportedRecord>>,
    active_workspace: Option<String>,
    workspace_api: WorkspaceApi,
}

impl ProjectLibrary {
    /// Create an empty project accepting both workspace parameter forms
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty project whose host understands only some forms
    pub fn with_workspace_api(workspace_api: WorkspaceApi) -> Self {
        Self {
            workspace_api,
            ..Self::default()
        }
    }

    /// Copy records into a category, returning their names in the project
    pub fn append<P: AsRef<Path>>(
        &mut self,
        category: AssetCategory,
        source_path: P,
        names: &[String],
    ) -> Vec<String> {
        let source_path = source_path.as_ref();
        let mut local_names = Vec::with_capacity(names.len());
        for name in names {
            local_names.push(self.insert(category, name, source_path));
        }
        debug!(
            category = %category,
            count = names.len(),
            source = %source_path.display(),
            "appended records"
        );
        local_names
    }

    /// Activate a workspace addressed by its name
    pub fn activate_workspace_by_name<P: AsRef<Path>>(
        &mut self,
        name: &str,
        source_path: P,
    ) -> Result<String> {
        if !self.workspace_api.accepts_name() {
            return Err(StockpileError::Destination(
                "workspace activation by name is not supported by this host".to_string(),
            ));
        }
        Ok(self.activate(name, source_path.as_ref()))
    }

    /// Activate a workspace addressed by a workspace reference
    pub fn activate_workspace_by_reference<P: AsRef<Path>>(
        &mut self,
        workspace: &str,
        source_path: P,
    ) -> Result<String> {
        if !self.workspace_api.accepts_reference() {
            return Err(StockpileError::Destination(
                "workspace activation by reference is not supported by this host".to_string(),
            ));
        }
        Ok(self.activate(workspace, source_path.as_ref()))
    }

    fn activate(&mut self, name: &str, source_path: &Path) -> String {
        let local = self.insert(AssetCategory::Workspaces, name, source_path);
        debug!(workspace = %local, "activated workspace");
        self.active_workspace = Some(local.clone());
        local
    }

    fn insert(&mut self, category: AssetCategory, name: &str, source_path: &Path) -> String {
        let local = self.unique_name(category, name);
        self.records[category].push(ImportedRecord {
            category,
            name: local.clone(),
            source_name: name.to_string(),
            source_path: source_path.to_path_buf(),
        });
        local
    }

    /// First free name for `name` in `category`: `name`, `name.001`, ...
    pub fn unique_name(&self, category: AssetCategory, name: &str) -> String {
        if self.get(category, name).is_none() {
            return name.to_string();
        }
        let base = strip_numeric_suffix(name);
        (1..)
            .map(|n| format!("{}.{:03}", base, n))
            .find(|candidate| self.get(category, candidate).is_none())
            .unwrap_or_else(|| name.to_string())
    }

    /// Look up a record by its project name
    pub fn get(&self, category: AssetCategory, name: &str) -> Option<&ImportedRecord> {
        self.records[category].iter().find(|r| r.name == name)
    }

    /// All records of a category, in import order
    pub fn records(&self, category: AssetCategory) -> &[ImportedRecord] {
        &self.records[category]
    }

    /// Record count per category
    pub fn counts(&self) -> CategoryMap<usize> {
        CategoryMap::from_fn(|category| self.records[category].len())
    }

    /// Name of the workspace activated last
    pub fn active_workspace(&self) -> Option<&str> {
        self.active_workspace.as_deref()
    }

    pub fn workspace_api(&self) -> WorkspaceApi {
        self.workspace_api
    }

    /// Total number of records across categories
    pub fn len(&self) -> usize {
        self.records.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `Cube.003` -> `Cube`; names without a three-digit suffix are unchanged
fn strip_numeric_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, digits))
            if !base.is_empty()
                && digits.len() == 3
                && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => name,
    }
}
