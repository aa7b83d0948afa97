//! The destination side of an import

use crate::source::SourceFile;
use std::path::Path;
use stockpile_core::{AssetCategory, Result};
use stockpile_library::ProjectLibrary;

/// Parameter form used to address a workspace when activating it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationConvention {
    /// Pass the workspace's name
    ByName,
    /// Pass a workspace reference
    ByReference,
}

/// Where imported records go
pub trait DestinationStore {
    /// Append every record in `records` to the category's collection
    fn append(&mut self, category: AssetCategory, source: &SourceFile, records: &[String])
        -> Result<()>;

    /// Append and activate one workspace from the archive at `path`
    fn activate_workspace(
        &mut self,
        convention: ActivationConvention,
        name: &str,
        path: &Path,
    ) -> Result<()>;
}

impl DestinationStore for ProjectLibrary {
    fn append(
        &mut self,
        category: AssetCategory,
        source: &SourceFile,
        records: &[String],
    ) -> Result<()> {
        ProjectLibrary::append(self, category, &source.path, records);
        Ok(())
    }

    fn activate_workspace(
        &mut self,
        convention: ActivationConvention,
        name: &str,
        path: &Path,
    ) -> Result<()> {
        match convention {
            ActivationConvention::ByName => self.activate_workspace_by_name(name, path)?,
            ActivationConvention::ByReference => self.activate_workspace_by_reference(name, path)?,
        };
        Ok(())
    }
}
