//! Project library record types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use stockpile_core::AssetCategory;

/// A record copied into the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRecord {
    pub category: AssetCategory,
    /// Name inside the project, unique within its category
    pub name: String,
    /// Name the record had in its source archive
    pub source_name: String,
    /// Archive the record was copied from
    pub source_path: PathBuf,
}

impl ImportedRecord {
    /// True when the record had to be renamed to avoid a collision
    pub fn was_renamed(&self) -> bool {
        self.name != self.source_name
    }
}

/// Which workspace-activation parameter forms the host understands.
///
/// Host versions differ: some take the workspace by name, others by a
/// workspace reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceApi {
    #[default]
    Both,
    ByNameOnly,
    ByReferenceOnly,
}

impl WorkspaceApi {
    pub fn accepts_name(self) -> bool {
        matches!(self, WorkspaceApi::Both | WorkspaceApi::ByNameOnly)
    }

    pub fn accepts_reference(self) -> bool {
        matches!(self, WorkspaceApi::Both | WorkspaceApi::ByReferenceOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serde() {
        let record = ImportedRecord {
            category: AssetCategory::NodeGroups,
            name: "Scatter.001".to_string(),
            source_name: "Scatter".to_string(),
            source_path: PathBuf::from("lib/nodes.blend"),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "node_groups");
        assert!(record.was_renamed());
    }

    #[test]
    fn test_workspace_api_support() {
        assert!(WorkspaceApi::Both.accepts_name());
        assert!(WorkspaceApi::Both.accepts_reference());
        assert!(!WorkspaceApi::ByNameOnly.accepts_reference());
        assert!(!WorkspaceApi::ByReferenceOnly.accepts_name());
    }
}
