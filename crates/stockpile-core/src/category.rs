//! The fixed table of importable asset categories

use crate::error::StockpileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A kind of reusable record an archive can hold.
///
/// The set is closed and known at build time. Variant order is the display
/// order used by reports and listings; it carries no import semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Brushes,
    Meshes,
    Materials,
    NodeGroups,
    Textures,
    Actions,
    Armatures,
    Cameras,
    Collections,
    Images,
    Lights,
    Objects,
    Palettes,
    Scenes,
    Texts,
    Workspaces,
    Worlds,
}

impl AssetCategory {
    /// Number of known categories
    pub const COUNT: usize = 17;

    /// Every category, in display order
    pub const ALL: [AssetCategory; Self::COUNT] = [
        AssetCategory::Brushes,
        AssetCategory::Meshes,
        AssetCategory::Materials,
        AssetCategory::NodeGroups,
        AssetCategory::Textures,
        AssetCategory::Actions,
        AssetCategory::Armatures,
        AssetCategory::Cameras,
        AssetCategory::Collections,
        AssetCategory::Images,
        AssetCategory::Lights,
        AssetCategory::Objects,
        AssetCategory::Palettes,
        AssetCategory::Scenes,
        AssetCategory::Texts,
        AssetCategory::Workspaces,
        AssetCategory::Worlds,
    ];

    /// Stable identifier, e.g. `node_groups`
    pub fn id(self) -> &'static str {
        match self {
            AssetCategory::Brushes => "brushes",
            AssetCategory::Meshes => "meshes",
            AssetCategory::Materials => "materials",
            AssetCategory::NodeGroups => "node_groups",
            AssetCategory::Textures => "textures",
            AssetCategory::Actions => "actions",
            AssetCategory::Armatures => "armatures",
            AssetCategory::Cameras => "cameras",
            AssetCategory::Collections => "collections",
            AssetCategory::Images => "images",
            AssetCategory::Lights => "lights",
            AssetCategory::Objects => "objects",
            AssetCategory::Palettes => "palettes",
            AssetCategory::Scenes => "scenes",
            AssetCategory::Texts => "texts",
            AssetCategory::Workspaces => "workspaces",
            AssetCategory::Worlds => "worlds",
        }
    }

    /// Human-readable label used in reports
    pub fn label(self) -> &'static str {
        match self {
            AssetCategory::Brushes => "Brushes",
            AssetCategory::Meshes => "Meshes",
            AssetCategory::Materials => "Materials",
            AssetCategory::NodeGroups => "Node Groups",
            AssetCategory::Textures => "Textures",
            AssetCategory::Actions => "Actions",
            AssetCategory::Armatures => "Armatures",
            AssetCategory::Cameras => "Cameras",
            AssetCategory::Collections => "Collections",
            AssetCategory::Images => "Images",
            AssetCategory::Lights => "Lights",
            AssetCategory::Objects => "Objects",
            AssetCategory::Palettes => "Palettes",
            AssetCategory::Scenes => "Scenes",
            AssetCategory::Texts => "Texts",
            AssetCategory::Workspaces => "Workspaces",
            AssetCategory::Worlds => "Worlds",
        }
    }

    /// Icon hint for front ends that draw a category toggle
    pub fn icon(self) -> &'static str {
        match self {
            AssetCategory::Brushes => "BRUSH_DATA",
            AssetCategory::Meshes => "MESH_MONKEY",
            AssetCategory::Materials => "MATERIAL",
            AssetCategory::NodeGroups => "NODETREE",
            AssetCategory::Textures => "TEXTURE",
            AssetCategory::Actions => "ACTION",
            AssetCategory::Armatures => "ARMATURE_DATA",
            AssetCategory::Cameras => "CAMERA_DATA",
            AssetCategory::Collections => "OUTLINER_COLLECTION",
            AssetCategory::Images => "IMAGE_DATA",
            AssetCategory::Lights => "LIGHT",
            AssetCategory::Objects => "OBJECT_DATA",
            AssetCategory::Palettes => "COLOR",
            AssetCategory::Scenes => "SCENE_DATA",
            AssetCategory::Texts => "TEXT",
            AssetCategory::Workspaces => "WORKSPACE",
            AssetCategory::Worlds => "WORLD",
        }
    }

    /// Position in [`AssetCategory::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Workspaces are activated one by one instead of being bulk-copied
    pub fn is_workspace(self) -> bool {
        self == AssetCategory::Workspaces
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AssetCategory {
    type Err = StockpileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        AssetCategory::ALL
            .into_iter()
            .find(|c| c.id() == needle)
            .ok_or_else(|| StockpileError::UnknownCategory(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_table_order() {
        for (i, category) in AssetCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(
            "node_groups".parse::<AssetCategory>().unwrap(),
            AssetCategory::NodeGroups
        );
        assert_eq!(
            " Meshes ".parse::<AssetCategory>().unwrap(),
            AssetCategory::Meshes
        );
        assert!(matches!(
            "sounds".parse::<AssetCategory>(),
            Err(StockpileError::UnknownCategory(s)) if s == "sounds"
        ));
    }

    #[test]
    fn test_ids_round_trip_through_display() {
        for category in AssetCategory::ALL {
            assert_eq!(category.to_string().parse::<AssetCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&AssetCategory::NodeGroups).unwrap();
        assert_eq!(json, "\"node_groups\"");
        let back: AssetCategory = serde_json::from_str("\"workspaces\"").unwrap();
        assert!(back.is_workspace());
    }
}
