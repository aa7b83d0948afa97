//! Mapping between asset categories and datablock ID codes

use stockpile_core::AssetCategory;

/// Two-letter ID code written in front of every datablock of `category`
pub fn id_code(category: AssetCategory) -> [u8; 2] {
    match category {
        AssetCategory::Brushes => *b"BR",
        AssetCategory::Meshes => *b"ME",
        AssetCategory::Materials => *b"MA",
        AssetCategory::NodeGroups => *b"NT",
        AssetCategory::Textures => *b"TE",
        AssetCategory::Actions => *b"AC",
        AssetCategory::Armatures => *b"AR",
        AssetCategory::Cameras => *b"CA",
        AssetCategory::Collections => *b"GR",
        AssetCategory::Images => *b"IM",
        AssetCategory::Lights => *b"LA",
        AssetCategory::Objects => *b"OB",
        AssetCategory::Palettes => *b"PL",
        AssetCategory::Scenes => *b"SC",
        AssetCategory::Texts => *b"TX",
        AssetCategory::Workspaces => *b"WS",
        AssetCategory::Worlds => *b"WO",
    }
}

/// Reverse lookup; `None` for ID kinds outside the category table
pub fn category_for_code(code: [u8; 2]) -> Option<AssetCategory> {
    AssetCategory::ALL
        .into_iter()
        .find(|category| id_code(*category) == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique_and_reversible() {
        for category in AssetCategory::ALL {
            assert_eq!(category_for_code(id_code(category)), Some(category));
        }
    }

    #[test]
    fn test_unmapped_codes() {
        assert_eq!(category_for_code(*b"WM"), None);
        assert_eq!(category_for_code(*b"ID"), None);
    }
}
