//! Per-category import tallies

use serde::ser::{Serialize, SerializeMap, Serializer};
use stockpile_core::{AssetCategory, CategoryMap};

/// Count of records imported per category.
///
/// Every category has a slot from the start; counts only grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    counts: CategoryMap<usize>,
}

impl ImportStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: AssetCategory, count: usize) {
        self.counts[category] += count;
    }

    pub fn get(&self, category: AssetCategory) -> usize {
        self.counts[category]
    }

    /// Sum over all categories
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| *n).sum()
    }

    /// True when nothing was imported
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Every category with its count, in display order
    pub fn iter(&self) -> impl Iterator<Item = (AssetCategory, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (c, *n))
    }

    /// Categories with a non-zero count, in display order
    pub fn non_zero(&self) -> impl Iterator<Item = (AssetCategory, usize)> + '_ {
        self.iter().filter(|(_, n)| *n > 0)
    }
}

impl Serialize for ImportStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(AssetCategory::COUNT))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.id(), &count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_every_category_at_zero() {
        let stats = ImportStats::new();
        assert_eq!(stats.iter().count(), AssetCategory::COUNT);
        assert!(stats.is_empty());
        assert_eq!(stats.non_zero().count(), 0);
    }

    #[test]
    fn test_add_accumulates() {
        let mut stats = ImportStats::new();
        stats.add(AssetCategory::Meshes, 2);
        stats.add(AssetCategory::Meshes, 3);
        stats.add(AssetCategory::Worlds, 1);

        assert_eq!(stats.get(AssetCategory::Meshes), 5);
        assert_eq!(stats.total(), 6);
        let non_zero: Vec<_> = stats.non_zero().collect();
        assert_eq!(
            non_zero,
            vec![(AssetCategory::Meshes, 5), (AssetCategory::Worlds, 1)]
        );
    }

    #[test]
    fn test_serializes_full_key_set() {
        let mut stats = ImportStats::new();
        stats.add(AssetCategory::NodeGroups, 4);
        let json = serde_json::to_value(&stats).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), AssetCategory::COUNT);
        assert_eq!(object["node_groups"], 4);
        assert_eq!(object["meshes"], 0);
    }
}
