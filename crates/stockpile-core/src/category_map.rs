//! Dense per-category storage

use crate::category::AssetCategory;
use std::ops::{Index, IndexMut};

/// A map with exactly one slot for every [`AssetCategory`].
///
/// The key set can never drift from the category table: slots are allocated
/// up front and indexed by the category itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap<T> {
    slots: [T; AssetCategory::COUNT],
}

impl<T> CategoryMap<T> {
    /// Build a map by calling `f` once per category
    pub fn from_fn(mut f: impl FnMut(AssetCategory) -> T) -> Self {
        Self {
            slots: std::array::from_fn(|i| f(AssetCategory::ALL[i])),
        }
    }

    pub fn get(&self, category: AssetCategory) -> &T {
        &self.slots[category.index()]
    }

    pub fn get_mut(&mut self, category: AssetCategory) -> &mut T {
        &mut self.slots[category.index()]
    }

    /// Iterate over every slot in display order
    pub fn iter(&self) -> impl Iterator<Item = (AssetCategory, &T)> {
        AssetCategory::ALL.into_iter().zip(self.slots.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AssetCategory, &mut T)> {
        AssetCategory::ALL.into_iter().zip(self.slots.iter_mut())
    }
}

impl<T: Default> Default for CategoryMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T> Index<AssetCategory> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: AssetCategory) -> &T {
        self.get(category)
    }
}

impl<T> IndexMut<AssetCategory> for CategoryMap<T> {
    fn index_mut(&mut self, category: AssetCategory) -> &mut T {
        self.get_mut(category)
    }
}
