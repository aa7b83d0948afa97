//! Library loading: the archive side of an import

use std::path::Path;
use stockpile_blend::BlendArchive;
use stockpile_core::{AssetCategory, CategoryMap, Result, StockpileError};

/// How loaded records relate to their source archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Records are copied into the destination
    Append,
    /// Records stay in the source and are referenced
    Link,
}

/// Records an opened archive offers, by category
pub trait ArchiveContents {
    /// Available record names, or `None` when the archive does not expose
    /// the category at all
    fn records(&self, category: AssetCategory) -> Option<&[String]>;
}

/// Opens archives for import.
///
/// The returned archive value is the scope of the load: it is dropped at the
/// end of the per-file step on both the success and the error path.
pub trait LibraryLoader {
    type Archive: ArchiveContents;

    fn load(
        &mut self,
        path: &Path,
        link_mode: LinkMode,
        assets_only: bool,
    ) -> Result<Self::Archive>;
}

/// Loader backed by the `.blend` reader
#[derive(Debug, Default)]
pub struct BlendLoader;

impl BlendLoader {
    pub fn new() -> Self {
        Self
    }
}

/// Datablock names read from one `.blend` archive
#[derive(Debug, Clone)]
pub struct LoadedArchive {
    names: CategoryMap<Vec<String>>,
    link_mode: LinkMode,
}

impl LoadedArchive {
    pub fn link_mode(&self) -> LinkMode {
        self.link_mode
    }
}

impl ArchiveContents for LoadedArchive {
    fn records(&self, category: AssetCategory) -> Option<&[String]> {
        Some(self.names[category].as_slice())
    }
}

impl LibraryLoader for BlendLoader {
    type Archive = LoadedArchive;

    fn load(
        &mut self,
        path: &Path,
        link_mode: LinkMode,
        assets_only: bool,
    ) -> Result<LoadedArchive> {
        let archive = BlendArchive::open(path).map_err(|e| match e {
            StockpileError::IoError(io) => {
                StockpileError::ArchiveLoad(format!("{}: {}", path.display(), io))
            }
            other => other,
        })?;
        Ok(LoadedArchive {
            names: archive.names_by_category(assets_only),
            link_mode,
        })
    }
}
