//! Parsed archive: header plus the datablocks it declares

use crate::block::{read_blocks, Block, DNA_CODE};
use crate::bytes::ByteReader;
use crate::codes::{category_for_code, id_code};
use crate::dna::{IdLayout, Sdna};
use crate::header::BlendHeader;
use serde::Serialize;
use std::path::Path;
use stockpile_core::{AssetCategory, CategoryMap, Result, StockpileError};
use tracing::debug;

/// One datablock found in an archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Datablock {
    pub category: AssetCategory,
    /// Name without the two-letter type prefix
    pub name: String,
    /// Flagged as a reusable asset by the archive's author
    pub is_asset: bool,
}

/// An archive read fully into memory.
///
/// Holds no file handle; the bytes are dropped once the datablock table has
/// been extracted.
#[derive(Debug, Clone)]
pub struct BlendArchive {
    header: BlendHeader,
    block_count: usize,
    datablocks: Vec<Datablock>,
}

impl BlendArchive {
    /// Read and parse an archive from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = data.len(), "read archive");
        Self::from_bytes(&data)
    }

    /// Parse an archive already in memory
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let header = BlendHeader::parse(data)?;
        let blocks = read_blocks(data, &header)?;

        let dna_block = blocks
            .iter()
            .find(|b| b.code == DNA_CODE)
            .ok_or_else(|| StockpileError::CorruptArchive("missing DNA1 block".to_string()))?;
        let sdna = Sdna::parse(dna_block.payload(data), header.endian, header.pointer_size)?;
        let layout = IdLayout::from_sdna(&sdna, header.pointer_size)?;

        let mut datablocks = Vec::new();
        for block in &blocks {
            let Some(category) = block.id_code().and_then(category_for_code) else {
                continue;
            };
            datablocks.push(read_datablock(data, block, &layout, &header, category)?);
        }

        Ok(Self {
            header,
            block_count: blocks.len(),
            datablocks,
        })
    }

    pub fn header(&self) -> &BlendHeader {
        &self.header
    }

    /// Number of blocks before `ENDB`
    pub fn block_count(&self) -> usize {
        self.block_count
    }

    /// Every recognised datablock in file order
    pub fn datablocks(&self) -> &[Datablock] {
        &self.datablocks
    }

    /// Names of the datablocks of one category, in file order
    pub fn names(&self, category: AssetCategory, assets_only: bool) -> Vec<String> {
        self.datablocks
            .iter()
            .filter(|d| d.category == category && (!assets_only || d.is_asset))
            .map(|d| d.name.clone())
            .collect()
    }

    /// Names grouped by category
    pub fn names_by_category(&self, assets_only: bool) -> CategoryMap<Vec<String>> {
        let mut map: CategoryMap<Vec<String>> = CategoryMap::default();
        for block in &self.datablocks {
            if !assets_only || block.is_asset {
                map[block.category].push(block.name.clone());
            }
        }
        map
    }
}

fn read_datablock(
    data: &[u8],
    block: &Block,
    layout: &IdLayout,
    header: &BlendHeader,
    category: AssetCategory,
) -> Result<Datablock> {
    let payload = block.payload(data);
    let code = id_code(category);

    let raw_name = layout
        .name_offset
        .checked_add(layout.name_len)
        .and_then(|end| payload.get(layout.name_offset..end))
        .ok_or_else(|| {
            StockpileError::CorruptArchive(format!(
                "{} block at offset {} is too small for an ID header",
                String::from_utf8_lossy(&code),
                block.offset
            ))
        })?;
    let end = raw_name.iter().position(|b| *b == 0).unwrap_or(raw_name.len());
    let full_name = String::from_utf8_lossy(&raw_name[..end]);
    let name = full_name
        .strip_prefix(std::str::from_utf8(&code).unwrap_or_default())
        .unwrap_or(&full_name)
        .to_string();

    let is_asset = match layout.asset_data_offset {
        Some(offset) => {
            let mut reader = ByteReader::at(payload, offset, header.endian);
            reader.pointer(layout.pointer_size)? != 0
        }
        None => false,
    };

    Ok(Datablock {
        category,
        name,
        is_asset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::ArchiveBuilder;

    #[test]
    fn test_lists_names_without_prefix() {
        let bytes = ArchiveBuilder::new()
            .datablock(AssetCategory::Meshes, "Cube", false)
            .datablock(AssetCategory::Materials, "Steel", true)
            .datablock(AssetCategory::Meshes, "Suzanne", true)
            .build();

        let archive = BlendArchive::from_bytes(&bytes).unwrap();
        assert_eq!(archive.header().version, 402);
        assert_eq!(
            archive.names(AssetCategory::Meshes, false),
            vec!["Cube", "Suzanne"]
        );
        assert_eq!(archive.names(AssetCategory::Materials, false), vec!["Steel"]);
        assert!(archive.names(AssetCategory::Worlds, false).is_empty());
    }

    #[test]
    fn test_assets_only_filter() {
        let bytes = ArchiveBuilder::new()
            .datablock(AssetCategory::Meshes, "Cube", false)
            .datablock(AssetCategory::Meshes, "Suzanne", true)
            .build();

        let archive = BlendArchive::from_bytes(&bytes).unwrap();
        assert_eq!(archive.names(AssetCategory::Meshes, true), vec!["Suzanne"]);

        let grouped = archive.names_by_category(true);
        assert_eq!(grouped[AssetCategory::Meshes], vec!["Suzanne"]);
    }

    #[test]
    fn test_archive_without_asset_metadata_has_no_marked_records() {
        let bytes = ArchiveBuilder::new()
            .without_asset_data()
            .datablock(AssetCategory::Objects, "Lamp", true)
            .build();

        let archive = BlendArchive::from_bytes(&bytes).unwrap();
        assert_eq!(archive.names(AssetCategory::Objects, false), vec!["Lamp"]);
        assert!(archive.names(AssetCategory::Objects, true).is_empty());
    }

    #[test]
    fn test_32bit_big_endian_archive() {
        let bytes = ArchiveBuilder::new()
            .pointer_size(4)
            .big_endian()
            .datablock(AssetCategory::Workspaces, "Layout", true)
            .datablock(AssetCategory::Workspaces, "Sculpt", false)
            .build();

        let archive = BlendArchive::from_bytes(&bytes).unwrap();
        assert_eq!(archive.header().pointer_size, 4);
        assert_eq!(
            archive.names(AssetCategory::Workspaces, false),
            vec!["Layout", "Sculpt"]
        );
        assert_eq!(archive.names(AssetCategory::Workspaces, true), vec!["Layout"]);
    }

    #[test]
    fn test_large_block_archive() {
        let bytes = ArchiveBuilder::new()
            .large_blocks()
            .datablock(AssetCategory::NodeGroups, "Scatter", true)
            .build();

        let archive = BlendArchive::from_bytes(&bytes).unwrap();
        assert!(archive.header().large_blocks);
        assert_eq!(archive.names(AssetCategory::NodeGroups, true), vec!["Scatter"]);
    }

    #[test]
    fn test_truncated_archive_is_corrupt() {
        let bytes = ArchiveBuilder::new()
            .datablock(AssetCategory::Meshes, "Cube", false)
            .build();
        let err = BlendArchive::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, StockpileError::CorruptArchive(_)));
    }

    #[test]
    fn test_missing_dna_is_corrupt() {
        let mut data = b"BLENDER-v402".to_vec();
        data.extend_from_slice(b"ENDB");
        data.extend_from_slice(&[0u8; 20]);
        let err = BlendArchive::from_bytes(&data).unwrap_err();
        assert!(matches!(err, StockpileError::CorruptArchive(msg) if msg.contains("DNA1")));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_dna_array_is_corrupt() {
        let bytes = ArchiveBuilder::new()
            .field_before_name("big[4294967296][4294967296]")
            .datablock(AssetCategory::Meshes, "Cube", false)
            .build();
        let err = BlendArchive::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, StockpileError::CorruptArchive(msg) if msg.contains("big")));
    }

    #[test]
    fn test_name_past_block_payload_is_corrupt() {
        let bytes = ArchiveBuilder::new()
            .field_before_name("pad[100000]")
            .datablock(AssetCategory::Meshes, "Cube", false)
            .build();
        let err = BlendArchive::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, StockpileError::CorruptArchive(msg) if msg.contains("too small")));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("stockpile_missing_archive_for_test.blend");
        let err = BlendArchive::open(&path).unwrap_err();
        assert!(matches!(err, StockpileError::IoError(_)));
    }
}
