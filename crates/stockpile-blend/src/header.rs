//! Archive file header

use crate::bytes::Endian;
use serde::Serialize;
use stockpile_core::{Result, StockpileError};

const MAGIC: &[u8; 7] = b"BLENDER";
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// Length of the legacy header (`BLENDER-v402`)
const LEGACY_HEADER_LEN: usize = 12;

/// Decoded archive header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlendHeader {
    /// Size of a pointer in bytes (4 or 8)
    pub pointer_size: usize,
    pub endian: Endian,
    /// Writer version, e.g. 402 for 4.2
    pub version: u16,
    /// Block headers use 64-bit lengths and counts
    pub large_blocks: bool,
    /// Number of header bytes preceding the first block
    pub len: usize,
}

impl BlendHeader {
    /// Parse the header at the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.starts_with(&GZIP_MAGIC) {
            return Err(StockpileError::UnsupportedArchive(
                "gzip-compressed archive".to_string(),
            ));
        }
        if data.starts_with(&ZSTD_MAGIC) {
            return Err(StockpileError::UnsupportedArchive(
                "zstd-compressed archive".to_string(),
            ));
        }
        if !data.starts_with(MAGIC) {
            return Err(StockpileError::CorruptArchive(
                "missing BLENDER file signature".to_string(),
            ));
        }
        if data.len() < LEGACY_HEADER_LEN {
            return Err(StockpileError::CorruptArchive("truncated header".to_string()));
        }

        match data[7] {
            b'_' | b'-' => Self::parse_legacy(data),
            b'0'..=b'9' => Self::parse_large(data),
            other => Err(StockpileError::CorruptArchive(format!(
                "unknown pointer-size marker '{}'",
                other as char
            ))),
        }
    }

    fn parse_legacy(data: &[u8]) -> Result<Self> {
        let pointer_size = if data[7] == b'_' { 4 } else { 8 };
        let endian = parse_endian(data[8])?;
        let version = parse_digits(&data[9..12])?;
        Ok(Self {
            pointer_size,
            endian,
            version,
            large_blocks: false,
            len: LEGACY_HEADER_LEN,
        })
    }

    /// `BLENDER17-01v0500`: header length, format version, endianness, version
    fn parse_large(data: &[u8]) -> Result<Self> {
        let len = parse_digits(&data[7..9])? as usize;
        if len < 17 || data.len() < len {
            return Err(StockpileError::CorruptArchive("truncated header".to_string()));
        }
        if data[9] != b'-' {
            return Err(StockpileError::CorruptArchive(
                "malformed header separator".to_string(),
            ));
        }
        let format = parse_digits(&data[10..12])?;
        if format != 1 {
            return Err(StockpileError::UnsupportedArchive(format!(
                "file format version {}",
                format
            )));
        }
        let endian = parse_endian(data[12])?;
        let version = parse_digits(&data[13..17])?;
        Ok(Self {
            pointer_size: 8,
            endian,
            version,
            large_blocks: true,
            len,
        })
    }

    /// Version in `major.minor` form, e.g. `4.2`
    pub fn version_string(&self) -> String {
        format!("{}.{}", self.version / 100, self.version % 100)
    }
}

fn parse_endian(marker: u8) -> Result<Endian> {
    match marker {
        b'v' => Ok(Endian::Little),
        b'V' => Ok(Endian::Big),
        other => Err(StockpileError::CorruptArchive(format!(
            "unknown endianness marker '{}'",
            other as char
        ))),
    }
}

fn parse_digits(bytes: &[u8]) -> Result<u16> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| {
            StockpileError::CorruptArchive(format!(
                "expected digits in header, found '{}'",
                String::from_utf8_lossy(bytes)
            ))
        })
}
