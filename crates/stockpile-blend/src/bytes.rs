//! Endian-aware reads over a byte slice

use serde::Serialize;
use stockpile_core::{Result, StockpileError};

/// Byte order recorded in the archive header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    Little,
    Big,
}

/// Bounds-checked cursor over archive bytes
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            pos: 0,
            endian,
        }
    }

    pub fn at(data: &'a [u8], pos: usize, endian: Endian) -> Self {
        Self { data, pos, endian }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                StockpileError::CorruptArchive(format!(
                    "unexpected end of data at offset {} (wanted {} bytes)",
                    self.pos, len
                ))
            })?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.bytes(len).map(|_| ())
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(N)?);
        Ok(out)
    }

    pub fn u16(&mut self) -> Result<u16> {
        let raw = self.array::<2>()?;
        Ok(match self.endian {
            Endian::Little => u16::from_le_bytes(raw),
            Endian::Big => u16::from_be_bytes(raw),
        })
    }

    pub fn u32(&mut self) -> Result<u32> {
        let raw = self.array::<4>()?;
        Ok(match self.endian {
            Endian::Little => u32::from_le_bytes(raw),
            Endian::Big => u32::from_be_bytes(raw),
        })
    }

    pub fn i32(&mut self) -> Result<i32> {
        self.u32().map(|v| v as i32)
    }

    pub fn u64(&mut self) -> Result<u64> {
        let raw = self.array::<8>()?;
        Ok(match self.endian {
            Endian::Little => u64::from_le_bytes(raw),
            Endian::Big => u64::from_be_bytes(raw),
        })
    }

    pub fn i64(&mut self) -> Result<i64> {
        self.u64().map(|v| v as i64)
    }

    /// Read a pointer-sized unsigned value (4 or 8 bytes)
    pub fn pointer(&mut self, size: usize) -> Result<u64> {
        match size {
            4 => self.u32().map(u64::from),
            _ => self.u64(),
        }
    }

    /// Read a NUL-terminated string, consuming the terminator
    pub fn cstr(&mut self) -> Result<&'a str> {
        let rest = &self.data[self.pos.min(self.data.len())..];
        let len = rest.iter().position(|b| *b == 0).ok_or_else(|| {
            StockpileError::CorruptArchive(format!("unterminated string at offset {}", self.pos))
        })?;
        let text = std::str::from_utf8(&rest[..len]).map_err(|_| {
            StockpileError::CorruptArchive(format!("invalid UTF-8 string at offset {}", self.pos))
        })?;
        self.pos += len + 1;
        Ok(text)
    }

    /// Expect a fixed 4-byte tag
    pub fn tag(&mut self, expected: &[u8; 4]) -> Result<()> {
        let at = self.pos;
        let found = self.array::<4>()?;
        if &found != expected {
            return Err(StockpileError::CorruptArchive(format!(
                "expected '{}' at offset {}, found '{}'",
                String::from_utf8_lossy(expected),
                at,
                String::from_utf8_lossy(&found)
            )));
        }
        Ok(())
    }

    /// Advance to the next multiple of four
    pub fn align4(&mut self) {
        self.pos = (self.pos + 3) & !3;
    }
}
