//! File block table

use crate::bytes::ByteReader;
use crate::header::BlendHeader;
use stockpile_core::{Result, StockpileError};

/// Code of the block holding the struct DNA
pub const DNA_CODE: [u8; 4] = *b"DNA1";
/// Code of the terminating block
pub const END_CODE: [u8; 4] = *b"ENDB";

/// One block header plus the location of its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub code: [u8; 4],
    /// Payload offset from the start of the file
    pub offset: usize,
    /// Payload length in bytes
    pub len: usize,
    /// Memory address the block had when written
    pub old_address: u64,
    pub sdna_index: u32,
    pub count: u64,
}

impl Block {
    /// Two-letter ID code for datablock blocks (`ME\0\0`, `OB\0\0`, ...)
    pub fn id_code(&self) -> Option<[u8; 2]> {
        let [a, b, c, d] = self.code;
        if c == 0 && d == 0 && a.is_ascii_uppercase() && b.is_ascii_uppercase() {
            Some([a, b])
        } else {
            None
        }
    }

    pub fn payload<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.offset..self.offset + self.len]
    }
}

/// Walk the block table up to (not including) `ENDB`.
///
/// Archives written by crashed sessions may lack the terminator; reaching the
/// exact end of the data on a block boundary is accepted as well.
pub fn read_blocks(data: &[u8], header: &BlendHeader) -> Result<Vec<Block>> {
    let mut reader = ByteReader::at(data, header.len, header.endian);
    let mut blocks = Vec::new();

    while reader.remaining() > 0 {
        let block = read_block_header(&mut reader, header)?;
        if block.code == END_CODE {
            return Ok(blocks);
        }
        reader.skip(block.len).map_err(|_| {
            StockpileError::CorruptArchive(format!(
                "block '{}' at offset {} overruns the file",
                String::from_utf8_lossy(&block.code),
                block.offset
            ))
        })?;
        blocks.push(block);
    }

    Ok(blocks)
}

fn read_block_header(reader: &mut ByteReader<'_>, header: &BlendHeader) -> Result<Block> {
    let mut code = [0u8; 4];
    code.copy_from_slice(reader.bytes(4)?);

    let (len, old_address, sdna_index, count) = if header.large_blocks {
        let sdna_index = reader.u32()?;
        let old_address = reader.u64()?;
        let len = reader.i64()?;
        let count = reader.i64()?;
        (len, old_address, sdna_index, count)
    } else {
        let len = i64::from(reader.i32()?);
        let old_address = reader.pointer(header.pointer_size)?;
        let sdna_index = reader.u32()?;
        let count = i64::from(reader.i32()?);
        (len, old_address, sdna_index, count)
    };

    if len < 0 || count < 0 {
        return Err(StockpileError::CorruptArchive(format!(
            "negative block size in '{}'",
            String::from_utf8_lossy(&code)
        )));
    }

    Ok(Block {
        code,
        offset: reader.pos(),
        len: len as usize,
        old_address,
        sdna_index,
        count: count as u64,
    })
}
