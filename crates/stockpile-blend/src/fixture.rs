//! Synthetic archive builder for tests

use crate::bytes::Endian;
use crate::codes::id_code;
use stockpile_core::AssetCategory;

const ID_NAME_LEN: usize = 66;

/// Builds minimal but well-formed archives: a header, one block per
/// datablock, a `DNA1` block describing the `ID` struct, and `ENDB`.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    pointer_size: usize,
    endian: Endian,
    large_blocks: bool,
    asset_data: bool,
    extra_fields: Vec<String>,
    datablocks: Vec<(AssetCategory, String, bool)>,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            pointer_size: 8,
            endian: Endian::Little,
            large_blocks: false,
            asset_data: true,
            extra_fields: Vec::new(),
            datablocks: Vec::new(),
        }
    }

    pub fn pointer_size(mut self, size: usize) -> Self {
        self.pointer_size = size;
        self
    }

    pub fn big_endian(mut self) -> Self {
        self.endian = Endian::Big;
        self
    }

    /// Use the `BLENDER17-01v0500` header with 64-bit block headers
    pub fn large_blocks(mut self) -> Self {
        self.large_blocks = true;
        self.pointer_size = 8;
        self
    }

    /// Lay out `ID` without the `asset_data` pointer, as older writers did
    pub fn without_asset_data(mut self) -> Self {
        self.asset_data = false;
        self
    }

    /// Declare an extra `short` field in `ID` ahead of `name`.
    ///
    /// Only the DNA changes; datablock payloads keep the regular layout, so
    /// the declared offsets no longer match the data.
    pub fn field_before_name(mut self, declaration: &str) -> Self {
        self.extra_fields.push(declaration.to_string());
        self
    }

    pub fn datablock(mut self, category: AssetCategory, name: &str, is_asset: bool) -> Self {
        self.datablocks.push((category, name.to_string(), is_asset));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_header(&mut out);

        let mut address = 0x1000u64;
        for (category, name, is_asset) in &self.datablocks {
            let code = id_code(*category);
            let payload = self.id_payload(code, name, *is_asset);
            self.write_block(&mut out, [code[0], code[1], 0, 0], address, &payload);
            address += 0x100;
        }

        let dna = self.dna_payload();
        self.write_block(&mut out, *b"DNA1", 0, &dna);
        self.write_block(&mut out, *b"ENDB", 0, &[]);
        out
    }

    fn write_header(&self, out: &mut Vec<u8>) {
        let endian = match self.endian {
            Endian::Little => b'v',
            Endian::Big => b'V',
        };
        if self.large_blocks {
            out.extend_from_slice(b"BLENDER17-01");
            out.push(endian);
            out.extend_from_slice(b"0500");
        } else {
            out.extend_from_slice(b"BLENDER");
            out.push(if self.pointer_size == 4 { b'_' } else { b'-' });
            out.push(endian);
            out.extend_from_slice(b"402");
        }
    }

    fn write_block(&self, out: &mut Vec<u8>, code: [u8; 4], address: u64, payload: &[u8]) {
        out.extend_from_slice(&code);
        if self.large_blocks {
            self.put_u32(out, 0);
            self.put_u64(out, address);
            self.put_u64(out, payload.len() as u64);
            self.put_u64(out, 1);
        } else {
            self.put_u32(out, payload.len() as u32);
            self.put_pointer(out, address);
            self.put_u32(out, 0);
            self.put_u32(out, 1);
        }
        out.extend_from_slice(payload);
    }

    /// Field declarations of the synthetic `ID` struct: (type index, name)
    fn id_fields(&self) -> Vec<(u16, &str)> {
        // types: 0 char, 1 short, 2 void, 3 ID, 4 Library, 5 AssetMetaData
        let mut fields = vec![(2, "*next"), (2, "*prev"), (3, "*newid"), (4, "*lib")];
        if self.asset_data {
            fields.push((5, "*asset_data"));
        }
        fields.extend(self.extra_fields.iter().map(|d| (1, d.as_str())));
        fields.push((0, "name[66]"));
        fields.push((1, "flag"));
        fields.push((1, "tag"));
        fields
    }

    fn id_size(&self) -> usize {
        let pointers = if self.asset_data { 5 } else { 4 };
        pointers * self.pointer_size + ID_NAME_LEN + 2 + 2
    }

    fn id_payload(&self, code: [u8; 2], name: &str, is_asset: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.id_size());
        for _ in 0..4 {
            self.put_pointer(&mut out, 0);
        }
        if self.asset_data {
            self.put_pointer(&mut out, if is_asset { 0xa55e7 } else { 0 });
        }
        let mut raw = [0u8; ID_NAME_LEN];
        let full = [&code[..], name.as_bytes()].concat();
        let len = full.len().min(ID_NAME_LEN - 1);
        raw[..len].copy_from_slice(&full[..len]);
        out.extend_from_slice(&raw);
        out.extend_from_slice(&[0u8; 4]);
        out
    }

    fn dna_payload(&self) -> Vec<u8> {
        let fields = self.id_fields();
        let types = ["char", "short", "void", "ID", "Library", "AssetMetaData"];
        let sizes = [1u16, 2, 0, self.id_size() as u16, 0, 0];

        let mut out = b"SDNA".to_vec();
        out.extend_from_slice(b"NAME");
        self.put_u32(&mut out, fields.len() as u32);
        for (_, name) in &fields {
            out.extend_from_slice(name.as_bytes());
            out.push(0);
        }
        pad4(&mut out);

        out.extend_from_slice(b"TYPE");
        self.put_u32(&mut out, types.len() as u32);
        for ty in types {
            out.extend_from_slice(ty.as_bytes());
            out.push(0);
        }
        pad4(&mut out);

        out.extend_from_slice(b"TLEN");
        for size in sizes {
            self.put_u16(&mut out, size);
        }
        pad4(&mut out);

        out.extend_from_slice(b"STRC");
        self.put_u32(&mut out, 1);
        self.put_u16(&mut out, 3);
        self.put_u16(&mut out, fields.len() as u16);
        for (i, (ty, _)) in fields.iter().enumerate() {
            self.put_u16(&mut out, *ty);
            self.put_u16(&mut out, i as u16);
        }
        out
    }

    fn put_u16(&self, out: &mut Vec<u8>, v: u16) {
        match self.endian {
            Endian::Little => out.extend_from_slice(&v.to_le_bytes()),
            Endian::Big => out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn put_u32(&self, out: &mut Vec<u8>, v: u32) {
        match self.endian {
            Endian::Little => out.extend_from_slice(&v.to_le_bytes()),
            Endian::Big => out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn put_u64(&self, out: &mut Vec<u8>, v: u64) {
        match self.endian {
            Endian::Little => out.extend_from_slice(&v.to_le_bytes()),
            Endian::Big => out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn put_pointer(&self, out: &mut Vec<u8>, v: u64) {
        if self.pointer_size == 4 {
            self.put_u32(out, v as u32);
        } else {
            self.put_u64(out, v);
        }
    }
}

fn pad4(out: &mut Vec<u8>) {
    while out.len() % 4 != 0 {
        out.push(0);
    }
}
