//! Struct DNA: the schema embedded in every archive
//!
//! The `DNA1` block lists field names, type names, type sizes and struct
//! layouts. Only enough of it is decoded to locate fields of the `ID` header
//! that starts every datablock.

use crate::bytes::{ByteReader, Endian};
use stockpile_core::{Result, StockpileError};

/// A struct field as declared in the DNA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnaField {
    /// Type name, e.g. `char`
    pub type_name: String,
    /// Declared name including pointer and array markers, e.g. `name[66]`
    pub declaration: String,
    /// Byte offset inside the owning struct
    pub offset: usize,
    /// Size in bytes
    pub size: usize,
}

impl DnaField {
    /// Bare field name with `*`, `(`, `)` and array suffixes stripped
    pub fn name(&self) -> &str {
        bare_name(&self.declaration)
    }

    pub fn is_pointer(&self) -> bool {
        self.declaration.starts_with('*') || self.declaration.starts_with('(')
    }
}

#[derive(Debug, Clone)]
pub struct DnaStruct {
    pub type_name: String,
    pub size: usize,
    pub fields: Vec<DnaField>,
}

impl DnaStruct {
    pub fn field(&self, name: &str) -> Option<&DnaField> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

/// Decoded struct DNA
#[derive(Debug, Clone)]
pub struct Sdna {
    structs: Vec<DnaStruct>,
}

impl Sdna {
    /// Decode the payload of a `DNA1` block
    pub fn parse(payload: &[u8], endian: Endian, pointer_size: usize) -> Result<Self> {
        let mut reader = ByteReader::new(payload, endian);
        reader.tag(b"SDNA")?;

        reader.tag(b"NAME")?;
        let names = read_strings(&mut reader)?;
        reader.align4();

        reader.tag(b"TYPE")?;
        let types = read_strings(&mut reader)?;
        reader.align4();

        reader.tag(b"TLEN")?;
        let mut type_sizes = Vec::with_capacity(types.len());
        for _ in 0..types.len() {
            type_sizes.push(reader.u16()? as usize);
        }
        reader.align4();

        reader.tag(b"STRC")?;
        let struct_count = reader.u32()? as usize;
        let mut structs = Vec::with_capacity(struct_count.min(4096));
        for _ in 0..struct_count {
            let type_index = reader.u16()? as usize;
            let field_count = reader.u16()? as usize;
            let type_name = lookup(&types, type_index, "type")?;

            let mut fields = Vec::with_capacity(field_count);
            let mut offset = 0usize;
            for _ in 0..field_count {
                let field_type = reader.u16()? as usize;
                let field_name = reader.u16()? as usize;
                let declaration = lookup(&names, field_name, "name")?;
                let type_size = *type_sizes.get(field_type).ok_or_else(|| {
                    StockpileError::CorruptArchive(format!(
                        "DNA type index {} out of range",
                        field_type
                    ))
                })?;
                let size = field_size(declaration, type_size, pointer_size)?;
                fields.push(DnaField {
                    type_name: lookup(&types, field_type, "type")?.to_string(),
                    declaration: declaration.to_string(),
                    offset,
                    size,
                });
                offset = offset.checked_add(size).ok_or_else(|| {
                    StockpileError::CorruptArchive(format!(
                        "DNA struct '{}' is larger than the address space",
                        type_name
                    ))
                })?;
            }

            structs.push(DnaStruct {
                type_name: type_name.to_string(),
                size: type_sizes.get(type_index).copied().unwrap_or(offset),
                fields,
            });
        }

        Ok(Self { structs })
    }

    pub fn find_struct(&self, type_name: &str) -> Option<&DnaStruct> {
        self.structs.iter().find(|s| s.type_name == type_name)
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}

/// Offsets of the `ID` header fields needed to list datablocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdLayout {
    pub name_offset: usize,
    pub name_len: usize,
    /// Absent in archives written before asset metadata existed
    pub asset_data_offset: Option<usize>,
    pub pointer_size: usize,
}

impl IdLayout {
    pub fn from_sdna(sdna: &Sdna, pointer_size: usize) -> Result<Self> {
        let id = sdna.find_struct("ID").ok_or_else(|| {
            StockpileError::CorruptArchive("DNA has no ID struct".to_string())
        })?;
        let name = id
            .field("name")
            .filter(|f| !f.is_pointer())
            .ok_or_else(|| {
                StockpileError::CorruptArchive("DNA ID struct has no name field".to_string())
            })?;
        let asset_data_offset = id
            .field("asset_data")
            .filter(|f| f.is_pointer())
            .map(|f| f.offset);

        Ok(Self {
            name_offset: name.offset,
            name_len: name.size,
            asset_data_offset,
            pointer_size,
        })
    }
}

fn read_strings<'a>(reader: &mut ByteReader<'a>) -> Result<Vec<&'a str>> {
    let count = reader.u32()? as usize;
    let mut out = Vec::with_capacity(count.min(65536));
    for _ in 0..count {
        out.push(reader.cstr()?);
    }
    Ok(out)
}

fn lookup<'a>(table: &[&'a str], index: usize, what: &str) -> Result<&'a str> {
    table.get(index).copied().ok_or_else(|| {
        StockpileError::CorruptArchive(format!("DNA {} index {} out of range", what, index))
    })
}

fn bare_name(declaration: &str) -> &str {
    let trimmed = declaration.trim_start_matches(['*', '(']);
    let end = trimmed
        .find(|c: char| c == '[' || c == ')' || c == '(')
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}

/// Product of all `[n]` dimensions in a declaration, 1 if none.
/// `None` when the product does not fit in `usize`.
fn array_len(declaration: &str) -> Option<usize> {
    let mut total = 1usize;
    let mut rest = declaration;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            break;
        };
        if let Ok(n) = after[..close].trim().parse::<usize>() {
            total = total.checked_mul(n)?;
        }
        rest = &after[close + 1..];
    }
    Some(total)
}

fn field_size(declaration: &str, type_size: usize, pointer_size: usize) -> Result<usize> {
    if declaration.starts_with('(') {
        // function pointer
        return Ok(pointer_size);
    }
    let element = if declaration.starts_with('*') {
        pointer_size
    } else {
        type_size
    };
    array_len(declaration)
        .and_then(|len| element.checked_mul(len))
        .ok_or_else(|| {
            StockpileError::CorruptArchive(format!("DNA field '{}' size overflows", declaration))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name() {
        assert_eq!(bare_name("name[66]"), "name");
        assert_eq!(bare_name("*asset_data"), "asset_data");
        assert_eq!(bare_name("**mat"), "mat");
        assert_eq!(bare_name("(*func)()"), "func");
        assert_eq!(bare_name("flag"), "flag");
    }

    #[test]
    fn test_field_sizes() {
        assert_eq!(field_size("name[66]", 1, 8).unwrap(), 66);
        assert_eq!(field_size("*next", 0, 8).unwrap(), 8);
        assert_eq!(field_size("*next", 0, 4).unwrap(), 4);
        assert_eq!(field_size("mat[4][4]", 4, 8).unwrap(), 64);
        assert_eq!(field_size("*mtex[18]", 0, 8).unwrap(), 144);
        assert_eq!(field_size("(*draw)()", 0, 4).unwrap(), 4);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_array_is_corrupt() {
        assert_eq!(array_len("big[4294967296][4294967296]"), None);
        let err = field_size("big[4294967296][4294967296]", 2, 8).unwrap_err();
        assert!(matches!(err, StockpileError::CorruptArchive(msg) if msg.contains("big")));
        assert!(field_size("*ptrs[9223372036854775807]", 0, 8).is_err());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_struct_offsets_that_overflow_are_corrupt() {
        // two fields that each fit but whose running offset does not
        let mut dna = b"SDNA".to_vec();
        dna.extend_from_slice(b"NAME");
        dna.extend_from_slice(&2u32.to_le_bytes());
        dna.extend_from_slice(b"a[9223372036854775808]\0b[9223372036854775808]\0");
        while dna.len() % 4 != 0 {
            dna.push(0);
        }
        dna.extend_from_slice(b"TYPE");
        dna.extend_from_slice(&2u32.to_le_bytes());
        dna.extend_from_slice(b"char\0ID\0");
        while dna.len() % 4 != 0 {
            dna.push(0);
        }
        dna.extend_from_slice(b"TLEN");
        dna.extend_from_slice(&1u16.to_le_bytes());
        dna.extend_from_slice(&0u16.to_le_bytes());
        dna.extend_from_slice(b"STRC");
        dna.extend_from_slice(&1u32.to_le_bytes());
        for v in [1u16, 2, 0, 0, 0, 1] {
            dna.extend_from_slice(&v.to_le_bytes());
        }

        let err = Sdna::parse(&dna, Endian::Little, 8).unwrap_err();
        assert!(matches!(err, StockpileError::CorruptArchive(msg) if msg.contains("'ID'")));
    }

    fn build_dna(with_asset_data: bool) -> Vec<u8> {
        let mut names = vec!["*next", "*prev"];
        if with_asset_data {
            names.push("*asset_data");
        }
        names.push("name[66]");
        names.push("flag");

        let types = ["char", "short", "void", "ID"];
        let sizes: [u16; 4] = [1, 2, 0, if with_asset_data { 92 } else { 84 }];

        let mut out = b"SDNA".to_vec();
        out.extend_from_slice(b"NAME");
        out.extend_from_slice(&(names.len() as u32).to_le_bytes());
        for n in &names {
            out.extend_from_slice(n.as_bytes());
            out.push(0);
        }
        while out.len() % 4 != 0 {
            out.push(0);
        }
        out.extend_from_slice(b"TYPE");
        out.extend_from_slice(&(types.len() as u32).to_le_bytes());
        for t in &types {
            out.extend_from_slice(t.as_bytes());
            out.push(0);
        }
        while out.len() % 4 != 0 {
            out.push(0);
        }
        out.extend_from_slice(b"TLEN");
        for s in sizes {
            out.extend_from_slice(&s.to_le_bytes());
        }
        while out.len() % 4 != 0 {
            out.push(0);
        }
        out.extend_from_slice(b"STRC");
        out.extend_from_slice(&1u32.to_le_bytes());
        out.extend_from_slice(&3u16.to_le_bytes());
        out.extend_from_slice(&(names.len() as u16).to_le_bytes());
        for (i, n) in names.iter().enumerate() {
            let ty: u16 = if n.starts_with('*') {
                2
            } else if *n == "flag" {
                1
            } else {
                0
            };
            out.extend_from_slice(&ty.to_le_bytes());
            out.extend_from_slice(&(i as u16).to_le_bytes());
        }
        out
    }

    #[test]
    fn test_id_layout_with_asset_data() {
        let sdna = Sdna::parse(&build_dna(true), Endian::Little, 8).unwrap();
        assert_eq!(sdna.len(), 1);
        let layout = IdLayout::from_sdna(&sdna, 8).unwrap();
        assert_eq!(layout.asset_data_offset, Some(16));
        assert_eq!(layout.name_offset, 24);
        assert_eq!(layout.name_len, 66);
    }

    #[test]
    fn test_id_layout_without_asset_data() {
        let sdna = Sdna::parse(&build_dna(false), Endian::Little, 4).unwrap();
        let layout = IdLayout::from_sdna(&sdna, 4).unwrap();
        assert_eq!(layout.asset_data_offset, None);
        assert_eq!(layout.name_offset, 8);
    }

    #[test]
    fn test_bad_tag_is_corrupt() {
        let err = Sdna::parse(b"SDNAXXXX", Endian::Little, 8).unwrap_err();
        assert!(matches!(err, StockpileError::CorruptArchive(_)));
    }
}
