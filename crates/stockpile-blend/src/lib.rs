//! Stockpile Blend - Reader for `.blend` archives
//!
//! Decodes just enough of the format to list the datablocks an archive
//! offers: the file header, the block table, and the struct DNA needed to
//! find each datablock's name and asset flag.

mod archive;
mod block;
mod bytes;
mod codes;
mod dna;
mod header;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

pub use archive::{BlendArchive, Datablock};
pub use block::Block;
pub use bytes::Endian;
pub use codes::{category_for_code, id_code};
pub use dna::{DnaField, DnaStruct, IdLayout, Sdna};
pub use header::BlendHeader;

/// File extension of archives, including the dot
pub const ARCHIVE_EXTENSION: &str = ".blend";
