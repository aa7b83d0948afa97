//! Stockpile Library - The destination project
//!
//! An in-memory stand-in for the open project that imports write into:
//! per-category record slots, host-style unique naming, and workspace
//! activation in the two parameter forms hosts expose.

mod project;
mod types;

pub use project::ProjectLibrary;
pub use types::{ImportedRecord, WorkspaceApi};
