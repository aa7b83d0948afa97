//! CLI command implementations

pub mod categories;
pub mod import;
pub mod inspect;
