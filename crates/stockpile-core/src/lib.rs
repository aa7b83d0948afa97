//! Stockpile Core - Foundational types for Stockpile
//!
//! This crate provides the types that all other Stockpile crates depend on:
//! - `AssetCategory` - The fixed table of importable record kinds
//! - `CategoryMap` - Dense storage with one slot per category
//! - Error types and Result alias

mod category;
mod category_map;
mod error;

pub use category::AssetCategory;
pub use category_map::CategoryMap;
pub use error::{Result, StockpileError};
