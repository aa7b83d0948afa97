//! Archive inspection command

use anyhow::{Context, Result};
use std::path::Path;
use stockpile_blend::BlendArchive;

pub fn run(path: &str, marked_only: bool, format: &str) -> Result<()> {
    let source = Path::new(path);
    if !source.is_file() {
        anyhow::bail!("File not found: {}", path);
    }

    let archive =
        BlendArchive::open(source).with_context(|| format!("Failed to read {}", path))?;
    let names = archive.names_by_category(marked_only);

    if format == "json" {
        let categories: serde_json::Map<String, serde_json::Value> = names
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(category, list)| (category.id().to_string(), serde_json::json!(list)))
            .collect();
        let value = serde_json::json!({
            "path": path,
            "header": archive.header(),
            "blocks": archive.block_count(),
            "marked_only": marked_only,
            "records": categories,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let header = archive.header();
    println!("Archive: {}", path);
    println!("  Version: {}", header.version_string());
    println!(
        "  Layout: {}-bit, {:?} endian, {} blocks",
        header.pointer_size * 8,
        header.endian,
        archive.block_count()
    );

    let mut shown = 0usize;
    for (category, list) in names.iter().filter(|(_, list)| !list.is_empty()) {
        println!("\n  {} ({}):", category.label(), list.len());
        for name in list {
            println!("    {}", name);
        }
        shown += list.len();
    }

    if shown == 0 {
        if marked_only {
            println!("\n  No records marked as assets.");
        } else {
            println!("\n  No importable records.");
        }
    }

    Ok(())
}
