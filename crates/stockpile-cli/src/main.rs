//! Stockpile CLI - Bulk-import asset libraries from `.blend` archives

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{categories, import, inspect};
use stockpile_core::AssetCategory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stockpile")]
#[command(about = "Bulk-import assets from .blend libraries", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import assets from a .blend file or a directory of them
    Import {
        /// Path to a .blend file or a directory containing .blend files
        path: String,

        /// Asset category to import (repeatable, e.g. -c meshes -c materials)
        #[arg(short, long = "category", value_parser = parse_category)]
        categories: Vec<AssetCategory>,

        /// Import every category
        #[arg(long, conflicts_with = "categories")]
        all: bool,

        /// Only import records marked as assets
        #[arg(long)]
        marked_only: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// List the records a .blend file offers
    Inspect {
        /// Path to a .blend file
        path: String,

        /// Only list records marked as assets
        #[arg(long)]
        marked_only: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Show the importable asset categories
    Categories,
}

fn parse_category(s: &str) -> Result<AssetCategory, String> {
    s.parse::<AssetCategory>().map_err(|_| {
        let valid: Vec<&str> = AssetCategory::ALL.iter().map(|c| c.id()).collect();
        format!("unknown category '{}'; valid values: {}", s, valid.join(", "))
    })
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stockpile_cli=info,stockpile_import=warn,stockpile_blend=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            path,
            categories,
            all,
            marked_only,
            format,
        } => import::run(import::ImportArgs {
            path,
            categories,
            all,
            marked_only,
            format,
        }),
        Commands::Inspect {
            path,
            marked_only,
            format,
        } => inspect::run(&path, marked_only, &format),
        Commands::Categories => categories::run(),
    }
}
