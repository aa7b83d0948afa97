//! Batch import command

use anyhow::{Context, Result};
use stockpile_core::AssetCategory;
use stockpile_import::{run_import, BlendLoader, ImportOutcome, ImportRequest, ImportSettings};
use stockpile_library::ProjectLibrary;
use tracing::info;

pub struct ImportArgs {
    pub path: String,
    pub categories: Vec<AssetCategory>,
    pub all: bool,
    pub marked_only: bool,
    pub format: String,
}

pub fn run(args: ImportArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let request = ImportRequest::from_settings(&args.path, &settings);

    info!(
        path = %args.path,
        categories = request.categories.len(),
        marked_only = request.marked_only,
        "starting import"
    );

    let mut loader = BlendLoader::new();
    let mut project = ProjectLibrary::new();
    let outcome = run_import(&request, &mut loader, &mut project)?;

    if args.format == "json" {
        print_json(&outcome, &project)?;
    } else {
        print_text(&outcome, &project);
    }

    Ok(())
}

/// Saved settings, with command-line flags taking precedence
fn resolve_settings(args: &ImportArgs) -> Result<ImportSettings> {
    let mut settings = ImportSettings::load().context("Failed to load import settings")?;

    if args.all {
        settings.select_all();
    } else if !args.categories.is_empty() {
        settings.select(args.categories.iter().copied());
    }
    if args.marked_only {
        settings.marked_only = true;
    }

    Ok(settings)
}

fn print_text(outcome: &ImportOutcome, project: &ProjectLibrary) {
    println!("{}", outcome.report);

    if !outcome.warnings.is_empty() {
        println!(
            "\n{} of {} archive(s) skipped:",
            outcome.files_failed(),
            outcome.files_attempted
        );
        for warning in &outcome.warnings {
            println!("  {}", warning);
        }
    }

    if let Some(workspace) = project.active_workspace() {
        println!("\nActive workspace: {}", workspace);
    }
}

fn print_json(outcome: &ImportOutcome, project: &ProjectLibrary) -> Result<()> {
    let records: Vec<serde_json::Value> = AssetCategory::ALL
        .iter()
        .flat_map(|c| project.records(*c))
        .map(|r| {
            serde_json::json!({
                "category": r.category,
                "name": r.name,
                "source_name": r.source_name,
                "source": r.source_path,
            })
        })
        .collect();

    let value = serde_json::json!({
        "mode": outcome.mode,
        "summary": outcome.report.to_string(),
        "total": outcome.report.total(),
        "counts": outcome.stats,
        "files_attempted": outcome.files_attempted,
        "warnings": outcome.warnings,
        "records": records,
        "active_workspace": project.active_workspace(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
