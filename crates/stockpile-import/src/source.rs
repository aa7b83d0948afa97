//! Path-type detection and archive enumeration

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use stockpile_blend::ARCHIVE_EXTENSION;
use stockpile_core::{Result, StockpileError};

/// Whether the target path named a directory or a single archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    Directory,
    File,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Directory => f.write_str("directory"),
            ImportMode::File => f.write_str("file"),
        }
    }
}

/// One archive to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path to the archive
    pub path: PathBuf,
    /// Directory containing the archive
    pub directory: PathBuf,
    /// File name, used in warnings
    pub file_name: String,
}

impl SourceFile {
    pub fn new<P: AsRef<Path>>(directory: P, file_name: &str) -> Self {
        let directory = directory.as_ref().to_path_buf();
        Self {
            path: directory.join(file_name),
            directory,
            file_name: file_name.to_string(),
        }
    }
}

/// The archives selected by a target path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub mode: ImportMode,
    pub base_dir: PathBuf,
    pub files: Vec<SourceFile>,
}

/// True when a file name carries the archive extension
pub fn is_archive_name(name: &str) -> bool {
    name.ends_with(ARCHIVE_EXTENSION)
}

/// Classify `path` and list the archives it selects.
///
/// A directory selects its immediate `.blend` children, sorted by name; a
/// `.blend` file selects itself. Anything else is an invalid path.
pub fn resolve_sources<P: AsRef<Path>>(path: P) -> Result<SourceSet> {
    let path = absolute(path.as_ref())?;

    if path.is_dir() {
        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if is_archive_name(&name) && entry.path().is_file() {
                names.push(name);
            }
        }

        if names.is_empty() {
            return Err(StockpileError::EmptyDirectory(path.display().to_string()));
        }
        names.sort();

        let files = names.iter().map(|n| SourceFile::new(&path, n)).collect();
        return Ok(SourceSet {
            mode: ImportMode::Directory,
            base_dir: path,
            files,
        });
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| is_archive_name(n))
        .map(str::to_string);

    match (file_name, path.parent()) {
        (Some(name), Some(parent)) if path.is_file() => Ok(SourceSet {
            mode: ImportMode::File,
            base_dir: parent.to_path_buf(),
            files: vec![SourceFile::new(parent, &name)],
        }),
        _ => Err(StockpileError::InvalidPath(path.display().to_string())),
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
