//! Loading the named ranking datasets from an archive or directory.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info};

use super::archive::extract_archive;
use super::parser::{Parser, ParserConfig};
use super::source::{DataTable, SourceMetadata};
use crate::error::{RankscopeError, Result};

/// One loaded CSV file.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Name the dataset was requested under.
    pub name: String,
    /// Parsed contents.
    pub table: DataTable,
    /// Where it came from.
    pub source: SourceMetadata,
}

/// Loaded datasets keyed by file name, in load order.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    entries: IndexMap<String, Dataset>,
}

impl Datasets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dataset: Dataset) {
        self.entries.insert(dataset.name.clone(), dataset);
    }

    /// Look up a dataset by file name.
    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.entries.values()
    }

    pub fn tables(&self) -> impl Iterator<Item = &DataTable> {
        self.entries.values().map(|d| &d.table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of row counts over all datasets.
    pub fn total_rows(&self) -> usize {
        self.entries.values().map(|d| d.table.row_count()).sum()
    }
}

/// Reads a fixed list of CSV files, optionally unpacking them from a zip first.
pub struct Loader {
    files: Vec<String>,
    parser: Parser,
}

impl Loader {
    /// Create a loader for the given file names.
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            parser: Parser::new(),
        }
    }

    /// Use a custom parser configuration.
    pub fn with_parser(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::with_config(config);
        self
    }

    /// Extract `archive` into `target_dir`, then read every configured file.
    pub fn load(&self, archive: &Path, target_dir: &Path) -> Result<Datasets> {
        info!(archive = %archive.display(), "extracting archive");
        let extracted = extract_archive(archive, target_dir)?;
        self.read_all(target_dir, &extracted)
    }

    /// Read every configured file from an already populated directory.
    pub fn load_dir(&self, dir: &Path) -> Result<Datasets> {
        self.read_all(dir, &[])
    }

    fn read_all(&self, dir: &Path, extracted: &[PathBuf]) -> Result<Datasets> {
        let mut datasets = Datasets::new();

        for name in &self.files {
            let path = locate(dir, name, extracted).ok_or_else(|| RankscopeError::MissingDataset {
                name: name.clone(),
                dir: dir.to_path_buf(),
            })?;
            debug!(name = %name, path = %path.display(), "reading dataset");

            let (table, source) = self.parser.parse_file(&path)?;
            datasets.insert(Dataset {
                name: name.clone(),
                table,
                source,
            });
        }

        info!(
            datasets = datasets.len(),
            rows = datasets.total_rows(),
            "loaded datasets"
        );
        Ok(datasets)
    }
}

/// Find `name` directly under `dir`, or anywhere among the extracted files
/// when the archive wraps its contents in a folder.
fn locate(dir: &Path, name: &str, extracted: &[PathBuf]) -> Option<PathBuf> {
    let direct = dir.join(name);
    if direct.is_file() {
        return Some(direct);
    }

    extracted
        .iter()
        .find(|p| p.file_name().is_some_and(|f| f == name) && p.is_file())
        .cloned()
}
