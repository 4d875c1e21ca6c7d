//! Data source abstraction and metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Cell values read as missing, after trimming.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Metadata about a loaded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Represents parsed tabular data with untyped cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Row-wise union of several tables, matching columns by name.
    ///
    /// The resulting header is the union of all headers in order of first
    /// appearance. Rows keep their original order; cells for columns a source
    /// table lacks are left empty, which reads as missing.
    pub fn concat<'a>(tables: impl IntoIterator<Item = &'a DataTable>) -> DataTable {
        let tables: Vec<&DataTable> = tables.into_iter().collect();

        let mut positions: IndexMap<&str, usize> = IndexMap::new();
        for table in &tables {
            for header in &table.headers {
                let next = positions.len();
                positions.entry(header.as_str()).or_insert(next);
            }
        }

        let width = positions.len();
        let mut rows = Vec::with_capacity(tables.iter().map(|t| t.row_count()).sum());

        for table in &tables {
            let mapping: Vec<usize> = table.headers.iter().map(|h| positions[h.as_str()]).collect();
            for row in &table.rows {
                let mut combined = vec![String::new(); width];
                for (value, &target) in row.iter().zip(&mapping) {
                    combined[target] = value.clone();
                }
                rows.push(combined);
            }
        }

        let headers = positions.keys().map(|h| h.to_string()).collect();
        DataTable::new(headers, rows)
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        NULL_MARKERS.contains(&value.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_is_null_value() {
        assert!(DataTable::is_null_value(""));
        assert!(DataTable::is_null_value("  "));
        assert!(DataTable::is_null_value("NA"));
        assert!(DataTable::is_null_value("N/A"));
        assert!(DataTable::is_null_value("NaN"));
        assert!(DataTable::is_null_value("null"));
        assert!(!DataTable::is_null_value("value"));
        assert!(!DataTable::is_null_value("0"));
        assert!(!DataTable::is_null_value("-"));
    }

    #[test]
    fn test_concat_unions_columns_in_order() {
        let a = table(&["Name", "revenue_ttm"], &[&["Apple", "300"]]);
        let b = table(&["Name", "country"], &[&["Shell", "UK"], &["Sony", "Japan"]]);

        let combined = DataTable::concat([&a, &b]);

        assert_eq!(combined.headers, vec!["Name", "revenue_ttm", "country"]);
        assert_eq!(combined.row_count(), 3);
        assert_eq!(combined.rows[0], vec!["Apple", "300", ""]);
        assert_eq!(combined.rows[1], vec!["Shell", "", "UK"]);
        assert_eq!(combined.rows[2], vec!["Sony", "", "Japan"]);
    }

    #[test]
    fn test_concat_reordered_headers() {
        let a = table(&["x", "y"], &[&["1", "2"]]);
        let b = table(&["y", "x"], &[&["3", "4"]]);

        let combined = DataTable::concat([&a, &b]);

        assert_eq!(combined.headers, vec!["x", "y"]);
        assert_eq!(combined.rows[1], vec!["4", "3"]);
    }

    #[test]
    fn test_column_by_name() {
        let t = table(&["a", "b"], &[&["1", "2"], &["3"]]);
        assert_eq!(t.column_by_name("b"), Some(vec!["2", ""]));
        assert_eq!(t.column_by_name("c"), None);
    }
}
