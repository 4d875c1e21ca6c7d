//! CSV parser producing untyped data tables.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{DataTable, SourceMetadata};
use crate::error::{RankscopeError, Result};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses delimited data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| RankscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.parse_bytes(&contents)?;
        debug!(
            file = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "parsed dataset"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            records.push(result?);
        }

        let headers: Vec<String> = if self.config.has_header {
            rename_duplicates(reader.headers()?.iter())
        } else {
            let width = records.iter().map(|r| r.len()).max().unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(RankscopeError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let rows = records
            .iter()
            .map(|record| {
                let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                // Short rows are padded with missing cells, long rows truncated
                row.resize(expected_cols, String::new());
                row
            })
            .collect();

        Ok(DataTable::new(headers, rows))
    }
}

/// Suffix repeated header names `.1`, `.2`, ... so every column keeps its
/// own position.
fn rename_duplicates<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let names: Vec<&str> = names.collect();
    let mut taken: HashSet<String> = names.iter().map(|n| n.to_string()).collect();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut renamed = Vec::with_capacity(names.len());

    for name in names {
        let count = seen.entry(name).or_insert(0);
        if *count == 0 {
            renamed.push(name.to_string());
        } else {
            let mut candidate = format!("{}.{}", name, count);
            while taken.contains(&candidate) {
                *count += 1;
                candidate = format!("{}.{}", name, count);
            }
            taken.insert(candidate.clone());
            renamed.push(candidate);
        }
        *count += 1;
    }
    renamed
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"Rank,Name,price (GBP),country\n1,Apple,150.2,United States\n2,Saudi Aramco,6.4,Saudi Arabia";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(table.headers, vec!["Rank", "Name", "price (GBP)", "country"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 1), Some("Apple"));
        assert_eq!(table.get(1, 3), Some("Saudi Arabia"));
    }

    #[test]
    fn test_parse_quoted_field_with_delimiter() {
        let parser = Parser::new();
        let data = b"Name,country\n\"Berkshire Hathaway, Inc.\",United States\n";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(table.get(0, 0), Some("Berkshire Hathaway, Inc."));
    }

    #[test]
    fn test_parse_pads_and_truncates_rows() {
        let parser = Parser::new();
        let data = b"a,b,c\n1,2\n3,4,5,6\n";
        let table = parser.parse_bytes(data).unwrap();

        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["3", "4", "5"]);
    }

    #[test]
    fn test_parse_header_only() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"a,b\n").unwrap();

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_parse_empty_input() {
        let parser = Parser::new();
        assert!(matches!(
            parser.parse_bytes(b""),
            Err(RankscopeError::EmptyData(_))
        ));
    }

    #[test]
    fn test_parse_without_header() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes(b"1,2\n3,4\n").unwrap();

        assert_eq!(table.headers, vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes(b"a\n1\n2\n3\n").unwrap();

        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_duplicate_headers_renamed() {
        let parser = Parser::new();
        let table = parser
            .parse_bytes(b"Name,price,price,price.1\nApple,1,2,3\n")
            .unwrap();

        assert_eq!(table.headers, vec!["Name", "price", "price.2", "price.1"]);
        assert_eq!(table.column_by_name("price.2").unwrap(), vec!["2"]);
        assert_eq!(table.column_by_name("price.1").unwrap(), vec!["3"]);
    }

    #[test]
    fn test_duplicate_headers_survive_concat() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"a,a\n1,2\n").unwrap();
        let combined = DataTable::concat([&table]);

        assert_eq!(combined.headers, vec!["a", "a.1"]);
        assert_eq!(combined.rows[0], vec!["1", "2"]);
    }
}
