//! Typed tables and the row operations the pipeline needs.

use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::IndexMap;

use super::column::{Column, ColumnData, ColumnType};
use crate::error::{RankscopeError, Result};
use crate::input::DataTable;

/// Hashable identity of a cell, used for duplicate detection.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Missing,
    Number(u64),
    Text(&'a str),
}

impl CellKey<'_> {
    fn number(value: f64) -> Self {
        // +0.0 and -0.0 compare equal
        let value = if value == 0.0 { 0.0 } else { value };
        CellKey::Number(value.to_bits())
    }
}

/// A table of typed columns sharing one row count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<Column>,
    rows: usize,
}

impl Frame {
    /// Build a frame from columns of equal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(RankscopeError::Config(format!(
                "column '{}' has {} rows, expected {}",
                bad.name(),
                bad.len(),
                rows
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Infer a typed frame from raw cells.
    pub fn from_table(table: &DataTable) -> Self {
        let columns = table
            .headers
            .iter()
            .enumerate()
            .map(|(index, name)| Column::from_cells(name.clone(), table.column_values(index)))
            .collect();

        Self {
            columns,
            rows: table.row_count(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| RankscopeError::column_not_found(name))
    }

    /// Get a numeric column's cells by name.
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        self.column(name)?
            .as_numeric()
            .ok_or_else(|| RankscopeError::ColumnType {
                column: name.to_string(),
                expected: ColumnType::Numeric.as_str(),
            })
    }

    /// Iterate over numeric columns in table order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.column_type().is_numeric())
    }

    /// Total missing cells across all columns.
    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// Remove rows identical to an earlier row, keeping the first occurrence.
    ///
    /// Returns the number of rows removed.
    pub fn drop_duplicates(&mut self) -> usize {
        let keep: Vec<bool> = {
            let mut seen = HashSet::with_capacity(self.rows);
            (0..self.rows).map(|row| seen.insert(self.row_key(row))).collect()
        };

        let removed = keep.iter().filter(|k| !**k).count();
        if removed > 0 {
            for column in &mut self.columns {
                column.retain(&keep);
            }
            self.rows -= removed;
        }
        removed
    }

    fn row_key(&self, row: usize) -> Vec<CellKey<'_>> {
        self.columns
            .iter()
            .map(|column| match column.data() {
                ColumnData::Numeric(v) => v[row].map_or(CellKey::Missing, CellKey::number),
                ColumnData::Text(v) => v[row].as_deref().map_or(CellKey::Missing, CellKey::Text),
            })
            .collect()
    }

    /// Copy of the given rows, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> Frame {
        Frame {
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
            rows: rows.len(),
        }
    }

    /// Occurrences of each distinct non-missing value, most frequent first.
    ///
    /// Values with equal counts keep the order in which they first appear.
    pub fn value_counts(&self, name: &str) -> Result<IndexMap<String, usize>> {
        let column = self.column(name)?;

        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for row in 0..self.rows {
            if let Some(value) = column.display_value(row) {
                *counts.entry(value).or_insert(0) += 1;
            }
        }
        counts.sort_by(|_, a, _, b| b.cmp(a));
        Ok(counts)
    }

    /// The `n` rows with the largest values in a numeric column, descending.
    ///
    /// Missing values are skipped; ties keep their original order.
    pub fn nlargest(&self, n: usize, name: &str) -> Result<Frame> {
        let values = self.numeric(name)?;

        let mut order: Vec<usize> = (0..self.rows).filter(|&r| values[r].is_some()).collect();
        order.sort_by(|&a, &b| {
            values[b]
                .partial_cmp(&values[a])
                .unwrap_or(Ordering::Equal)
        });
        order.truncate(n);

        Ok(self.take_rows(&order))
    }

    /// Rows whose value in `name` is one of `values`, in original order.
    pub fn filter_in(&self, name: &str, values: &[String]) -> Result<Frame> {
        let column = self.column(name)?;
        let wanted: HashSet<&str> = values.iter().map(String::as_str).collect();

        let rows: Vec<usize> = (0..self.rows)
            .filter(|&row| {
                column
                    .display_value(row)
                    .is_some_and(|v| wanted.contains(v.as_str()))
            })
            .collect();

        Ok(self.take_rows(&rows))
    }
}
