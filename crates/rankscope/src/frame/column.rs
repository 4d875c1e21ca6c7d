//! Typed columns and type inference.

use serde::{Deserialize, Serialize};

use crate::input::DataTable;

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Every non-missing value parses as a number.
    Numeric,
    /// Anything else.
    Text,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Numeric)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Text => "text",
        }
    }
}

/// Cell storage for a column. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Numeric(values))
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self::new(name, ColumnData::Text(values))
    }

    /// Build a column from raw cells, inferring its type.
    ///
    /// A column is numeric when every non-missing cell parses as a float,
    /// including the degenerate case of a column with no values at all.
    pub fn from_cells<'a>(name: impl Into<String>, cells: impl IntoIterator<Item = &'a str>) -> Self {
        let cells: Vec<Option<&str>> = cells
            .into_iter()
            .map(|c| (!DataTable::is_null_value(c)).then_some(c))
            .collect();

        let parsed: Option<Vec<Option<f64>>> = cells
            .iter()
            .map(|cell| match cell {
                None => Some(None),
                Some(raw) => parse_number(raw).map(Some),
            })
            .collect();

        match parsed {
            Some(values) => Self::numeric(name, values),
            None => Self::text(
                name,
                cells.into_iter().map(|c| c.map(str::to_string)).collect(),
            ),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn column_type(&self) -> ColumnType {
        match self.data {
            ColumnData::Numeric(_) => ColumnType::Numeric,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).is_some_and(Option::is_none),
            ColumnData::Text(v) => v.get(row).is_some_and(Option::is_none),
        }
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Row indices of missing cells.
    pub fn missing_rows(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.is_missing(i)).collect()
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&[Option<String>]> {
        match &self.data {
            ColumnData::Text(v) => Some(v),
            ColumnData::Numeric(_) => None,
        }
    }

    /// Non-missing numeric values in row order. Empty for text columns.
    pub fn present_numbers(&self) -> Vec<f64> {
        self.as_numeric()
            .map(|v| v.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Render a cell for display or grouping.
    pub fn display_value(&self, row: usize) -> Option<String> {
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).copied().flatten().map(format_number),
            ColumnData::Text(v) => v.get(row).cloned().flatten(),
        }
    }

    /// Replace every missing cell of a numeric column, returning the rows filled.
    pub(crate) fn fill_numeric(&mut self, value: f64) -> Vec<usize> {
        let mut filled = Vec::new();
        if let ColumnData::Numeric(cells) = &mut self.data {
            for (row, cell) in cells.iter_mut().enumerate() {
                if cell.is_none() {
                    *cell = Some(value);
                    filled.push(row);
                }
            }
        }
        filled
    }

    /// Replace every missing cell of a text column, returning the rows filled.
    pub(crate) fn fill_text(&mut self, value: &str) -> Vec<usize> {
        let mut filled = Vec::new();
        if let ColumnData::Text(cells) = &mut self.data {
            for (row, cell) in cells.iter_mut().enumerate() {
                if cell.is_none() {
                    *cell = Some(value.to_string());
                    filled.push(row);
                }
            }
        }
        filled
    }

    /// Copy of the given rows, in the given order.
    pub(crate) fn take(&self, rows: &[usize]) -> Column {
        let data = match &self.data {
            ColumnData::Numeric(v) => ColumnData::Numeric(rows.iter().map(|&r| v[r]).collect()),
            ColumnData::Text(v) => ColumnData::Text(rows.iter().map(|&r| v[r].clone()).collect()),
        };
        Column::new(self.name.clone(), data)
    }

    /// Keep only the rows whose mask entry is true.
    pub(crate) fn retain(&mut self, keep: &[bool]) {
        let mut mask = keep.iter();
        match &mut self.data {
            ColumnData::Numeric(v) => v.retain(|_| *mask.next().unwrap_or(&true)),
            ColumnData::Text(v) => v.retain(|_| *mask.next().unwrap_or(&true)),
        }
    }
}

/// Parse a trimmed cell as a float. NaN is treated as unparseable since it is
/// already part of the missing vocabulary.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Format a number the way it is shown in reports and chart labels.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_numeric_with_missing() {
        let col = Column::from_cells("revenue_ttm", ["10", "20", "", "40.5"]);

        assert_eq!(col.column_type(), ColumnType::Numeric);
        assert_eq!(
            col.as_numeric().unwrap(),
            &[Some(10.0), Some(20.0), None, Some(40.5)]
        );
        assert_eq!(col.missing_count(), 1);
        assert_eq!(col.missing_rows(), vec![2]);
    }

    #[test]
    fn test_infer_text() {
        let col = Column::from_cells("country", ["United States", "NA", "42"]);

        assert_eq!(col.column_type(), ColumnType::Text);
        assert_eq!(
            col.as_text().unwrap(),
            &[Some("United States".to_string()), None, Some("42".to_string())]
        );
    }

    #[test]
    fn test_all_missing_is_numeric() {
        let col = Column::from_cells("dividend_yield_ttm", ["", "NaN"]);

        assert_eq!(col.column_type(), ColumnType::Numeric);
        assert_eq!(col.missing_count(), 2);
    }

    #[test]
    fn test_scientific_and_signed_numbers() {
        let col = Column::from_cells("x", ["1e3", "-2.5", " 7 "]);
        assert_eq!(col.present_numbers(), vec![1000.0, -2.5, 7.0]);
    }

    #[test]
    fn test_fill_reports_rows() {
        let mut col = Column::from_cells("x", ["1", "", "3", ""]);
        assert_eq!(col.fill_numeric(2.0), vec![1, 3]);
        assert_eq!(col.missing_count(), 0);

        // Filling the wrong kind is a no-op
        assert!(col.fill_text("a").is_empty());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
    }
}
