//! Descriptive statistics for numeric columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::{format_stat, write_grid};
use super::moments::{RunningMoments, quantile_sorted, sorted};
use crate::frame::Frame;

/// Summary of one numeric column. Undefined statistics are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name.
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation.
    pub std: Option<f64>,
    pub min: Option<f64>,
    /// First quartile (25th percentile).
    pub q1: Option<f64>,
    pub median: Option<f64>,
    /// Third quartile (75th percentile).
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Summarise the non-missing values of a column.
    pub fn from_values(column: impl Into<String>, values: &[f64]) -> Self {
        let moments: RunningMoments = values.iter().copied().collect();
        let ordered = sorted(values);

        Self {
            column: column.into(),
            count: moments.count(),
            mean: moments.mean(),
            std: moments.sample_std(),
            min: moments.min(),
            q1: quantile_sorted(&ordered, 0.25),
            median: quantile_sorted(&ordered, 0.5),
            q3: quantile_sorted(&ordered, 0.75),
            max: moments.max(),
        }
    }

    /// Interquartile range.
    pub fn iqr(&self) -> Option<f64> {
        Some(self.q3? - self.q1?)
    }

    fn cells(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.q1,
            self.median,
            self.q3,
            self.max,
        ]
    }
}

/// Descriptive statistics for every numeric column of a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub columns: Vec<ColumnSummary>,
}

impl Description {
    /// Get the summary for a column by name.
    pub fn get(&self, column: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Describe every numeric column, in table order.
pub fn describe(frame: &Frame) -> Description {
    let columns = frame
        .numeric_columns()
        .map(|column| ColumnSummary::from_values(column.name(), &column.present_numbers()))
        .collect();

    Description { columns }
}

const ROW_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "(no numeric columns)");
        }

        let names: Vec<&str> = self.columns.iter().map(|c| c.column.as_str()).collect();
        let cells: Vec<[Option<f64>; 8]> = self.columns.iter().map(ColumnSummary::cells).collect();

        let rows: Vec<(String, Vec<String>)> = ROW_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let values = cells.iter().map(|c| format_stat(c[i])).collect();
                (label.to_string(), values)
            })
            .collect();

        write_grid(f, &names, &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DataTable;

    #[test]
    fn test_column_summary() {
        let summary = ColumnSummary::from_values("x", &[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, Some(2.5));
        assert_eq!(summary.min, Some(1.0));
        assert_eq!(summary.q1, Some(1.75));
        assert_eq!(summary.median, Some(2.5));
        assert_eq!(summary.q3, Some(3.25));
        assert_eq!(summary.max, Some(4.0));
        assert_eq!(summary.iqr(), Some(1.5));
        assert!((summary.std.unwrap() - 1.2909944487358056).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ColumnSummary::from_values("x", &[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.median, None);
    }

    #[test]
    fn test_describe_skips_text_and_missing() {
        let table = DataTable::new(
            vec!["Name".into(), "price (GBP)".into()],
            vec![
                vec!["a".into(), "10".into()],
                vec!["b".into(), "".into()],
                vec!["c".into(), "30".into()],
            ],
        );
        let description = describe(&Frame::from_table(&table));

        assert_eq!(description.columns.len(), 1);
        let price = description.get("price (GBP)").unwrap();
        assert_eq!(price.count, 2);
        assert_eq!(price.mean, Some(20.0));
    }

    #[test]
    fn test_display_layout() {
        let description = Description {
            columns: vec![ColumnSummary::from_values("marketcap", &[1.0, 3.0])],
        };
        let text = description.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].trim_start().starts_with("marketcap"));
        assert!(lines[1].starts_with("count"));
        assert!(lines[1].ends_with("2.000000"));
        assert!(lines[8].starts_with("max"));
    }
}
