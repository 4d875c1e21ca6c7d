//! Fill operations and the record of what a cleaning pass changed.

use serde::{Deserialize, Serialize};

/// How missing values in a column were replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value", rename_all = "snake_case")]
pub enum FillStrategy {
    /// Numeric column filled with its median.
    Median(f64),
    /// Text column filled with its most frequent value.
    Mode(String),
}

impl FillStrategy {
    /// Get a human-readable description of the fill.
    pub fn description(&self) -> String {
        match self {
            FillStrategy::Median(value) => format!("median {}", crate::frame::format_number(*value)),
            FillStrategy::Mode(value) => format!("mode '{}'", value),
        }
    }
}

/// Missing values replaced in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFill {
    /// Column affected.
    pub column: String,
    /// Value used and how it was chosen.
    pub strategy: FillStrategy,
    /// Rows (0-based) whose value was filled.
    pub rows: Vec<usize>,
}

/// Result of a cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Columns that had missing values replaced, in table order.
    pub fills: Vec<ColumnFill>,
    /// Columns with missing values but nothing to compute a fill from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unfilled: Vec<String>,
}

impl CleaningReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fill to the report.
    pub fn add_fill(&mut self, fill: ColumnFill) {
        self.fills.push(fill);
    }

    /// Total cells filled across all columns.
    pub fn values_filled(&self) -> usize {
        self.fills.iter().map(|f| f.rows.len()).sum()
    }

    /// The fill applied to a column, if any.
    pub fn fill_for(&self, column: &str) -> Option<&ColumnFill> {
        self.fills.iter().find(|f| f.column == column)
    }
}
