//! Pairwise Pearson correlation between numeric columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::{format_stat, write_grid};
use crate::frame::Frame;

/// Square correlation matrix over the numeric columns of a table.
///
/// Entries are `None` where the correlation is undefined (fewer than two
/// complete pairs, or a constant column).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation between two columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pearson correlation over the rows where both values are present.
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

/// Correlate every pair of numeric columns, in table order.
pub fn correlation_matrix(frame: &Frame) -> CorrelationMatrix {
    let numeric: Vec<(&str, &[Option<f64>])> = frame
        .numeric_columns()
        .filter_map(|c| Some((c.name(), c.as_numeric()?)))
        .collect();

    let values = numeric
        .iter()
        .map(|(_, a)| numeric.iter().map(|(_, b)| pearson(a, b)).collect())
        .collect();

    CorrelationMatrix {
        columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "(no numeric columns)");
        }

        let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let rows: Vec<(String, Vec<String>)> = self
            .columns
            .iter()
            .zip(&self.values)
            .map(|(name, row)| (name.clone(), row.iter().map(|v| format_stat(*v)).collect()))
            .collect();

        write_grid(f, &names, &rows)
    }
}
