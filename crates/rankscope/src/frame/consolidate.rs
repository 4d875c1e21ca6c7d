//! Merging the loaded datasets into one deduplicated table.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::table::Frame;
use crate::input::{DataTable, Datasets};

/// Counts describing a consolidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationSummary {
    /// Sum of row counts of the inputs.
    pub input_rows: usize,
    /// Rows removed as exact duplicates.
    pub duplicates_removed: usize,
    /// Rows in the combined table.
    pub combined_rows: usize,
    /// Columns in the combined table.
    pub columns: usize,
}

/// Concatenate the tables, infer column types over the union, drop duplicates.
pub fn consolidate_tables<'a>(
    tables: impl IntoIterator<Item = &'a DataTable>,
) -> (Frame, ConsolidationSummary) {
    let combined = DataTable::concat(tables);
    let input_rows = combined.row_count();

    let mut frame = Frame::from_table(&combined);
    let duplicates_removed = frame.drop_duplicates();

    let summary = ConsolidationSummary {
        input_rows,
        duplicates_removed,
        combined_rows: frame.row_count(),
        columns: frame.column_count(),
    };
    info!(
        input_rows,
        duplicates_removed,
        combined_rows = summary.combined_rows,
        columns = summary.columns,
        "consolidated datasets"
    );

    (frame, summary)
}

/// Consolidate every loaded dataset, in load order.
pub fn consolidate(datasets: &Datasets) -> (Frame, ConsolidationSummary) {
    consolidate_tables(datasets.tables())
}
