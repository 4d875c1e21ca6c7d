//! Typed tables: inference, consolidation and row selection.

mod column;
mod consolidate;
mod table;

pub use column::{Column, ColumnData, ColumnType, format_number};
pub use consolidate::{ConsolidationSummary, consolidate, consolidate_tables};
pub use table::Frame;
