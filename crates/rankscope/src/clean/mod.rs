//! Cleaning of the combined table.

mod cleaner;
mod fill;

pub use cleaner::Cleaner;
pub use fill::{CleaningReport, ColumnFill, FillStrategy};
