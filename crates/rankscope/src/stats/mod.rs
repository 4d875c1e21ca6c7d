//! Summary statistics and correlation.

mod correlation;
mod describe;
mod grid;
mod moments;

pub use correlation::{CorrelationMatrix, correlation_matrix, pearson};
pub use describe::{ColumnSummary, Description, describe};
pub use grid::format_stat;
pub use moments::{RunningMoments, median, mode, quantile_sorted, sorted};
