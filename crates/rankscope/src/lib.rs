//! rankscope: consolidation, cleaning, statistics and charts for company
//! ranking datasets.
//!
//! The pipeline unpacks a zip archive of CSV rankings (dividend yield,
//! earnings, market cap, P/E ratio, revenue), merges them into one
//! deduplicated table, fills missing values, reports descriptive statistics
//! and a correlation matrix, and draws three charts.
//!
//! # Example
//!
//! ```no_run
//! use rankscope::{ChartKind, Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::with_config(
//!     PipelineConfig::default().with_archive("world top companies.zip"),
//! );
//! let output = pipeline.run().unwrap();
//!
//! println!("{}", output.report);
//! for kind in ChartKind::ALL {
//!     pipeline.render_chart(kind, &output).unwrap();
//! }
//! ```

pub mod chart;
pub mod clean;
pub mod error;
pub mod frame;
pub mod input;
pub mod stats;

mod pipeline;
mod report;

pub use chart::{ChartKind, ChartRenderer, ChartSet, ChartStyle, RenderedChart};
pub use clean::{Cleaner, CleaningReport, FillStrategy};
pub use error::{RankscopeError, Result};
pub use frame::{Column, ColumnType, ConsolidationSummary, Frame};
pub use input::{DataTable, Dataset, Datasets, Loader, SourceMetadata};
pub use pipeline::{
    ColumnNames, DEFAULT_ARCHIVE, DEFAULT_CHARTS_DIR, DEFAULT_EXTRACT_DIR, DEFAULT_FILES,
    Pipeline, PipelineConfig, Prepared, RunOutput,
};
pub use report::Report;
pub use stats::{CorrelationMatrix, Description};
