//! Input parsing and data source handling.

mod archive;
mod loader;
mod parser;
mod source;

pub use archive::extract_archive;
pub use loader::{Dataset, Datasets, Loader};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
