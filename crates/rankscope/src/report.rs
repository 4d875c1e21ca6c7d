//! The printed outcome of a pipeline run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clean::CleaningReport;
use crate::frame::ConsolidationSummary;
use crate::input::SourceMetadata;
use crate::stats::{CorrelationMatrix, Description};

/// Everything the reporting stage observed about the combined table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata of every loaded file, in load order.
    pub sources: Vec<SourceMetadata>,
    /// Row counts before and after deduplication.
    pub consolidation: ConsolidationSummary,
    /// Missing values filled during cleaning.
    pub cleaning: CleaningReport,
    /// Descriptive statistics per numeric column.
    pub description: Description,
    /// Pairwise correlation of numeric columns.
    pub correlation: CorrelationMatrix,
}

impl Report {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Descriptive Statistics:")?;
        write!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "Correlation Matrix:")?;
        write!(f, "{}", self.correlation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ColumnSummary;

    fn report() -> Report {
        Report {
            sources: Vec::new(),
            consolidation: ConsolidationSummary {
                input_rows: 3,
                duplicates_removed: 1,
                combined_rows: 2,
                columns: 1,
            },
            cleaning: CleaningReport::new(),
            description: Description {
                columns: vec![ColumnSummary::from_values("marketcap", &[1.0, 2.0])],
            },
            correlation: CorrelationMatrix {
                columns: vec!["marketcap".into()],
                values: vec![vec![Some(1.0)]],
            },
        }
    }

    #[test]
    fn test_display_sections() {
        let text = report().to_string();

        assert!(text.starts_with("Descriptive Statistics:\n"));
        assert!(text.contains("\nCorrelation Matrix:\n"));
        assert!(text.contains("marketcap"));
    }

    #[test]
    fn test_json() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["consolidation"]["duplicates_removed"], 1);
        assert_eq!(value["description"]["columns"][0]["column"], "marketcap");
    }
}
