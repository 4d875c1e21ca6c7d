//! Missing value imputation.

use tracing::{debug, info, warn};

use super::fill::{CleaningReport, ColumnFill, FillStrategy};
use crate::frame::{ColumnData, Frame};
use crate::stats::{median, mode};

/// Fills missing cells column by column: numeric columns with the median,
/// text columns with the mode.
#[derive(Debug, Clone, Default)]
pub struct Cleaner;

impl Cleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self
    }

    /// Fill every missing cell in place and report what changed.
    pub fn clean(&self, frame: &mut Frame) -> CleaningReport {
        let mut report = CleaningReport::new();

        for column in frame.columns_mut() {
            if column.missing_count() == 0 {
                continue;
            }

            let strategy = match column.data() {
                ColumnData::Numeric(_) => median(&column.present_numbers()).map(FillStrategy::Median),
                ColumnData::Text(cells) => {
                    mode(cells.iter().flatten().map(String::as_str)).map(|m| FillStrategy::Mode(m.to_string()))
                }
            };

            let Some(strategy) = strategy else {
                warn!(column = column.name(), "no values to fill missing cells from");
                report.unfilled.push(column.name().to_string());
                continue;
            };

            let rows = match &strategy {
                FillStrategy::Median(value) => column.fill_numeric(*value),
                FillStrategy::Mode(value) => column.fill_text(value),
            };
            debug!(
                column = column.name(),
                filled = rows.len(),
                fill = %strategy.description(),
                "filled missing values"
            );

            report.add_fill(ColumnFill {
                column: column.name().to_string(),
                strategy,
                rows,
            });
        }

        info!(
            columns = report.fills.len(),
            values = report.values_filled(),
            "cleaned combined table"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;

    #[test]
    fn test_numeric_median_fill() {
        let mut frame = Frame::new(vec![Column::numeric(
            "revenue_ttm",
            vec![Some(10.0), Some(20.0), None, Some(40.0)],
        )])
        .unwrap();

        let report = Cleaner::new().clean(&mut frame);

        assert_eq!(
            frame.numeric("revenue_ttm").unwrap(),
            &[Some(10.0), Some(20.0), Some(20.0), Some(40.0)]
        );
        let fill = report.fill_for("revenue_ttm").unwrap();
        assert_eq!(fill.strategy, FillStrategy::Median(20.0));
        assert_eq!(fill.rows, vec![2]);
    }

    #[test]
    fn test_text_mode_fill() {
        let mut frame = Frame::new(vec![Column::text(
            "country",
            vec![
                Some("Japan".into()),
                None,
                Some("China".into()),
                Some("China".into()),
                None,
            ],
        )])
        .unwrap();

        let report = Cleaner::new().clean(&mut frame);

        let cells = frame.column("country").unwrap().as_text().unwrap();
        assert_eq!(cells[1].as_deref(), Some("China"));
        assert_eq!(cells[4].as_deref(), Some("China"));
        assert_eq!(report.values_filled(), 2);
    }

    #[test]
    fn test_text_mode_tie_uses_smallest_value() {
        let mut frame = Frame::new(vec![Column::text(
            "country",
            vec![
                Some("Japan".into()),
                Some("China".into()),
                None,
                Some("China".into()),
                Some("Japan".into()),
            ],
        )])
        .unwrap();

        let report = Cleaner::new().clean(&mut frame);

        let fill = report.fill_for("country").unwrap();
        assert_eq!(fill.strategy, FillStrategy::Mode("China".to_string()));
        let cells = frame.column("country").unwrap().as_text().unwrap();
        assert_eq!(cells[2].as_deref(), Some("China"));
    }

    #[test]
    fn test_columns_are_filled_independently() {
        let mut frame = Frame::new(vec![
            Column::numeric("a", vec![Some(1.0), None, Some(3.0)]),
            Column::numeric("b", vec![None, Some(5.0), Some(7.0)]),
            Column::numeric("c", vec![Some(1.0), Some(1.0), Some(1.0)]),
        ])
        .unwrap();

        let report = Cleaner::new().clean(&mut frame);

        assert_eq!(frame.numeric("a").unwrap()[1], Some(2.0));
        assert_eq!(frame.numeric("b").unwrap()[0], Some(6.0));
        assert_eq!(report.fills.len(), 2);
        assert!(report.fill_for("c").is_none());
    }

    #[test]
    fn test_all_missing_column_is_reported() {
        let mut frame = Frame::new(vec![Column::numeric("pe_ratio_ttm", vec![None, None])]).unwrap();

        let report = Cleaner::new().clean(&mut frame);

        assert_eq!(report.unfilled, vec!["pe_ratio_ttm"]);
        assert_eq!(frame.missing_count(), 2);
    }
}
