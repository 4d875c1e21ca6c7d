//! Chart inputs derived from tables.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::Frame;

/// Slices of a pie chart: category labels and their counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartData {
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl PieChartData {
    /// Share of each slice in percent of the charted total.
    pub fn percentages(&self) -> Vec<f64> {
        let total: usize = self.counts.iter().sum();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|&c| c as f64 * 100.0 / total as f64)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Points of a line chart over categorical x values, in plotting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl LineChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One box of a box plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxGroup {
    pub label: String,
    pub values: Vec<f64>,
}

/// Groups of a box plot, in plotting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotData {
    pub groups: Vec<BoxGroup>,
}

impl BoxPlotData {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// The `top_n` most frequent values of `column`, most frequent first.
pub fn top_categories(frame: &Frame, column: &str, top_n: usize) -> Result<Vec<(String, usize)>> {
    Ok(frame
        .value_counts(column)?
        .into_iter()
        .take(top_n)
        .collect())
}

/// Row counts of the `top_n` most frequent countries.
pub fn country_share(frame: &Frame, country_col: &str, top_n: usize) -> Result<PieChartData> {
    let (labels, counts) = top_categories(frame, country_col, top_n)?.into_iter().unzip();
    Ok(PieChartData { labels, counts })
}

/// The `top_n` rows with the largest `value_col`, labelled by `label_col`,
/// in descending order of value.
pub fn top_revenue(
    frame: &Frame,
    value_col: &str,
    label_col: &str,
    top_n: usize,
) -> Result<LineChartData> {
    frame.column(label_col)?;
    let top = frame.nlargest(top_n, value_col)?;

    let label_column = top.column(label_col)?;
    let labels = (0..top.row_count())
        .map(|row| label_column.display_value(row).unwrap_or_default())
        .collect();
    let values = top.numeric(value_col)?.iter().flatten().copied().collect();

    Ok(LineChartData { labels, values })
}

/// `value_col` grouped by the `top_n` most frequent values of `group_col`.
///
/// Rows outside those groups are dropped, as are rows missing `value_col`.
pub fn price_by_country(
    frame: &Frame,
    group_col: &str,
    value_col: &str,
    top_n: usize,
) -> Result<BoxPlotData> {
    frame.numeric(value_col)?;
    let keys: Vec<String> = top_categories(frame, group_col, top_n)?
        .into_iter()
        .map(|(key, _)| key)
        .collect();

    let filtered = frame.filter_in(group_col, &keys)?;
    let groups_column = filtered.column(group_col)?;
    let values = filtered.numeric(value_col)?;

    let mut groups: Vec<BoxGroup> = keys
        .into_iter()
        .map(|label| BoxGroup {
            label,
            values: Vec::new(),
        })
        .collect();

    for (row, value) in values.iter().enumerate() {
        let (Some(label), Some(value)) = (groups_column.display_value(row), value) else {
            continue;
        };
        if let Some(group) = groups.iter_mut().find(|g| g.label == label) {
            group.values.push(*value);
        }
    }

    Ok(BoxPlotData { groups })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankscopeError;
    use crate::frame::Column;

    fn countries(counts: &[(&str, usize)]) -> Frame {
        let mut cells = Vec::new();
        let mut prices = Vec::new();
        for (i, (country, count)) in counts.iter().enumerate() {
            for _ in 0..*count {
                cells.push(Some(country.to_string()));
                prices.push(Some(i as f64));
            }
        }
        Frame::new(vec![
            Column::text("country", cells),
            Column::numeric("price (GBP)", prices),
        ])
        .unwrap()
    }

    #[test]
    fn test_country_share_top_ten() {
        let mut counts = vec![("US", 50), ("UK", 20), ("DE", 5)];
        let others: Vec<String> = (0..15).map(|i| format!("C{:02}", i)).collect();
        for (i, name) in others.iter().enumerate() {
            counts.push((name.as_str(), if i < 7 { 4 } else { 1 }));
        }
        let frame = countries(&counts);

        let pie = country_share(&frame, "country", 10).unwrap();

        assert_eq!(pie.labels.len(), 10);
        assert_eq!(&pie.labels[..3], &["US", "UK", "DE"]);
        assert_eq!(&pie.labels[3..], &["C00", "C01", "C02", "C03", "C04", "C05", "C06"]);
        assert!(!pie.labels.contains(&"C07".to_string()));
        assert_eq!(pie.counts[0], 50);
        let total: f64 = pie.percentages().iter().sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_country_share_missing_column() {
        let frame = countries(&[("US", 1)]);
        assert!(matches!(
            country_share(&frame, "nation", 10),
            Err(RankscopeError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_top_revenue_fifteen_rows() {
        let names: Vec<Option<String>> = (0..15).map(|i| Some(format!("Co{}", i))).collect();
        // Revenues out of order: 3, 10, 17, ... mod 15 scrambles the ranking
        let revenue: Vec<Option<f64>> = (0..15).map(|i| Some(((i * 7 + 3) % 15) as f64 * 10.0)).collect();
        let frame = Frame::new(vec![
            Column::text("Name", names),
            Column::numeric("revenue_ttm", revenue.clone()),
        ])
        .unwrap();

        let line = top_revenue(&frame, "revenue_ttm", "Name", 10).unwrap();

        assert_eq!(line.values.len(), 10);
        assert_eq!(line.values[0], 140.0);
        assert_eq!(line.values[9], 50.0);
        assert!(line.values.windows(2).all(|w| w[0] >= w[1]));
        for (label, value) in line.labels.iter().zip(&line.values) {
            let index: usize = label.trim_start_matches("Co").parse().unwrap();
            assert_eq!(revenue[index], Some(*value));
        }
    }

    #[test]
    fn test_top_revenue_missing_label_column() {
        let frame = Frame::new(vec![Column::numeric("revenue_ttm", vec![Some(1.0)])]).unwrap();
        assert!(matches!(
            top_revenue(&frame, "revenue_ttm", "Name", 10),
            Err(RankscopeError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_price_by_country_top_five() {
        let frame = countries(&[
            ("US", 6),
            ("CN", 5),
            ("JP", 4),
            ("UK", 3),
            ("DE", 2),
            ("FR", 1),
        ]);

        let boxes = price_by_country(&frame, "country", "price (GBP)", 5).unwrap();

        let labels: Vec<&str> = boxes.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["US", "CN", "JP", "UK", "DE"]);
        assert_eq!(boxes.groups[0].values, vec![0.0; 6]);
        assert_eq!(boxes.groups[4].values, vec![4.0, 4.0]);
    }

    #[test]
    fn test_price_by_country_requires_numeric_price() {
        let frame = countries(&[("US", 1)]);
        assert!(matches!(
            price_by_country(&frame, "country", "country", 5),
            Err(RankscopeError::ColumnType { .. })
        ));
    }
}
