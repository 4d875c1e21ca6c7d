//! Plain-text rendering of labelled numeric grids.

use std::fmt;

/// Format a statistic for display. Large and tiny magnitudes switch to
/// scientific notation so columns stay narrow.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        None => "NaN".to_string(),
        Some(v) if v.is_nan() => "NaN".to_string(),
        Some(v) if v == 0.0 => "0.000000".to_string(),
        Some(v) if v.abs() >= 1e9 || v.abs() < 1e-4 => format!("{:.6e}", v),
        Some(v) => format!("{:.6}", v),
    }
}

/// Write a grid with a header row of column labels and one labelled line per row.
/// Cells are right-aligned to the widest entry of their column.
pub(crate) fn write_grid(
    f: &mut fmt::Formatter<'_>,
    columns: &[&str],
    rows: &[(String, Vec<String>)],
) -> fmt::Result {
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .filter_map(|(_, cells)| cells.get(i).map(String::len))
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write!(f, "{:label_width$}", "")?;
    for (name, width) in columns.iter().zip(widths.iter().copied()) {
        write!(f, "  {:>width$}", name)?;
    }
    writeln!(f)?;

    for (label, cells) in rows {
        write!(f, "{:<label_width$}", label)?;
        for (cell, width) in cells.iter().zip(widths.iter().copied()) {
            write!(f, "  {:>width$}", cell)?;
        }
        writeln!(f)?;
    }
    Ok(())
}
