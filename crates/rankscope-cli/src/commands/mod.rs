//! CLI command implementations.

pub mod charts;
pub mod describe;
pub mod run;

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;
use rankscope::{ChartKind, Datasets, Pipeline, Prepared, RankscopeError, RenderedChart, RunOutput};

/// Print what was loaded and how the combined table was built.
pub(crate) fn print_summary(datasets: &Datasets, prepared: &Prepared) {
    println!(
        "{} {} datasets ({} rows)",
        "Loaded".cyan().bold(),
        datasets.len().to_string().white().bold(),
        datasets.total_rows()
    );
    for dataset in datasets.iter() {
        println!(
            "  {:45} {:>6} rows {:>3} columns",
            dataset.name,
            dataset.source.row_count,
            dataset.source.column_count
        );
    }

    let consolidation = &prepared.consolidation;
    println!(
        "{} {} rows, {} duplicates removed, {} columns",
        "Combined".cyan().bold(),
        consolidation.combined_rows.to_string().white().bold(),
        consolidation.duplicates_removed.to_string().yellow(),
        consolidation.columns
    );

    let cleaning = &prepared.cleaning;
    println!(
        "{} {} missing values in {} columns",
        "Filled".cyan().bold(),
        cleaning.values_filled().to_string().white().bold(),
        cleaning.fills.len()
    );
    for fill in &cleaning.fills {
        println!(
            "  {:25} {:>6} x {}",
            fill.column,
            fill.rows.len(),
            fill.strategy.description()
        );
    }
    for column in &cleaning.unfilled {
        println!(
            "  {} {} has no values to fill from",
            "Warning:".yellow(),
            column
        );
    }
    println!();
}

/// Render the charts in display order, stopping at the first failure.
///
/// Charts rendered before the failure are returned alongside it.
pub(crate) fn render_charts(
    pipeline: &Pipeline,
    output: &RunOutput,
) -> (Vec<RenderedChart>, Option<RankscopeError>) {
    let mut rendered = Vec::new();
    for kind in ChartKind::ALL {
        match pipeline.render_chart(kind, output) {
            Ok(chart) => rendered.push(chart),
            Err(e) => return (rendered, Some(e)),
        }
    }
    (rendered, None)
}

/// List rendered charts and open them one after another.
///
/// On a terminal, waits for Enter before opening the next chart.
pub(crate) fn show_charts(charts: &[RenderedChart], no_open: bool) -> io::Result<()> {
    if charts.is_empty() {
        return Ok(());
    }

    println!("{}", "Charts:".yellow().bold());
    for chart in charts {
        println!("  {}", chart.path.display().to_string().white());
    }

    if no_open {
        return Ok(());
    }

    let interactive = io::stdin().is_terminal();
    let mut lines = io::stdin().lock().lines();

    for (i, chart) in charts.iter().enumerate() {
        if let Err(e) = open::that(&chart.path) {
            eprintln!(
                "{} Could not open {}: {}",
                "Warning:".yellow(),
                chart.path.display(),
                e
            );
            continue;
        }

        if interactive && i + 1 < charts.len() {
            print!("Press Enter for the next chart... ");
            io::stdout().flush()?;
            if lines.next().transpose()?.is_none() {
                break;
            }
        }
    }
    Ok(())
}
