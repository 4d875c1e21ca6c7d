//! Run command - statistics, then charts.

use std::path::PathBuf;

use colored::Colorize;
use rankscope::{Pipeline, PipelineConfig};

use super::{print_summary, render_charts, show_charts};

pub fn run(
    config: PipelineConfig,
    charts_dir: PathBuf,
    no_open: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::with_config(config.with_charts_dir(charts_dir));

    if !json_output {
        println!(
            "{} {}",
            "Processing".cyan().bold(),
            pipeline.config().archive.display().to_string().white()
        );
    }

    let output = pipeline.run()?;

    if json_output {
        println!("{}", output.report.to_json()?);
    } else {
        print_summary(&output.datasets, &output.prepared);
        println!("{}", output.report);
    }

    let (rendered, failure) = render_charts(&pipeline, &output);
    if !json_output {
        show_charts(&rendered, no_open)?;
    }

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
